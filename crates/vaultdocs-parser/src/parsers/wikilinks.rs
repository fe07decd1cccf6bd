//! Wikilink and embed parser: `[[Note]]`, `[[folder/Note|Alias]]`, `![[Note]]`

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use vaultdocs_core::{Link, LinkType, SourcePosition};

use super::link_utils::{classify_wikilink, split_display};
use crate::engine::ExcludedRanges;

/// Matches `[[...]]`, optionally preceded by `!` for embeds
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[\[([^\[\]]+)\]\]").expect("valid wikilink regex"));

/// Parse wikilinks and embeds outside excluded (code) ranges
pub fn parse_wikilinks(content: &str, source_file: &Path, excluded: &ExcludedRanges) -> Vec<Link> {
    if !content.contains("[[") {
        return Vec::new();
    }

    WIKILINK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let full_match = caps.get(0)?;
            if excluded.contains(full_match.start()) {
                return None;
            }

            let is_embed = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let (target, display_text) = split_display(caps.get(2)?.as_str());
            if target.is_empty() {
                return None;
            }

            let type_ = if is_embed {
                LinkType::Embed
            } else {
                classify_wikilink(&target)
            };

            Some(Link {
                type_,
                source_file: source_file.to_path_buf(),
                target,
                display_text,
                position: SourcePosition::from_offset(
                    content,
                    full_match.start(),
                    full_match.len(),
                ),
            })
        })
        .collect()
}
