//! Markdown link parser: `[text](url)`, `[text](url "title")`, `[text](<url with spaces>)`

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use vaultdocs_core::{Link, SourcePosition};

use super::link_utils::{classify_url, normalize_relative_url};
use crate::engine::ExcludedRanges;

/// Images (`![alt](url)`) are filtered out after matching since the regex
/// crate has no look-behind.
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\[(?P<text>[^\[\]]*)\]\((?:<(?P<angle>[^>]+)>|(?P<url>[^()\s"]+))(?:\s+"[^"]*")?\)"#,
    )
    .expect("valid markdown link regex")
});

/// Parse markdown links outside excluded (code) ranges
pub fn parse_markdown_links(
    content: &str,
    source_file: &Path,
    excluded: &ExcludedRanges,
) -> Vec<Link> {
    if !content.contains("](") {
        return Vec::new();
    }

    MARKDOWN_LINK
        .captures_iter(content)
        .filter_map(|caps| {
            let full_match = caps.get(0)?;
            let start = full_match.start();

            if start > 0 && content.as_bytes().get(start - 1) == Some(&b'!') {
                return None;
            }
            if excluded.contains(start) {
                return None;
            }

            let text = caps.name("text").map(|m| m.as_str()).unwrap_or("");
            let url = caps
                .name("angle")
                .or_else(|| caps.name("url"))
                .map(|m| m.as_str())
                .unwrap_or("");

            let type_ = classify_url(url);
            Some(Link {
                type_,
                source_file: source_file.to_path_buf(),
                target: normalize_relative_url(url),
                display_text: Some(text.to_string()),
                position: SourcePosition::from_offset(content, start, full_match.len()),
            })
        })
        .collect()
}
