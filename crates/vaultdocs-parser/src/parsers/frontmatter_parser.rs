//! Frontmatter extraction: `---\nYAML\n---`

use regex::Regex;
use std::sync::LazyLock;
use vaultdocs_core::Frontmatter;

/// Matches YAML frontmatter at the very start of a note
static FRONTMATTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*(?:\r?\n|$)")
        .expect("valid frontmatter regex")
});

/// Extract YAML frontmatter from content.
///
/// Returns (frontmatter_string, content_without_frontmatter)
pub fn extract_frontmatter(content: &str) -> (Option<String>, &str) {
    match FRONTMATTER_PATTERN.captures(content) {
        Some(caps) => {
            let fm_str = caps.get(1).map(|m| m.as_str().to_string());
            let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
            (fm_str, &content[end..])
        }
        None => (None, content),
    }
}

/// Parse a frontmatter block into a map. Non-mapping or malformed YAML yields `None`.
pub fn parse_frontmatter(fm_str: &str) -> Option<Frontmatter> {
    match serde_yaml::from_str::<serde_json::Value>(fm_str) {
        Ok(serde_json::Value::Object(map)) => Some(Frontmatter {
            data: map.into_iter().collect(),
        }),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Ignoring malformed frontmatter: {}", e);
            None
        }
    }
}
