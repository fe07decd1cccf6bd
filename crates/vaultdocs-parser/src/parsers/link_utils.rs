//! Shared utilities for link classification.
//!
//! Keeps wikilink and markdown link parsing consistent about what counts as a
//! heading reference, block reference or external URL.

use vaultdocs_core::LinkType;

/// Classify a markdown link URL into the appropriate `LinkType`.
///
/// # Examples
///
/// ```
/// use vaultdocs_parser::parsers::link_utils::classify_url;
/// use vaultdocs_core::LinkType;
///
/// assert_eq!(classify_url("https://example.com"), LinkType::ExternalLink);
/// assert_eq!(classify_url("#section"), LinkType::Anchor);
/// assert_eq!(classify_url("file.md#section"), LinkType::HeadingRef);
/// assert_eq!(classify_url("file.md#^blockid"), LinkType::BlockRef);
/// assert_eq!(classify_url("./docs/api.md"), LinkType::MarkdownLink);
/// ```
pub fn classify_url(url: &str) -> LinkType {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:") {
        return LinkType::ExternalLink;
    }

    classify_fragment(url).unwrap_or(LinkType::MarkdownLink)
}

/// Classify a wikilink target into the appropriate `LinkType`.
///
/// ```
/// use vaultdocs_parser::parsers::link_utils::classify_wikilink;
/// use vaultdocs_core::LinkType;
///
/// assert_eq!(classify_wikilink("Note"), LinkType::WikiLink);
/// assert_eq!(classify_wikilink("Note#Heading"), LinkType::HeadingRef);
/// assert_eq!(classify_wikilink("#^blockid"), LinkType::BlockRef);
/// ```
pub fn classify_wikilink(target: &str) -> LinkType {
    classify_fragment(target).unwrap_or(LinkType::WikiLink)
}

fn classify_fragment(target: &str) -> Option<LinkType> {
    let hash_pos = target.find('#')?;
    if target[hash_pos..].starts_with("#^") {
        Some(LinkType::BlockRef)
    } else if hash_pos == 0 {
        Some(LinkType::Anchor)
    } else {
        Some(LinkType::HeadingRef)
    }
}

/// Split `target|display` wikilink syntax.
pub fn split_display(raw: &str) -> (String, Option<String>) {
    match raw.split_once('|') {
        Some((target, display)) => (target.trim().to_string(), Some(display.trim().to_string())),
        None => (raw.trim().to_string(), None),
    }
}

/// Normalize a relative markdown link URL into a vault target.
///
/// Strips `./`, percent-decodes (`My%20Note.md` -> `My Note.md`) and leaves
/// external URLs untouched.
pub fn normalize_relative_url(url: &str) -> String {
    if classify_url(url) == LinkType::ExternalLink {
        return url.to_string();
    }

    let decoded = urlencoding::decode(url)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| url.to_string());

    let mut trimmed = decoded.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_string()
}
