//! Note parser: frontmatter, wikilinks, embeds and markdown links

use std::path::{Path, PathBuf};
use vaultdocs_core::{Result, VaultFile};

pub mod frontmatter_parser;
pub mod link_utils;
pub mod markdown_links;
pub mod wikilinks;

pub use self::frontmatter_parser::{extract_frontmatter, parse_frontmatter};
use crate::engine::excluded_ranges;

/// Main parser for vault notes
pub struct Parser {
    vault_root: PathBuf,
}

impl Parser {
    /// Create a new parser for the given vault root
    pub fn new(vault_root: PathBuf) -> Self {
        Self { vault_root }
    }

    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }

    /// Parse a note from its path and content.
    ///
    /// Absolute paths under the vault root are stored relative to it.
    pub fn parse_file(&self, path: &Path, content: &str) -> Result<VaultFile> {
        let relative = path
            .strip_prefix(&self.vault_root)
            .unwrap_or(path)
            .to_path_buf();

        let (fm_str, body) = extract_frontmatter(content);
        let mut vault_file = VaultFile::new(relative, body.to_string());
        vault_file.frontmatter = fm_str.as_deref().and_then(parse_frontmatter);

        let excluded = excluded_ranges(body);
        vault_file.links.extend(wikilinks::parse_wikilinks(
            body,
            &vault_file.path,
            &excluded,
        ));
        vault_file.links.extend(markdown_links::parse_markdown_links(
            body,
            &vault_file.path,
            &excluded,
        ));
        vault_file.links.sort_by_key(|link| link.position.offset);

        Ok(vault_file)
    }
}
