//! # vaultdocs Parser
//!
//! Extracts the parts of an Obsidian note that matter for the link graph:
//! YAML frontmatter (for aliases and titles), wikilinks, embeds and markdown
//! links.
//!
//! ## Architecture
//!
//! Parsing is two-phase:
//!
//! 1. a `pulldown-cmark` pass collects code blocks, inline code and raw HTML
//!    as excluded byte ranges
//! 2. regex passes find `[[...]]`, `![[...]]` and `[text](url)`, skipping
//!    matches that start inside an excluded range
//!
//! ## Quick Start
//!
//! ```
//! use vaultdocs_parser::Parser;
//! use std::path::{Path, PathBuf};
//!
//! let content = "---\ntitle: My Note\n---\n[[WikiLink]] and [[Other Note#Heading]].\n";
//! let parser = Parser::new(PathBuf::from("/vault"));
//! let note = parser.parse_file(Path::new("my-note.md"), content).unwrap();
//! assert_eq!(note.links.len(), 2);
//! assert_eq!(note.frontmatter.unwrap().title(), Some("My Note"));
//! ```

pub mod engine;
pub mod parsers;

pub use engine::{ExcludedRanges, excluded_ranges};
pub use parsers::Parser;
pub use vaultdocs_core::prelude::*;
