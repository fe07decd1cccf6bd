//! # vaultdocs Core
//!
//! Core data models, error types, and configuration shared by the vaultdocs
//! crates.
//!
//! ## Core Modules
//!
//! - [`models`] - Parsed note types (VaultFile, Link, Frontmatter)
//! - [`error`] - Error type and Result alias
//! - [`config`] - Hook and graph configuration
//!
//! ## Usage Examples
//!
//! ```
//! use vaultdocs_core::prelude::*;
//!
//! let graph = GraphConfig::default();
//! assert_eq!(graph.transient_dir_policy, TransientDirPolicy::Require);
//!
//! fn build() -> Result<()> {
//!     Err(Error::parse_error("Invalid markdown content"))
//! }
//! assert!(build().is_err());
//! ```

pub mod config;
pub mod error;
pub mod models;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{GraphConfig, HooksConfig, TransientDirPolicy};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Frontmatter, Link, LinkType, SourcePosition, VaultFile, note_name};
}
