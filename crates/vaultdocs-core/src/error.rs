//! Error types for vaultdocs.
//!
//! All errors in the workspace are represented by the [`Error`] enum so that
//! the hook layer can tell recoverable artifact failures apart from ones that
//! must abort the build.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all vaultdocs operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Parse error (notes, frontmatter, dates)
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// The renderer's staging directory was expected after a graph build but is absent
    #[error("Transient directory missing after graph build: {path}")]
    TransientDirMissing { path: PathBuf },

    /// Template registration or rendering failure
    #[error("Template error: {reason}")]
    Template { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a missing transient directory error
    pub fn transient_dir_missing(path: impl Into<PathBuf>) -> Self {
        Error::TransientDirMissing { path: path.into() }
    }

    /// Create a template error
    pub fn template(reason: impl Into<String>) -> Self {
        Error::Template {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this is a plain filesystem failure
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::FileNotFound { .. })
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::config_error(err.to_string())
    }
}
