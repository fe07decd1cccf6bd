//! Configuration types for the build hooks.
//!
//! Follows a builder pattern with validation. Every field has a default so a
//! site without any `vaultdocs.yaml` behaves exactly like the stock hooks.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default config file looked up in the site root
pub const DEFAULT_CONFIG_FILE: &str = "vaultdocs.yaml";

/// Environment prefix for overrides (`VAULTDOCS__GRAPH__WIDTH=900px`)
pub const ENV_PREFIX: &str = "VAULTDOCS";

/// What to do when the renderer's staging directory is gone at cleanup time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransientDirPolicy {
    /// A missing directory aborts the build
    #[default]
    Require,
    /// A missing directory is logged and skipped
    IgnoreMissing,
}

/// Visual and output parameters for the graph artifact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Whether to build the graph at all
    pub enabled: bool,
    /// Output file, relative to the vault root
    pub output_path: PathBuf,
    /// Staging directory the renderer leaves behind, relative to the vault root
    pub transient_dir: PathBuf,
    pub transient_dir_policy: TransientDirPolicy,
    pub height: String,
    pub width: String,
    pub font_color: String,
    pub bgcolor: String,
    /// Draw arrows on edges
    pub directed: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_path: PathBuf::from("docs").join("assets").join("graph.html"),
            transient_dir: PathBuf::from("lib"),
            transient_dir_policy: TransientDirPolicy::Require,
            height: "750px".to_string(),
            width: "750px".to_string(),
            font_color: "#7c7c7c".to_string(),
            bgcolor: "transparent".to_string(),
            directed: false,
        }
    }
}

/// Top-level hook configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HooksConfig {
    /// Vault root; the working directory unless configured
    pub vault_root: PathBuf,
    /// Names directly under the vault root that are skipped while scanning
    pub excluded_paths: HashSet<String>,
    /// Note extensions (without dot)
    pub allowed_extensions: HashSet<String>,
    /// Files above this size are not parsed
    pub max_file_size: u64,
    pub graph: GraphConfig,
}

impl Default for HooksConfig {
    fn default() -> Self {
        let vault_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            vault_root,
            excluded_paths: [".obsidian", ".git", ".trash", "site", "lib"]
                .into_iter()
                .map(String::from)
                .collect(),
            allowed_extensions: std::iter::once("md".to_string()).collect(),
            max_file_size: 5 * 1024 * 1024,
            graph: GraphConfig::default(),
        }
    }
}

impl HooksConfig {
    /// Create a new config with builder
    pub fn builder(vault_root: impl Into<PathBuf>) -> HooksConfigBuilder {
        HooksConfigBuilder::new(vault_root)
    }

    /// Load configuration from an optional YAML file plus environment overrides.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load(path: Option<&Path>, vault_root: impl Into<PathBuf>) -> Result<Self> {
        let vault_root = vault_root.into();
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| vault_root.join(DEFAULT_CONFIG_FILE));

        log::debug!("Loading hook configuration from {}", file.display());

        let mut loaded: HooksConfig = config::Config::builder()
            .add_source(config::File::from(file.as_path()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        // An explicit root on the command line wins over the file
        loaded.vault_root = vault_root;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Absolute output path of the graph artifact
    pub fn graph_output_path(&self) -> PathBuf {
        self.vault_root.join(&self.graph.output_path)
    }

    /// Absolute path of the renderer's staging directory
    pub fn transient_dir(&self) -> PathBuf {
        self.vault_root.join(&self.graph.transient_dir)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.vault_root.is_dir() {
            return Err(Error::config_error(format!(
                "Vault root is not a directory: {}",
                self.vault_root.display()
            )));
        }

        if self.graph.output_path.as_os_str().is_empty() {
            return Err(Error::config_error("Graph output path cannot be empty"));
        }

        if self.graph.transient_dir.as_os_str().is_empty() {
            return Err(Error::config_error("Transient directory cannot be empty"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(Error::config_error(
                "At least one note extension must be allowed",
            ));
        }

        Ok(())
    }
}

/// Builder for HooksConfig
pub struct HooksConfigBuilder {
    config: HooksConfig,
}

impl HooksConfigBuilder {
    /// Create a new builder rooted at `vault_root`
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        Self {
            config: HooksConfig {
                vault_root: vault_root.into(),
                ..HooksConfig::default()
            },
        }
    }

    /// Set the graph output path (relative to the root)
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.graph.output_path = path.into();
        self
    }

    /// Set the transient directory (relative to the root)
    pub fn transient_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.graph.transient_dir = path.into();
        self
    }

    /// Set the missing-directory policy
    pub fn transient_dir_policy(mut self, policy: TransientDirPolicy) -> Self {
        self.config.graph.transient_dir_policy = policy;
        self
    }

    /// Exclude an additional directory or file name from scanning
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_paths.insert(name.into());
        self
    }

    /// Enable or disable graph generation
    pub fn graph_enabled(mut self, enabled: bool) -> Self {
        self.config.graph.enabled = enabled;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<HooksConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
