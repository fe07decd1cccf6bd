//! Build hooks and the host-side values they receive

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tera::Tera;
use vaultdocs_core::prelude::*;
use walkdir::WalkDir;

use crate::graph_builder::GraphBuilder;

/// Host build configuration, passed through to hooks untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site_name: String,
    /// Site root; the working directory of the build
    pub root: PathBuf,
    pub docs_dir: PathBuf,
    /// Free-form host settings
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl SiteConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            site_name: String::new(),
            docs_dir: root.join("docs"),
            root,
            extra: HashMap::new(),
        }
    }
}

/// Source files of the site, relative to the docs directory
#[derive(Debug, Clone, Default)]
pub struct Files {
    paths: Vec<PathBuf>,
}

impl Files {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Collect every regular file below `docs_dir`; a missing directory yields
    /// an empty set.
    pub fn collect(docs_dir: &Path) -> Result<Self> {
        if !docs_dir.is_dir() {
            log::debug!("No docs directory at {}", docs_dir.display());
            return Ok(Self::default());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(docs_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::other(format!("Failed to walk docs: {}", e)))?;
            if entry.file_type().is_file()
                && let Ok(relative) = entry.path().strip_prefix(docs_dir)
            {
                paths.push(relative.to_path_buf());
            }
        }
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Extension points of the site build
pub trait BuildHook {
    /// Runs once before anything is built
    fn on_pre_build(&self, _config: &SiteConfig) -> Result<()> {
        Ok(())
    }

    /// Receives the template environment and returns it, possibly extended
    fn on_env(&self, env: Tera, _config: &SiteConfig, _files: &Files) -> Result<Tera> {
        Ok(env)
    }
}

/// Obsidian vault hooks: graph page before the build, template filters in
/// the environment
pub struct ObsidianHooks {
    config: HooksConfig,
}

impl ObsidianHooks {
    pub fn new(config: HooksConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HooksConfig {
        &self.config
    }
}

impl BuildHook for ObsidianHooks {
    fn on_pre_build(&self, _config: &SiteConfig) -> Result<()> {
        if !self.config.graph.enabled {
            log::info!("Vault graph disabled");
            return Ok(());
        }
        GraphBuilder::new(&self.config).build_graph()?;
        Ok(())
    }

    fn on_env(&self, mut env: Tera, _config: &SiteConfig, _files: &Files) -> Result<Tera> {
        vaultdocs_filters::setup_environment(&mut env);
        Ok(env)
    }
}
