//! Graph artifact generation for the site build.
//!
//! Reads the vault, renders its link graph as an interactive HTML page and
//! removes the staging directory the renderer leaves behind.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use vaultdocs_core::prelude::*;
use vaultdocs_graph::{Network, NetworkOptions};
use vaultdocs_vault::Vault;

/// Outcome of one graph build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphBuildReport {
    pub nodes: usize,
    pub edges: usize,
    pub phantom_notes: usize,
    pub output_path: PathBuf,
    /// False when the HTML page could not be written
    pub written: bool,
    /// False when the staging directory was already gone
    pub transient_dir_removed: bool,
}

/// Builds `graph.html` from the vault under the configured root
pub struct GraphBuilder {
    config: HooksConfig,
}

impl GraphBuilder {
    pub fn new(config: &HooksConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &HooksConfig {
        &self.config
    }

    /// Parse the vault, save the graph page and clean up the staging directory.
    ///
    /// An I/O failure writing the page is logged and reported through
    /// [`GraphBuildReport::written`]. A missing staging directory at cleanup
    /// fails the build under [`TransientDirPolicy::Require`].
    pub fn build_graph(&self) -> Result<GraphBuildReport> {
        let root = &self.config.vault_root;
        log::info!("Generating vault graph for {}", root.display());

        let vault = Vault::new(&self.config).connect()?.gather()?;
        let graph = vault.graph();
        let stats = graph.stats();

        let mut network = Network::new(NetworkOptions::from(&self.config.graph))
            .with_lib_dir(self.config.transient_dir());
        network.from_link_graph(graph)?;

        let output_path = self.config.graph_output_path();
        let written = match network.save_graph(&output_path) {
            Ok(()) => true,
            Err(e) if e.is_io() => {
                log::warn!(
                    "Could not write graph to {}: {}",
                    output_path.display(),
                    e
                );
                false
            }
            Err(e) => return Err(e),
        };

        let transient_dir_removed = self.remove_transient_dir()?;

        let report = GraphBuildReport {
            nodes: network.nodes().len(),
            edges: network.edges().len(),
            phantom_notes: stats.phantom_notes,
            output_path,
            written,
            transient_dir_removed,
        };
        log::info!(
            "Vault graph: {} notes ({} phantom), {} links",
            report.nodes,
            report.phantom_notes,
            report.edges
        );
        Ok(report)
    }

    /// Delete the staging directory recursively.
    ///
    /// Returns whether anything was removed.
    pub fn remove_transient_dir(&self) -> Result<bool> {
        let dir = self.config.transient_dir();
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                log::debug!("Removed {}", dir.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match self.config.graph.transient_dir_policy {
                    TransientDirPolicy::Require => Err(Error::transient_dir_missing(dir)),
                    TransientDirPolicy::IgnoreMissing => {
                        log::debug!("{} already absent", dir.display());
                        Ok(false)
                    }
                }
            }
            Err(e) => Err(Error::io(e)),
        }
    }
}
