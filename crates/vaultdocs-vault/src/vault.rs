//! Vault scanning and gathering

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use vaultdocs_core::prelude::*;
use vaultdocs_graph::LinkGraph;
use vaultdocs_parser::Parser;
use walkdir::{DirEntry, WalkDir};

/// A vault rooted at a directory.
///
/// Usage follows two explicit steps: [`Vault::connect`] discovers note files,
/// [`Vault::gather`] reads and parses them and builds the link graph.
pub struct Vault {
    root: PathBuf,
    excluded: HashSet<String>,
    extensions: HashSet<String>,
    max_file_size: u64,
    parser: Parser,
    note_paths: Vec<PathBuf>,
    files: Vec<VaultFile>,
    graph: LinkGraph,
}

impl Vault {
    /// Create a vault from hook configuration
    pub fn new(config: &HooksConfig) -> Self {
        Self {
            root: config.vault_root.clone(),
            excluded: config.excluded_paths.clone(),
            extensions: config.allowed_extensions.clone(),
            max_file_size: config.max_file_size,
            parser: Parser::new(config.vault_root.clone()),
            note_paths: Vec::new(),
            files: Vec::new(),
            graph: LinkGraph::new(),
        }
    }

    /// Vault with default scanning rules
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let config = HooksConfig {
            vault_root: root.into(),
            ..HooksConfig::default()
        };
        Self::new(&config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover note files below the root.
    ///
    /// Hidden entries and excluded top-level names are skipped along with
    /// their subtrees.
    pub fn connect(mut self) -> Result<Self> {
        if !self.root.is_dir() {
            return Err(Error::file_not_found(&self.root));
        }

        let mut paths = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_skipped(entry));

        for entry in walker {
            let entry = entry.map_err(|e| Error::other(format!("Failed to scan vault: {}", e)))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let allowed = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()));
            if !allowed {
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > self.max_file_size {
                log::warn!(
                    "Skipping {} ({} bytes, max {} bytes)",
                    path.display(),
                    size,
                    self.max_file_size
                );
                continue;
            }

            paths.push(path.to_path_buf());
        }

        log::info!("Found {} notes in {}", paths.len(), self.root.display());
        self.note_paths = paths;
        Ok(self)
    }

    /// Hidden entries are skipped at any depth; excluded names only directly
    /// under the root, so `code/lib/` stays part of the vault.
    fn is_skipped(&self, entry: &DirEntry) -> bool {
        entry.file_name().to_str().is_some_and(|name| {
            name.starts_with('.') || (entry.depth() == 1 && self.excluded.contains(name))
        })
    }

    /// Read and parse every discovered note, then build the link graph.
    ///
    /// Unreadable or unparsable notes are logged and left out.
    pub fn gather(mut self) -> Result<Self> {
        let mut files = Vec::with_capacity(self.note_paths.len());

        for path in &self.note_paths {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Failed to read {}: {}", path.display(), e);
                    continue;
                }
            };

            match self.parser.parse_file(path, &content) {
                Ok(file) => {
                    log::debug!(
                        "Parsed {}: {} links extracted",
                        file.path.display(),
                        file.links.len()
                    );
                    files.push(file);
                }
                Err(e) => log::warn!("Failed to parse {}: {}", path.display(), e),
            }
        }

        let mut graph = LinkGraph::new();
        for file in &files {
            graph.add_file(file)?;
        }
        for file in &files {
            graph.update_links(file)?;
        }

        log::info!(
            "Vault gathered: {} notes, {} links",
            graph.node_count(),
            graph.edge_count()
        );

        self.files = files;
        self.graph = graph;
        Ok(self)
    }

    /// Paths found by [`Vault::connect`]
    pub fn note_paths(&self) -> &[PathBuf] {
        &self.note_paths
    }

    /// Notes parsed by [`Vault::gather`]
    pub fn files(&self) -> &[VaultFile] {
        &self.files
    }

    /// Link graph built by [`Vault::gather`]
    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    pub fn into_graph(self) -> LinkGraph {
        self.graph
    }
}
