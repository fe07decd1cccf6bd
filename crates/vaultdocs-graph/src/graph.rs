//! Link graph using petgraph for vault relationship analysis

use petgraph::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use vaultdocs_core::prelude::*;

/// Node index type for graph
type NodeIndex = petgraph::graph::NodeIndex;

/// A note in the graph. Phantom notes are link targets with no file yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteNode {
    pub name: String,
    pub path: Option<PathBuf>,
    /// Frontmatter `title`, when the note has one
    pub title: Option<String>,
}

impl NoteNode {
    fn file(path: &Path) -> Self {
        Self {
            name: note_name(path),
            path: Some(path.to_path_buf()),
            title: None,
        }
    }

    fn phantom(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: None,
            title: None,
        }
    }

    /// Whether the note has no backing file
    pub fn is_phantom(&self) -> bool {
        self.path.is_none()
    }

    /// Stable identifier: the relative path for files, the name for phantoms
    pub fn key(&self) -> String {
        match &self.path {
            Some(path) => path.to_string_lossy().replace('\\', "/"),
            None => self.name.clone(),
        }
    }
}

/// Link graph for analyzing vault relationships
pub struct LinkGraph {
    /// Directed graph: nodes are notes, edges are links
    graph: DiGraph<NoteNode, Link>,

    /// Lowercased file stem to node index
    file_index: HashMap<String, NodeIndex>,

    /// Lowercased alias to node index
    alias_index: HashMap<String, NodeIndex>,

    /// Relative path to node index
    path_index: HashMap<PathBuf, NodeIndex>,

    /// Lowercased unresolved target to phantom node index
    phantom_index: HashMap<String, NodeIndex>,
}

impl LinkGraph {
    /// Create a new link graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            file_index: HashMap::new(),
            alias_index: HashMap::new(),
            path_index: HashMap::new(),
            phantom_index: HashMap::new(),
        }
    }

    /// Add a file to the graph.
    ///
    /// A phantom note with the same name is promoted to this file so links
    /// recorded before the file was seen keep pointing at it.
    pub fn add_file(&mut self, file: &VaultFile) -> Result<()> {
        let path = file.path.clone();

        let node_idx = if let Some(&idx) = self.path_index.get(&path) {
            idx
        } else {
            let stem = note_name(&path).to_lowercase();
            let idx = match self.phantom_index.remove(&stem) {
                Some(idx) => {
                    self.graph[idx] = NoteNode::file(&path);
                    idx
                }
                None => self.graph.add_node(NoteNode::file(&path)),
            };
            self.path_index.insert(path.clone(), idx);
            self.file_index.entry(stem).or_insert(idx);
            idx
        };

        if let Some(fm) = &file.frontmatter {
            self.graph[node_idx].title = fm.title().map(str::to_string);
            for alias in fm.aliases() {
                self.alias_index.insert(alias.to_lowercase(), node_idx);
            }
        }

        Ok(())
    }

    /// Replace the outgoing edges of a file with its internal links.
    ///
    /// Targets that resolve to no file become phantom notes. Attachments,
    /// same-document anchors and external URLs are not graph edges.
    pub fn update_links(&mut self, file: &VaultFile) -> Result<()> {
        let source_idx = match self.path_index.get(&file.path) {
            Some(&idx) => idx,
            None => {
                self.add_file(file)?;
                self.path_index[&file.path]
            }
        };

        let outgoing: Vec<_> = self.graph.edges(source_idx).map(|e| e.id()).collect();
        for edge_id in outgoing {
            self.graph.remove_edge(edge_id);
        }

        for link in &file.links {
            if !link.type_.is_internal() || link.is_attachment() {
                continue;
            }
            let Some(target) = link.note_target() else {
                continue;
            };

            let resolved = self
                .resolve_relative(&file.path, target)
                .or_else(|| self.resolve_link(target));
            let target_idx = match resolved {
                Some(idx) => idx,
                None => self.phantom(target),
            };
            self.graph.add_edge(source_idx, target_idx, link.clone());
        }

        Ok(())
    }

    fn phantom(&mut self, target: &str) -> NodeIndex {
        let name = target.rsplit('/').next().unwrap_or(target);
        let key = name.to_lowercase();
        if let Some(&idx) = self.phantom_index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(NoteNode::phantom(name));
        self.phantom_index.insert(key, idx);
        idx
    }

    /// Resolve a target as a path relative to the linking note's directory
    /// (`../b`, `./sub/c`, `sibling`)
    fn resolve_relative(&self, source: &Path, target: &str) -> Option<NodeIndex> {
        let base = source.parent().unwrap_or_else(|| Path::new(""));
        let candidate = normalize_path(&base.join(format!("{}.md", target)))?;
        self.path_index.get(&candidate).copied()
    }

    /// Resolve a note target (fragment already stripped) to a node index
    fn resolve_link(&self, target: &str) -> Option<NodeIndex> {
        let clean_target = target.trim().to_lowercase();

        if let Some(&idx) = self.file_index.get(&clean_target) {
            return Some(idx);
        }

        if let Some(&idx) = self.alias_index.get(&clean_target) {
            return Some(idx);
        }

        // Path-like match (folder/Note): compare against the tail of each path
        let target_parts: Vec<&str> = clean_target.split('/').filter(|p| !p.is_empty()).collect();
        if target_parts.len() < 2 {
            return None;
        }

        self.path_index.iter().find_map(|(path, &idx)| {
            let stemmed = path.with_extension("");
            let path_parts: Vec<String> = stemmed
                .iter()
                .filter_map(|p| p.to_str())
                .map(str::to_lowercase)
                .collect();

            if path_parts.len() < target_parts.len() {
                return None;
            }
            let start = path_parts.len() - target_parts.len();
            path_parts[start..]
                .iter()
                .zip(&target_parts)
                .all(|(a, b)| a == b)
                .then_some(idx)
        })
    }

    /// All notes, in insertion order
    pub fn notes(&self) -> Vec<&NoteNode> {
        self.graph
            .node_indices()
            .map(|idx| &self.graph[idx])
            .collect()
    }

    /// All edges as (source, target, link)
    pub fn edges(&self) -> Vec<(&NoteNode, &NoteNode, &Link)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    &self.graph[edge.source()],
                    &self.graph[edge.target()],
                    edge.weight(),
                )
            })
            .collect()
    }

    /// Number of links in and out of a note
    pub fn degree(&self, path: &Path) -> usize {
        self.path_index
            .get(path)
            .map(|&idx| {
                self.graph.edges_directed(idx, Incoming).count()
                    + self.graph.edges_directed(idx, Outgoing).count()
            })
            .unwrap_or(0)
    }

    /// Find all orphaned notes (no incoming or outgoing links)
    pub fn orphaned_notes(&self) -> Vec<PathBuf> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_undirected(idx).next().is_none())
            .filter_map(|idx| self.graph[idx].path.clone())
            .collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let node_count = self.graph.node_count();
        let edge_count = self.graph.edge_count();
        let phantom_count = self.phantom_index.len();

        let file_count = node_count - phantom_count;
        let average_links_per_file = if file_count > 0 {
            edge_count as f64 / file_count as f64
        } else {
            0.0
        };

        GraphStats {
            total_files: file_count,
            phantom_notes: phantom_count,
            total_links: edge_count,
            orphaned_files: self.orphaned_notes().len(),
            average_links_per_file,
        }
    }

    /// Get node count (files and phantom notes)
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Lexically resolve `.` and `..`; `None` when the path climbs above the
/// vault root. A leading `/` means the vault root.
fn normalize_path(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::Prefix(_) => out.clear(),
        }
    }
    Some(out)
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub total_files: usize,
    pub phantom_notes: usize,
    pub total_links: usize,
    pub orphaned_files: usize,
    pub average_links_per_file: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_file(path: &str, links: Vec<&str>) -> VaultFile {
        let mut vault_file = VaultFile::new(PathBuf::from(path), String::new());
        vault_file.links = links
            .into_iter()
            .enumerate()
            .map(|(i, target)| {
                Link::new(
                    LinkType::WikiLink,
                    PathBuf::from(path),
                    target.to_string(),
                    SourcePosition::new(1, 1, i * 10, 10),
                )
            })
            .collect();
        vault_file
    }

    fn build(files: &[VaultFile]) -> LinkGraph {
        let mut graph = LinkGraph::new();
        for file in files {
            graph.add_file(file).unwrap();
        }
        for file in files {
            graph.update_links(file).unwrap();
        }
        graph
    }

    #[test]
    fn test_add_multiple_files() {
        let graph = build(&[
            create_test_file("note1.md", vec![]),
            create_test_file("note2.md", vec![]),
        ]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_update_links_resolves_case_insensitively() {
        let graph = build(&[
            create_test_file("Note1.md", vec![]),
            create_test_file("note2.md", vec!["note1#Intro"]),
        ]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.stats().phantom_notes, 0);
    }

    #[test]
    fn test_update_links_replaces_edges() {
        let mut graph = build(&[
            create_test_file("a.md", vec![]),
            create_test_file("b.md", vec!["a"]),
        ]);
        graph
            .update_links(&create_test_file("b.md", vec![]))
            .unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_folder_path_resolution() {
        let graph = build(&[
            create_test_file("docs/guide/setup.md", vec![]),
            create_test_file("index.md", vec!["guide/setup"]),
        ]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    fn markdown_link(source: &str, target: &str) -> Link {
        Link::new(
            LinkType::MarkdownLink,
            PathBuf::from(source),
            target.to_string(),
            SourcePosition::start(),
        )
    }

    #[test]
    fn test_relative_markdown_links_resolve_from_source_dir() {
        let mut a = create_test_file("notes/a.md", vec![]);
        a.links.push(markdown_link("notes/a.md", "../b.md"));
        a.links.push(markdown_link("notes/a.md", "sub/c.md#Intro"));
        a.links.push(markdown_link("notes/a.md", "../../outside.md"));

        let graph = build(&[
            create_test_file("b.md", vec![]),
            create_test_file("notes/sub/c.md", vec![]),
            a,
        ]);

        let names: Vec<_> = graph
            .notes()
            .iter()
            .map(|n| (n.name.clone(), n.is_phantom()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("b".to_string(), false),
                ("c".to_string(), false),
                ("a".to_string(), false),
                ("outside".to_string(), true),
            ]
        );
        assert_eq!(graph.stats().phantom_notes, 1);
        assert_eq!(graph.degree(Path::new("b.md")), 1);
        assert_eq!(graph.degree(Path::new("notes/sub/c.md")), 1);
    }

    #[test]
    fn test_relative_match_wins_over_same_stem_elsewhere() {
        let mut a = create_test_file("guide/a.md", vec![]);
        a.links.push(markdown_link("guide/a.md", "setup.md"));

        let graph = build(&[
            create_test_file("setup.md", vec![]),
            create_test_file("guide/setup.md", vec![]),
            a,
        ]);
        assert_eq!(graph.degree(Path::new("guide/setup.md")), 1);
        assert_eq!(graph.degree(Path::new("setup.md")), 0);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("notes/./../b.md")),
            Some(PathBuf::from("b.md"))
        );
        assert_eq!(normalize_path(Path::new("../b.md")), None);
        assert_eq!(
            normalize_path(&Path::new("notes").join("/docs/x.md")),
            Some(PathBuf::from("docs/x.md"))
        );
    }

    #[test]
    fn test_frontmatter_title_on_node() {
        let mut home = create_test_file("home.md", vec![]);
        let mut fm = Frontmatter::default();
        fm.data
            .insert("title".to_string(), serde_json::json!("Welcome"));
        home.frontmatter = Some(fm);

        let graph = build(&[home]);
        assert_eq!(graph.notes()[0].title.as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_alias_resolution() {
        let mut home = create_test_file("home.md", vec![]);
        let mut fm = Frontmatter::default();
        fm.data
            .insert("aliases".to_string(), serde_json::json!(["Start Here"]));
        home.frontmatter = Some(fm);

        let graph = build(&[home, create_test_file("other.md", vec!["start here"])]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_unresolved_target_becomes_phantom() {
        let graph = build(&[
            create_test_file("a.md", vec!["Missing", "missing"]),
            create_test_file("b.md", vec!["folder/Missing"]),
        ]);
        let phantoms: Vec<_> = graph.notes().into_iter().filter(|n| n.is_phantom()).collect();
        assert_eq!(phantoms.len(), 1);
        assert_eq!(phantoms[0].name, "Missing");
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_phantom_promoted_when_file_added() {
        let mut graph = LinkGraph::new();
        let a = create_test_file("a.md", vec!["later"]);
        graph.add_file(&a).unwrap();
        graph.update_links(&a).unwrap();
        assert_eq!(graph.stats().phantom_notes, 1);

        graph.add_file(&create_test_file("later.md", vec![])).unwrap();
        assert_eq!(graph.stats().phantom_notes, 0);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.degree(Path::new("later.md")), 1);
    }

    #[test]
    fn test_attachments_and_external_links_skipped() {
        let mut file = create_test_file("a.md", vec!["diagram.png"]);
        file.links.push(Link::new(
            LinkType::ExternalLink,
            PathBuf::from("a.md"),
            "https://example.com".to_string(),
            SourcePosition::start(),
        ));
        let graph = build(&[file]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_orphaned_notes_and_stats() {
        let graph = build(&[
            create_test_file("orphan.md", vec![]),
            create_test_file("note1.md", vec![]),
            create_test_file("note2.md", vec!["note1"]),
        ]);

        assert_eq!(graph.orphaned_notes(), vec![PathBuf::from("orphan.md")]);
        let stats = graph.stats();
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_links, 1);
        assert_eq!(stats.orphaned_files, 1);
    }
}
