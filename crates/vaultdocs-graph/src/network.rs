//! Interactive network rendering for the link graph.
//!
//! A [`Network`] is the visual counterpart of a [`LinkGraph`]: nodes with
//! labels and tooltips, edges, and a fixed set of display options. It renders
//! to a single HTML document driven by vis-network.
//!
//! Saving also stages the renderer's asset bundle into a `lib` directory next
//! to the build root, the layout hosts expect when serving assets locally.
//! The hook layer removes that directory once the build no longer needs it.

use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use vaultdocs_core::prelude::*;

use crate::graph::LinkGraph;

const GRAPH_TEMPLATE: &str = include_str!("../templates/graph.html");
const UTILS_JS: &str = include_str!("../templates/utils.js");

/// vis-network build referenced by the generated page
pub const VIS_NETWORK_URL: &str =
    "https://unpkg.com/vis-network@9.1.2/standalone/umd/vis-network.min.js";

const NOTE_COLOR: &str = "#97c2fc";
const PHANTOM_COLOR: &str = "#d3d3d3";
const NODE_SIZE: u32 = 10;

/// Display options for the rendered network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkOptions {
    pub height: String,
    pub width: String,
    pub font_color: String,
    pub bgcolor: String,
    pub directed: bool,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self::from(&GraphConfig::default())
    }
}

impl From<&GraphConfig> for NetworkOptions {
    fn from(config: &GraphConfig) -> Self {
        Self {
            height: config.height.clone(),
            width: config.width.clone(),
            font_color: config.font_color.clone(),
            bgcolor: config.bgcolor.clone(),
            directed: config.directed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub color: String,
    pub shape: &'static str,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Visual network ready to be written as HTML
#[derive(Debug, Clone)]
pub struct Network {
    options: NetworkOptions,
    nodes: Vec<NetworkNode>,
    edges: Vec<NetworkEdge>,
    node_ids: HashMap<String, usize>,
    lib_dir: PathBuf,
}

impl Network {
    /// Create an empty network; assets stage into `./lib`
    pub fn new(options: NetworkOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_ids: HashMap::new(),
            lib_dir: PathBuf::from("lib"),
        }
    }

    /// Stage assets into `dir` instead of `./lib`
    pub fn with_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lib_dir = dir.into();
        self
    }

    pub fn lib_dir(&self) -> &Path {
        &self.lib_dir
    }

    /// Add a node; re-adding an existing id updates it in place
    pub fn add_node(&mut self, id: impl Into<String>, label: impl Into<String>, title: impl Into<String>) {
        let node = NetworkNode {
            id: id.into(),
            label: label.into(),
            title: title.into(),
            color: NOTE_COLOR.to_string(),
            shape: "dot",
            size: NODE_SIZE,
        };

        match self.node_ids.get(&node.id) {
            Some(&pos) => self.nodes[pos] = node,
            None => {
                self.node_ids.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Add an edge between two existing nodes
    pub fn add_edge(&mut self, from: &str, to: &str, title: Option<String>) -> Result<()> {
        for id in [from, to] {
            if !self.node_ids.contains_key(id) {
                return Err(Error::other(format!("Edge endpoint is not a node: {}", id)));
            }
        }
        self.edges.push(NetworkEdge {
            from: from.to_string(),
            to: to.to_string(),
            title,
        });
        Ok(())
    }

    /// Copy every note and link of a [`LinkGraph`] into this network
    pub fn from_link_graph(&mut self, graph: &LinkGraph) -> Result<()> {
        for note in graph.notes() {
            let title = match (&note.path, &note.title) {
                (Some(path), Some(title)) => format!(
                    "{}: {} ({} links)",
                    title,
                    path.to_string_lossy(),
                    graph.degree(path)
                ),
                (Some(path), None) => format!(
                    "{} ({} links)",
                    path.to_string_lossy(),
                    graph.degree(path)
                ),
                (None, _) => format!("{} (not created yet)", note.name),
            };
            self.add_node(note.key(), note.name.clone(), title);
            if note.is_phantom()
                && let Some(&pos) = self.node_ids.get(&note.key())
            {
                self.nodes[pos].color = PHANTOM_COLOR.to_string();
            }
        }

        for (source, target, link) in graph.edges() {
            self.add_edge(&source.key(), &target.key(), link.display_text.clone())?;
        }

        log::debug!(
            "Network built: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
        Ok(())
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[NetworkEdge] {
        &self.edges
    }

    fn options_json(&self) -> serde_json::Value {
        json!({
            "nodes": {
                "shape": "dot",
                "font": { "color": self.options.font_color }
            },
            "edges": {
                "arrows": { "to": { "enabled": self.options.directed } },
                "color": { "inherit": true },
                "smooth": { "enabled": true, "type": "dynamic" }
            },
            "interaction": { "hover": true },
            "physics": {
                "enabled": true,
                "stabilization": { "enabled": true, "iterations": 1000 }
            }
        })
    }

    /// Render the self-contained HTML document
    pub fn generate_html(&self) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("title", "Vault graph");
        context.insert("vis_js_url", VIS_NETWORK_URL);
        context.insert("height", &self.options.height);
        context.insert("width", &self.options.width);
        context.insert("bgcolor", &self.options.bgcolor);
        context.insert("utils_js", UTILS_JS);
        context.insert("nodes_json", &script_json(&self.nodes)?);
        context.insert("edges_json", &script_json(&self.edges)?);
        context.insert("options_json", &script_json(&self.options_json())?);

        tera::Tera::one_off(GRAPH_TEMPLATE, &context, false)
            .map_err(|e| Error::template(format!("Failed to render graph page: {}", e)))
    }

    /// Stage the asset bundle into the lib directory
    pub fn write_assets(&self) -> Result<()> {
        let bindings = self.lib_dir.join("bindings");
        fs::create_dir_all(&bindings)?;
        fs::write(bindings.join("utils.js"), UTILS_JS)?;
        fs::write(
            self.lib_dir.join("vis-network.url"),
            format!("{}\n", VIS_NETWORK_URL),
        )?;
        Ok(())
    }

    /// Stage assets, then write the HTML document to `path`.
    ///
    /// The parent directory of `path` is not created; a missing one surfaces
    /// as [`Error::Io`] after the assets are already staged.
    pub fn save_graph(&self, path: &Path) -> Result<()> {
        self.write_assets()?;
        let html = self.generate_html()?;
        fs::write(path, html)?;
        log::debug!("Graph page written to {}", path.display());
        Ok(())
    }
}

/// Serialize for embedding inside a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let raw = serde_json::to_string(value)
        .map_err(|e| Error::other(format!("Failed to serialize network: {}", e)))?;
    Ok(raw.replace("</", "<\\/"))
}
