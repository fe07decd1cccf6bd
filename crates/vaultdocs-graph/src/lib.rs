//! # Link Graph
//!
//! Link graph of vault notes built on petgraph, and its interactive HTML
//! rendering.
//!
//! ## Quick Start
//!
//! ```
//! use vaultdocs_graph::{LinkGraph, Network, NetworkOptions};
//!
//! let graph = LinkGraph::new();
//! let mut network = Network::new(NetworkOptions::default());
//! network.from_link_graph(&graph).unwrap();
//! assert!(network.generate_html().unwrap().contains("vis.Network"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: vault notes, plus phantom notes for link targets that have no
//!   file yet
//! - **Edges**: wikilinks, embeds and relative markdown links between notes
//! - **Network**: display-ready copy of the graph with fixed visual options
//!
//! ## Modules
//!
//! - [`graph`] - LinkGraph and link resolution
//! - [`network`] - HTML network rendering

pub mod graph;
pub mod network;

pub use graph::{GraphStats, LinkGraph, NoteNode};
pub use network::{Network, NetworkEdge, NetworkNode, NetworkOptions};
pub use vaultdocs_core::prelude::*;

pub mod prelude {
    pub use crate::graph::{GraphStats, LinkGraph, NoteNode};
    pub use crate::network::{Network, NetworkOptions};
    pub use vaultdocs_core::prelude::*;
}
