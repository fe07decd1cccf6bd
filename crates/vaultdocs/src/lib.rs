//! # vaultdocs
//!
//! Build hooks for documentation sites whose sources live in an Obsidian
//! vault.
//!
//! - [`GraphBuilder`] renders the vault's link graph to
//!   `docs/assets/graph.html` and removes the renderer's `lib` staging
//!   directory
//! - [`ObsidianHooks`] wires the graph build into `on_pre_build` and the
//!   template filters into `on_env`
//! - [`BuildLifecycle`] is a small host that runs hooks in build order
//!
//! ## Quick Start
//!
//! ```no_run
//! use tera::Context;
//! use vaultdocs::prelude::*;
//!
//! # fn example() -> vaultdocs::Result<()> {
//! let config = HooksConfig::load(None, ".")?;
//! let mut lifecycle = BuildLifecycle::new(SiteConfig::new("."), Files::collect("docs".as_ref())?)
//!     .with_hook(ObsidianHooks::new(config));
//!
//! lifecycle.pre_build()?;
//! let page = lifecycle.render_str("{{ '2023-05-01' | convert_time }}", &Context::new())?;
//! assert_eq!(page, "01 May 2023");
//! # Ok(())
//! # }
//! ```

pub mod graph_builder;
pub mod hooks;
pub mod lifecycle;

pub use graph_builder::{GraphBuildReport, GraphBuilder};
pub use hooks::{BuildHook, Files, ObsidianHooks, SiteConfig};
pub use lifecycle::BuildLifecycle;
pub use vaultdocs_core::prelude::*;
pub use vaultdocs_filters::{FILTER_NAMES, setup_environment};

pub mod prelude {
    pub use crate::graph_builder::{GraphBuildReport, GraphBuilder};
    pub use crate::hooks::{BuildHook, Files, ObsidianHooks, SiteConfig};
    pub use crate::lifecycle::BuildLifecycle;
    pub use vaultdocs_core::prelude::*;
}
