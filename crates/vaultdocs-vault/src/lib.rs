//! # vaultdocs Vault
//!
//! Discovers the notes of a vault on disk, parses them and assembles the
//! [`LinkGraph`](vaultdocs_graph::LinkGraph).
//!
//! ```no_run
//! use vaultdocs_vault::Vault;
//!
//! # fn example() -> vaultdocs_core::Result<()> {
//! let vault = Vault::at(".").connect()?.gather()?;
//! println!("{} notes", vault.files().len());
//! # Ok(())
//! # }
//! ```

pub mod vault;

pub use vault::Vault;
pub use vaultdocs_core::prelude::*;
