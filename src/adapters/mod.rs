// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the concrete configuration layers.
//!
//! The in-memory store is always available; the read-only layers and the file
//! watcher are gated behind their features.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
pub mod memory;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub mod watchers;

#[cfg(feature = "cli")]
pub use cli::CommandLineAdapter;
#[cfg(feature = "env")]
pub use env_var::{EnvVarAdapter, ENV_SEGMENT_SEPARATOR};
pub use memory::MemoryStore;
#[cfg(feature = "reload")]
pub use watchers::FileWatcher;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileAdapter, YamlParser};
