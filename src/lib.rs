// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture configuration accessor for sidecar processes.
//!
//! This crate gives a process get/set/has access to a namespace of
//! dot-delimited keys such as `gotask.socket_address`. Values are seeded from
//! YAML files, environment variables and command-line overrides, and can be
//! written at runtime.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and the accessor contract (`ConfigKey`, `ConfigValue`, `ConfigAccessor`, errors)
//! - **Ports**: Trait definitions for the backings (`ConfigSource`, `ConfigStore`, `ConfigParser`, `ConfigWatcher`)
//! - **Adapters**: The in-memory store plus env vars, YAML files, CLI arguments and file watching
//! - **Service**: The layered accessor that orchestrates everything
//!
//! # Precedence
//!
//! Runtime writes beat command-line overrides, which beat environment
//! variables, which beat YAML files. A missing key yields the caller's default.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line argument support (default)
//! - `bin`: Build the `sidecar` binary (default)
//! - `reload`: Enable dynamic reloading with file watching
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use sidecfg::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let accessor = DefaultConfigAccessor::builder()
//!     .with_env_prefix("SIDECAR_")
//!     .build()?;
//!
//! let addr = accessor.get_str("gotask.socket_address", "127.0.0.1:6001")?;
//! accessor.set_str("gotask.non_exist", "exist")?;
//! assert!(accessor.has_str("gotask.non_exist")?);
//! # let _ = addr;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod global;
pub mod ports;
pub mod probe;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::MemoryStore;
    pub use crate::domain::{ConfigAccessor, ConfigError, ConfigKey, ConfigValue, Result};
    pub use crate::ports::{ConfigParser, ConfigSource, ConfigStore, ConfigWatcher};
    pub use crate::service::{ConfigAccessorBuilder, DefaultConfigAccessor, ScopedAccessor};

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLineAdapter;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarAdapter;
    #[cfg(feature = "reload")]
    pub use crate::adapters::FileWatcher;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileAdapter, YamlParser};
}
