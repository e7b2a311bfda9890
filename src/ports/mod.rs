// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! Sources and stores are the outbound ports the accessor reads and writes
//! through; parsers and watchers are the seams for file formats and change
//! detection. Adapters implement them.

pub mod parser;
pub mod source;
pub mod store;
pub mod watcher;

pub use parser::ConfigParser;
pub use source::ConfigSource;
pub use store::ConfigStore;
pub use watcher::{ChangeCallback, ConfigWatcher};
