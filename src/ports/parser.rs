// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file format trait.

use crate::domain::Result;
use std::collections::{BTreeMap, HashMap};

/// Converts between a file format and the flat dot-key namespace.
///
/// Nested structures flatten with dots, so
///
/// ```yaml
/// gotask:
///   socket_address: /tmp/gotask.sock
/// ```
///
/// parses to `gotask.socket_address -> "/tmp/gotask.sock"`.
pub trait ConfigParser: Send + Sync {
    /// Parses file content into flat key-value pairs.
    fn parse(&self, content: &str) -> Result<HashMap<String, String>>;

    /// Renders flat key-value pairs back into the file format.
    ///
    /// Keys are written flat; re-parsing the output yields the same pairs.
    fn render(&self, values: &BTreeMap<String, String>) -> Result<String>;

    /// File extensions (without the dot) this format is read from.
    fn supported_extensions(&self) -> &[&str];

    /// Returns whether `path` carries one of the supported extensions.
    fn supports_path(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
            })
    }
}
