// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line override layer.
//!
//! Overrides come either from raw argument lists (`--key=value`,
//! `--key value`, `-k value`) or from already-split pairs, which is what the
//! `sidecar` binary hands over after clap has parsed its `--set` flags.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;

/// Read-only layer of command-line overrides, priority 3.
///
/// # Examples
///
/// ```rust
/// use sidecfg::adapters::CommandLineAdapter;
/// use sidecfg::ports::ConfigSource;
///
/// let adapter = CommandLineAdapter::from_args(vec!["--gotask.socket_address=/tmp/g.sock"]);
/// assert!(adapter.get_str("gotask.socket_address").unwrap().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    values: HashMap<String, String>,
}

impl CommandLineAdapter {
    /// Creates an adapter with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses overrides out of an argument list; non-flag arguments are ignored.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut adapter = Self::new();
        adapter.parse_args(&args);
        adapter
    }

    /// Parses the process arguments, skipping the program name.
    pub fn from_env_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(args)
    }

    /// Creates an adapter from key-value pairs. Later pairs win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();
            let next: Option<&str> = args.get(i + 1).map(|s| s.as_ref());

            let flag = match arg.strip_prefix("--") {
                Some(long) => Some(long),
                None => arg.strip_prefix('-').filter(|short| short.chars().count() == 1),
            };

            let Some(flag) = flag.filter(|f| !f.is_empty()) else {
                i += 1;
                continue;
            };

            if let Some((key, value)) = flag.split_once('=').filter(|_| arg.starts_with("--")) {
                self.values.insert(key.to_string(), value.to_string());
                i += 1;
                continue;
            }

            // a following flag is not a value
            match next.filter(|value| !value.starts_with('-')) {
                Some(value) => {
                    self.values.insert(flag.to_string(), value.to_string());
                    i += 2;
                }
                None => i += 1,
            }
        }
    }
}

impl ConfigSource for CommandLineAdapter {
    fn name(&self) -> &str {
        "cli"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }

    fn reload(&mut self) -> Result<()> {
        // arguments are fixed for the life of the process
        Ok(())
    }
}
