// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration layer.
//!
//! Variable names map onto dot keys: an optional prefix is stripped, the name
//! is optionally lowercased, and underscores become dots. With the prefix
//! `APP_` and lowercasing on, `APP_GOTASK_WORKERS` is read as `gotask.workers`.
//!
//! Keys whose segments contain underscores need a segment separator: with
//! [`ENV_SEGMENT_SEPARATOR`] set, `GOTASK__SOCKET_ADDRESS` is read as
//! `gotask.socket_address` and single underscores are kept.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

/// Separator used by the accessor builder to split variable names into
/// segments.
pub const ENV_SEGMENT_SEPARATOR: &str = "__";

/// Maximum length for environment variable keys.
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (1 MiB).
const MAX_ENV_VALUE_LEN: usize = 1024 * 1024;

/// Read-only layer over the process environment, priority 2.
///
/// The environment is snapshotted lazily on first access and again after each
/// [`reload`](ConfigSource::reload).
///
/// # Examples
///
/// ```rust
/// use sidecfg::adapters::EnvVarAdapter;
///
/// let adapter = EnvVarAdapter::with_prefix("SIDECAR_").lowercase_keys(true);
/// ```
#[derive(Debug)]
pub struct EnvVarAdapter {
    prefix: Option<String>,
    lowercase_keys: bool,
    replace_underscores: bool,
    /// Replaces `replace_underscores` when set.
    segment_separator: Option<String>,
    /// `None` until the first lookup, and again after a reload.
    snapshot: RwLock<Option<HashMap<String, String>>>,
    /// Fixed values never re-read from the process environment.
    fixed: bool,
}

impl EnvVarAdapter {
    /// Reads every environment variable, replacing underscores with dots.
    pub fn new() -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: true,
            segment_separator: None,
            snapshot: RwLock::new(None),
            fixed: false,
        }
    }

    /// Reads only variables starting with `prefix`; the prefix is stripped.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Lowercases variable names before mapping them to keys.
    pub fn lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    /// Controls the `_` to `.` replacement (on by default).
    pub fn replace_underscores(mut self, enabled: bool) -> Self {
        self.replace_underscores = enabled;
        self
    }

    /// Splits names on `separator` instead of on every underscore.
    ///
    /// Single underscores then stay inside a segment.
    pub fn segment_separator(mut self, separator: impl Into<String>) -> Self {
        self.segment_separator = Some(separator.into()).filter(|s| !s.is_empty());
        self
    }

    /// Creates an adapter over fixed, already-mapped values.
    ///
    /// Intended for tests: nothing is read from the process environment, and
    /// reloading keeps the values.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: false,
            segment_separator: None,
            snapshot: RwLock::new(Some(values)),
            fixed: true,
        }
    }

    /// Maps a variable name to a key, or `None` if the prefix filter rejects it.
    fn map_name(&self, name: &str) -> Option<String> {
        let name = match &self.prefix {
            Some(prefix) => name.strip_prefix(prefix.as_str())?,
            None => name,
        };

        let mut key = name.to_string();
        if self.lowercase_keys {
            key = key.to_lowercase();
        }
        match &self.segment_separator {
            Some(separator) => key = key.replace(separator.as_str(), "."),
            None if self.replace_underscores => key = key.replace('_', "."),
            None => {}
        }
        Some(key)
    }

    fn load(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();

        for (name, value) in env::vars() {
            if name.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={}",
                    name.len(),
                    value.len()
                );
                continue;
            }

            if let Some(key) = self.map_name(&name) {
                values.insert(key, value);
            }
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?}, lowercase={}, replace_underscores={}, separator={:?})",
            values.len(),
            self.prefix,
            self.lowercase_keys,
            self.replace_underscores,
            self.segment_separator
        );

        values
    }

    /// Runs `f` against the snapshot, taking one first if needed.
    fn with_snapshot<T>(&self, f: impl FnOnce(&HashMap<String, String>) -> T) -> Result<T> {
        {
            let guard = self
                .snapshot
                .read()
                .map_err(|_| ConfigError::poisoned("environment snapshot"))?;
            if let Some(values) = guard.as_ref() {
                return Ok(f(values));
            }
        }

        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| ConfigError::poisoned("environment snapshot"))?;
        let values = guard.get_or_insert_with(|| self.load());
        Ok(f(values))
    }
}

impl Default for EnvVarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        self.with_snapshot(|values| {
            values
                .get(key.as_str())
                .map(|v| ConfigValue::from(v.as_str()))
        })
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        self.with_snapshot(|values| values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }

    fn reload(&mut self) -> Result<()> {
        if self.fixed {
            return Ok(());
        }
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| ConfigError::poisoned("environment snapshot"))?;
        *guard = None;
        Ok(())
    }
}
