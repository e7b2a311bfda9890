// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory writable configuration store.
//!
//! Values written through the accessor land here. They live for the lifetime
//! of the process and are never persisted.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigSource, ConfigStore};
use std::collections::HashMap;
use std::sync::RwLock;

/// Priority of the writable layer; above every read-only layer.
pub const MEMORY_STORE_PRIORITY: u8 = 4;

/// Writable layer backed by a `HashMap` behind an `RwLock`.
///
/// # Examples
///
/// ```rust
/// use sidecfg::adapters::MemoryStore;
/// use sidecfg::domain::{ConfigKey, ConfigValue};
/// use sidecfg::ports::{ConfigSource, ConfigStore};
///
/// let store = MemoryStore::new();
/// let key = ConfigKey::from("gotask.non_exist");
/// store.set(&key, ConfigValue::from("exist")).unwrap();
/// assert_eq!(store.get(&key).unwrap().unwrap().as_str(), "exist");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `values`.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, String>>> {
        self.values
            .read()
            .map_err(|_| ConfigError::poisoned("memory store"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.values
            .write()
            .map_err(|_| ConfigError::poisoned("memory store"))
    }
}

impl ConfigSource for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn priority(&self) -> u8 {
        MEMORY_STORE_PRIORITY
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .read()?
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .read()?
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }

    fn reload(&mut self) -> Result<()> {
        // runtime writes have no backing to refresh from
        Ok(())
    }
}

impl ConfigStore for MemoryStore {
    fn set(&self, key: &ConfigKey, value: ConfigValue) -> Result<()> {
        let previous = self
            .write()?
            .insert(key.as_str().to_string(), value.into_string());
        tracing::debug!(
            "Stored '{}' in memory store (overwrite={})",
            key,
            previous.is_some()
        );
        Ok(())
    }

    fn remove(&self, key: &ConfigKey) -> Result<bool> {
        Ok(self.write()?.remove(key.as_str()).is_some())
    }

    fn clear(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }
}
