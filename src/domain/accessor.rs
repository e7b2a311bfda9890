// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration accessor trait definition.
//!
//! [`ConfigAccessor`] is the inbound port of the crate: the three operations a
//! consumer performs against the configuration namespace. Implementations
//! decide where values come from; the contract only fixes how absence and
//! faults are reported.

use crate::domain::{ConfigKey, ConfigValue, Result};
use std::sync::Arc;

/// Get/set/has access to a namespace of dot-delimited keys.
///
/// # Contract
///
/// - [`get`](ConfigAccessor::get) returns the caller's default when the key is
///   absent. It only fails on access faults or a malformed key.
/// - [`set`](ConfigAccessor::set) creates or overwrites the value.
/// - [`has`](ConfigAccessor::has) reports presence without a default.
///
/// Methods take `&self` so one accessor can be shared across threads.
///
/// # Examples
///
/// ```rust
/// use sidecfg::domain::{ConfigAccessor, ConfigKey, ConfigValue, Result};
/// use std::collections::HashMap;
/// use std::sync::Mutex;
///
/// struct MapAccessor(Mutex<HashMap<String, String>>);
///
/// impl ConfigAccessor for MapAccessor {
///     fn get(&self, key: &ConfigKey, default: &str) -> Result<ConfigValue> {
///         let map = self.0.lock().unwrap();
///         Ok(ConfigValue::from(map.get(key.as_str()).map(String::as_str).unwrap_or(default)))
///     }
///
///     fn set(&self, key: &ConfigKey, value: ConfigValue) -> Result<()> {
///         self.0.lock().unwrap().insert(key.to_string(), value.into_string());
///         Ok(())
///     }
///
///     fn has(&self, key: &ConfigKey) -> Result<bool> {
///         Ok(self.0.lock().unwrap().contains_key(key.as_str()))
///     }
/// }
///
/// let accessor = MapAccessor(Mutex::new(HashMap::new()));
/// assert_eq!(accessor.get_str("gotask.non_exist", "default").unwrap(), "default");
/// accessor.set_str("gotask.non_exist", "exist").unwrap();
/// assert!(accessor.has_str("gotask.non_exist").unwrap());
/// ```
pub trait ConfigAccessor: Send + Sync {
    /// Returns the value stored under `key`, or `default` if there is none.
    fn get(&self, key: &ConfigKey, default: &str) -> Result<ConfigValue>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &ConfigKey, value: ConfigValue) -> Result<()>;

    /// Returns whether `key` currently has a value.
    fn has(&self, key: &ConfigKey) -> Result<bool>;

    /// String form of [`get`](ConfigAccessor::get).
    fn get_str(&self, key: &str, default: &str) -> Result<String> {
        self.get(&ConfigKey::from(key), default)
            .map(ConfigValue::into_string)
    }

    /// String form of [`set`](ConfigAccessor::set).
    fn set_str(&self, key: &str, value: &str) -> Result<()> {
        self.set(&ConfigKey::from(key), ConfigValue::from(value))
    }

    /// String form of [`has`](ConfigAccessor::has).
    fn has_str(&self, key: &str) -> Result<bool> {
        self.has(&ConfigKey::from(key))
    }
}

impl<A: ConfigAccessor + ?Sized> ConfigAccessor for &A {
    fn get(&self, key: &ConfigKey, default: &str) -> Result<ConfigValue> {
        (**self).get(key, default)
    }

    fn set(&self, key: &ConfigKey, value: ConfigValue) -> Result<()> {
        (**self).set(key, value)
    }

    fn has(&self, key: &ConfigKey) -> Result<bool> {
        (**self).has(key)
    }
}

impl<A: ConfigAccessor + ?Sized> ConfigAccessor for Arc<A> {
    fn get(&self, key: &ConfigKey, default: &str) -> Result<ConfigValue> {
        (**self).get(key, default)
    }

    fn set(&self, key: &ConfigKey, value: ConfigValue) -> Result<()> {
        (**self).set(key, value)
    }

    fn has(&self, key: &ConfigKey) -> Result<bool> {
        (**self).has(key)
    }
}
