// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! A [`ConfigSource`] is one read-only layer of the configuration namespace:
//! environment variables, a YAML file, command-line overrides. The accessor
//! stacks sources by priority and asks them in turn.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// A read-only layer of configuration values.
///
/// # Priority
///
/// Higher priority values take precedence over lower ones. The built-in
/// layers use:
///
/// - **4**: the writable in-memory store
/// - **3**: command-line overrides
/// - **2**: environment variables
/// - **1**: configuration files
///
/// # Examples
///
/// ```rust
/// use sidecfg::ports::ConfigSource;
/// use sidecfg::domain::{ConfigKey, ConfigValue, Result};
///
/// struct SocketDefaults;
///
/// impl ConfigSource for SocketDefaults {
///     fn name(&self) -> &str {
///         "socket-defaults"
///     }
///
///     fn priority(&self) -> u8 {
///         0
///     }
///
///     fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
///         Ok((key.as_str() == "gotask.socket_address")
///             .then(|| ConfigValue::from("/tmp/gotask.sock")))
///     }
///
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::from("gotask.socket_address")])
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let source = SocketDefaults;
/// assert!(source.contains(&ConfigKey::from("gotask.socket_address")).unwrap());
/// ```
pub trait ConfigSource: Send + Sync {
    /// Short identifier used in logs and errors, e.g. `"env"` or `"yaml-file"`.
    fn name(&self) -> &str;

    /// Precedence of this layer; higher wins.
    fn priority(&self) -> u8;

    /// Returns `Ok(Some(value))` if the key exists in this layer, `Ok(None)`
    /// if it does not, and `Err` if the layer could not be read.
    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Returns every key this layer currently holds.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Refreshes the layer from its backing storage.
    ///
    /// Layers that cannot change at runtime return `Ok(())`.
    fn reload(&mut self) -> Result<()>;

    /// Returns whether the key exists in this layer.
    fn contains(&self, key: &ConfigKey) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Convenience form of [`get`](ConfigSource::get) taking a string key.
    fn get_str(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.get(&ConfigKey::from(key))
    }
}
