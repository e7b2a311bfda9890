// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dot-delimited configuration keys.
//!
//! A [`ConfigKey`] names one entry in the flat configuration namespace. The
//! dots only carry meaning for hierarchy queries (segments, parent, ancestor);
//! storage treats the whole string as the identity of the entry.

use crate::domain::errors::{ConfigError, Result};
use std::fmt;

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '.';

/// A type-safe wrapper for configuration keys.
///
/// Construction through `From` never fails, so adapters can carry whatever
/// their backing layer holds. [`ConfigKey::validate`] checks the well-formed
/// shape that the accessor requires at its boundary.
///
/// # Examples
///
/// ```
/// use sidecfg::domain::ConfigKey;
///
/// let key = ConfigKey::from("gotask.socket_address");
/// assert_eq!(key.segments().collect::<Vec<_>>(), vec!["gotask", "socket_address"]);
/// assert_eq!(key.parent(), Some(ConfigKey::from("gotask")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Creates a key and checks that it is well-formed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidecfg::domain::ConfigKey;
    ///
    /// assert!(ConfigKey::parse("gotask.socket_address").is_ok());
    /// assert!(ConfigKey::parse("gotask.").is_err());
    /// ```
    pub fn parse(key: impl Into<String>) -> Result<Self> {
        let key = ConfigKey(key.into());
        key.validate()?;
        Ok(key)
    }

    /// Checks that the key is non-empty and has no empty segments.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(ConfigError::InvalidKey {
                key: self.0.clone(),
                reason: "key is empty".to_string(),
            });
        }
        if self.0.split(KEY_SEPARATOR).any(str::is_empty) {
            return Err(ConfigError::InvalidKey {
                key: self.0.clone(),
                reason: "key contains an empty segment".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterates over the dot-separated segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_SEPARATOR)
    }

    /// Returns the key with its last segment removed, or `None` for a
    /// single-segment key.
    pub fn parent(&self) -> Option<ConfigKey> {
        self.0
            .rsplit_once(KEY_SEPARATOR)
            .map(|(parent, _)| ConfigKey::from(parent))
    }

    /// Returns `true` if `self` is a strict ancestor of `other`.
    ///
    /// `gotask` is an ancestor of `gotask.socket_address` but not of
    /// `gotasks.socket_address`.
    pub fn is_ancestor_of(&self, other: &ConfigKey) -> bool {
        other
            .0
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with(KEY_SEPARATOR))
    }

    /// Appends `child` to this key as a new trailing segment path.
    pub fn join(&self, child: &str) -> ConfigKey {
        ConfigKey(format!("{}{}{}", self.0, KEY_SEPARATOR, child))
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
