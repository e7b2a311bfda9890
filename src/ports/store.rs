// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writable configuration layer.
//!
//! [`ConfigStore`] is the one layer that accepts writes. It is also a
//! [`ConfigSource`], so the accessor reads it the same way as every other
//! layer, just first.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;

/// A configuration layer that accepts writes.
///
/// Writes go through `&self`; implementations guard their state internally so
/// a store can sit behind a shared accessor.
pub trait ConfigStore: ConfigSource {
    /// Stores `value` under `key`, creating or overwriting it.
    fn set(&self, key: &ConfigKey, value: ConfigValue) -> Result<()>;

    /// Removes `key`; returns `true` if a value was present.
    fn remove(&self, key: &ConfigKey) -> Result<bool>;

    /// Drops every stored value.
    fn clear(&self) -> Result<()>;
}
