// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration watcher trait definition.
//!
//! A [`ConfigWatcher`] observes something outside the process (a file, for
//! the built-in watcher) and reports that configuration may have changed.
//! The accessor reacts by reloading its sources on the next access.

use crate::domain::{ConfigKey, Result};
use std::sync::Arc;

/// Change notification callback.
///
/// Receives a key identifying what changed. For file watchers this is the
/// watched path rather than a configuration key.
pub type ChangeCallback = Arc<dyn Fn(ConfigKey) + Send + Sync>;

/// Watches a configuration backing for changes.
///
/// # Examples
///
/// ```rust
/// use sidecfg::ports::{ChangeCallback, ConfigWatcher};
/// use sidecfg::domain::Result;
///
/// struct NeverChanges;
///
/// impl ConfigWatcher for NeverChanges {
///     fn watch(&mut self, _callback: ChangeCallback) -> Result<()> {
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait ConfigWatcher: Send + Sync {
    /// Starts watching; `callback` runs on every detected change.
    ///
    /// The callback may run on a background thread and must not block.
    fn watch(&mut self, callback: ChangeCallback) -> Result<()>;

    /// Stops watching and releases any background resources.
    fn stop(&mut self) -> Result<()>;
}
