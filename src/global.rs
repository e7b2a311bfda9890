// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide accessor.
//!
//! Code that cannot have an accessor passed in reads configuration through
//! these free functions. The accessor is installed once at startup; if nothing
//! was installed, the first use builds one over the environment.

use crate::domain::{ConfigAccessor, ConfigError, Result};
use crate::service::DefaultConfigAccessor;
use once_cell::sync::OnceCell;
use std::sync::Arc;

static ACCESSOR: OnceCell<Arc<dyn ConfigAccessor>> = OnceCell::new();

/// Installs the process-wide accessor.
///
/// Fails with [`ConfigError::AlreadyInitialized`] if an accessor was already
/// installed or lazily created.
///
/// # Examples
///
/// ```rust
/// use sidecfg::global;
/// use sidecfg::service::DefaultConfigAccessor;
/// use std::sync::Arc;
///
/// global::install(Arc::new(DefaultConfigAccessor::new())).unwrap();
/// global::set("gotask.non_exist", "exist").unwrap();
/// assert!(global::has("gotask.non_exist").unwrap());
/// assert!(global::install(Arc::new(DefaultConfigAccessor::new())).is_err());
/// ```
pub fn install(accessor: Arc<dyn ConfigAccessor>) -> Result<()> {
    ACCESSOR
        .set(accessor)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    tracing::debug!("Installed global configuration accessor");
    Ok(())
}

/// Returns the process-wide accessor, creating the default one if needed.
pub fn accessor() -> Result<Arc<dyn ConfigAccessor>> {
    ACCESSOR.get_or_try_init(default_accessor).cloned()
}

/// Returns `true` once an accessor has been installed or created.
pub fn is_initialized() -> bool {
    ACCESSOR.get().is_some()
}

/// [`ConfigAccessor::get`] on the process-wide accessor.
pub fn get(key: &str, default: &str) -> Result<String> {
    accessor()?.get_str(key, default)
}

/// [`ConfigAccessor::set`] on the process-wide accessor.
pub fn set(key: &str, value: &str) -> Result<()> {
    accessor()?.set_str(key, value)
}

/// [`ConfigAccessor::has`] on the process-wide accessor.
pub fn has(key: &str) -> Result<bool> {
    accessor()?.has_str(key)
}

fn default_accessor() -> Result<Arc<dyn ConfigAccessor>> {
    tracing::debug!("No global accessor installed, building one from the environment");
    let builder = DefaultConfigAccessor::builder();

    #[cfg(feature = "env")]
    let builder = builder.with_env_vars();

    Ok(Arc::new(builder.build()?))
}
