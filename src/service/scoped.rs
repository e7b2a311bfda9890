// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespaced view over another accessor.

use crate::domain::{ConfigAccessor, ConfigKey, ConfigValue, Result};

/// Prefixes every key with a fixed namespace before delegating.
///
/// A component that owns the `gotask` subtree can be handed a scoped view and
/// ask for `socket_address` instead of `gotask.socket_address`.
///
/// # Examples
///
/// ```rust
/// use sidecfg::prelude::*;
/// use sidecfg::service::ScopedAccessor;
///
/// # fn main() -> Result<()> {
/// let accessor = DefaultConfigAccessor::new();
/// let gotask = ScopedAccessor::new(&accessor, "gotask")?;
///
/// gotask.set_str("non_exist", "exist")?;
/// assert_eq!(accessor.get_str("gotask.non_exist", "")?, "exist");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScopedAccessor<A> {
    namespace: ConfigKey,
    inner: A,
}

impl<A: ConfigAccessor> ScopedAccessor<A> {
    /// Wraps `inner`; `namespace` must itself be a well-formed key.
    pub fn new(inner: A, namespace: impl Into<String>) -> Result<Self> {
        Ok(Self {
            namespace: ConfigKey::parse(namespace)?,
            inner,
        })
    }

    /// The prefix applied to every key.
    pub fn namespace(&self) -> &ConfigKey {
        &self.namespace
    }

    /// The wrapped accessor.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    fn scoped(&self, key: &ConfigKey) -> Result<ConfigKey> {
        key.validate()?;
        Ok(self.namespace.join(key.as_str()))
    }
}

impl<A: ConfigAccessor> ConfigAccessor for ScopedAccessor<A> {
    fn get(&self, key: &ConfigKey, default: &str) -> Result<ConfigValue> {
        self.inner.get(&self.scoped(key)?, default)
    }

    fn set(&self, key: &ConfigKey, value: ConfigValue) -> Result<()> {
        self.inner.set(&self.scoped(key)?, value)
    }

    fn has(&self, key: &ConfigKey) -> Result<bool> {
        self.inner.has(&self.scoped(key)?)
    }
}
