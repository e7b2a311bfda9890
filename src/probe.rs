// SPDX-License-Identifier: MIT OR Apache-2.0

//! Smoke sequence exercising get, set and has against an accessor.
//!
//! The sidecar binary runs this at startup to show what the accessor resolves.
//! The first failing call aborts the run.

use crate::domain::{ConfigAccessor, ConfigKey, ConfigValue, Result};

/// Key expected to be seeded by the deployment.
pub const SOCKET_ADDRESS_KEY: &str = "gotask.socket_address";

/// Key expected to be absent until the probe writes it.
pub const NON_EXIST_KEY: &str = "gotask.non_exist";

/// Results of one probe run, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// `get("gotask.socket_address", "default")`
    pub socket_address: String,
    /// `get("gotask.non_exist", "default")` before the write
    pub non_exist_before: String,
    /// `get("gotask.non_exist", "")` after writing `"exist"`
    pub non_exist_after: String,
    /// `has("gotask.non_exist")` after the write
    pub has_non_exist: bool,
}

/// Runs the probe sequence, logging each result.
///
/// # Examples
///
/// ```rust
/// use sidecfg::probe;
/// use sidecfg::service::DefaultConfigAccessor;
///
/// let report = probe::run(&DefaultConfigAccessor::new()).unwrap();
/// assert_eq!(report.socket_address, "default");
/// assert_eq!(report.non_exist_after, "exist");
/// assert!(report.has_non_exist);
/// ```
pub fn run(accessor: &dyn ConfigAccessor) -> Result<ProbeReport> {
    let socket_key = ConfigKey::from(SOCKET_ADDRESS_KEY);
    let non_exist_key = ConfigKey::from(NON_EXIST_KEY);

    let socket_address = accessor.get(&socket_key, "default")?.into_string();
    tracing::info!("{} = {}", socket_key, socket_address);

    let non_exist_before = accessor.get(&non_exist_key, "default")?.into_string();
    tracing::info!("{} = {}", non_exist_key, non_exist_before);

    accessor.set(&non_exist_key, ConfigValue::from("exist"))?;
    tracing::info!("set {} = exist", non_exist_key);

    let non_exist_after = accessor.get(&non_exist_key, "")?.into_string();
    tracing::info!("{} = {}", non_exist_key, non_exist_after);

    let has_non_exist = accessor.has(&non_exist_key)?;
    tracing::info!("has {} = {}", non_exist_key, has_non_exist);

    Ok(ProbeReport {
        socket_address,
        non_exist_before,
        non_exist_after,
        has_non_exist,
    })
}
