// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer: keys, values, errors, and the accessor contract.
//!
//! Nothing in here knows where configuration comes from.

pub mod accessor;
pub mod config_key;
pub mod config_value;
pub mod errors;

pub use accessor::ConfigAccessor;
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Result};
