// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the accessor implementations.
//!
//! [`DefaultConfigAccessor`] orchestrates the store and the read-only layers;
//! [`ScopedAccessor`] narrows any accessor to one namespace.

pub mod default_accessor;
pub mod scoped;

pub use default_accessor::{ConfigAccessorBuilder, DefaultConfigAccessor};
pub use scoped::ScopedAccessor;
