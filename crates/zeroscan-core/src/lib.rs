//! ZEROScan Core - Shared types for the ZEROScan console and plugin manager.
//!
//! This crate provides:
//! - The read-only plugin projections shown by the console ([`PluginSummary`],
//!   [`PluginDetail`], [`OptionSpec`], [`VulnRecord`])
//! - The [`PluginManager`] trait, the only seam between the console and the
//!   subsystem that owns plugins, options and the vulnerability database
//! - [`ManagerError`] for failures reported across that seam
//! - [`dirs::ZeroscanHome`] for the on-disk layout under `~/.zeroscan/`

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod dirs;

mod error;
mod manager;
mod types;

pub use error::{ManagerError, ManagerResult};
pub use manager::PluginManager;
pub use types::{
    ExecReport, INVALID_OPTION_PREFIX, OptionSpec, PluginDetail, PluginListing, PluginSummary,
    VulnRecord,
};

/// Framework version reported by the `version` command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
