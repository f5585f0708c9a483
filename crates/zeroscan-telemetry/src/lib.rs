//! ZEROScan Telemetry - Logging for the ZEROScan console.
//!
//! Installs a global `tracing` subscriber from a [`LogConfig`]. Console output
//! (tables, prompts, errors shown to the operator) is not logging and does not
//! go through here.
//!
//! # Example
//!
//! ```rust,no_run
//! use zeroscan_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), zeroscan_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("zeroscan_plugins=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("console starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{FileRotation, LogConfig, LogFormat, LogTarget, setup_logging};
