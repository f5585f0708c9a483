//! ZEROScan Test - Shared test utilities for the ZEROScan console.
//!
//! This crate provides a scriptable [`MockPluginManager`], an in-memory
//! [`CapturedOutput`] sink, and fixtures for plugin metadata. It is used as
//! a dev-dependency only.
//!
//! ```rust,ignore
//! use zeroscan_console::Console;
//! use zeroscan_test::{CapturedOutput, populated_manager};
//!
//! #[test]
//! fn test_list() {
//!     let out = CapturedOutput::new();
//!     let mut console = Console::with_output(populated_manager(), out.clone(), out.clone());
//!     console.execute("list").unwrap();
//!     assert!(out.contents().contains("wp-xmlrpc-brute"));
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod fixtures;
mod mocks;
mod output;

pub use fixtures::{
    populated_manager, test_option, test_plugin, test_plugin_dir, write_test_manifest,
};
pub use mocks::MockPluginManager;
pub use output::CapturedOutput;

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber with the given filter.
///
/// Later calls are no-ops.
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}
