//! ZEROScan Plugins - the default plugin manager behind the console.
//!
//! Plugins are directories holding a `plugin.toml` manifest. The manifest
//! carries the metadata shown by `info`, the option table, and the command
//! that performs the check. [`LocalPluginManager`] implements
//! [`zeroscan_core::PluginManager`] on top of:
//!
//! - [`discovery`]: scanning plugin directories for manifests
//! - [`database`]: the JSON file holding the plugin index and findings
//! - [`runner`]: running a plugin's entry point as a child process
//! - [`update`]: fetching the remote plugin index and new manifests

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod database;
pub mod discovery;
pub mod manifest;
pub mod runner;
pub mod update;

mod manager;

pub use manager::{LocalPluginManager, ManagerSettings};
pub use manifest::{EntryPoint, ManifestOption, PluginManifest};
