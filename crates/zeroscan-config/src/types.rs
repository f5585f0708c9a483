//! Configuration types.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header yields a working setup.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt, export file and history settings.
    pub console: ConsoleSection,
    /// Where plugins and their database live.
    pub plugins: PluginsSection,
    /// Remote plugin index used by `update`.
    pub update: UpdateSection,
    /// Log level, format and per-crate directives.
    pub logging: LoggingSection,
}

/// Interactive console settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// Name shown at the start of the prompt.
    pub prompt_name: String,
    /// File that `vulns -o` appends to, relative to the working directory
    /// unless absolute.
    pub vulns_file: String,
    /// Whether line history is loaded and saved.
    pub history: bool,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            prompt_name: "ZEROScan".to_owned(),
            vulns_file: "vulns.txt".to_owned(),
            history: true,
        }
    }
}

/// Plugin discovery and database settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsSection {
    /// Extra plugin directories scanned after `~/.zeroscan/plugins/`.
    pub dirs: Vec<String>,
    /// Database file. Empty uses `~/.zeroscan/database.json`.
    pub database: String,
}

/// Remote plugin index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSection {
    /// URL of the JSON plugin index. Empty disables `update`.
    pub index_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UpdateSection {
    fn default() -> Self {
        Self {
            index_url: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"` or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["zeroscan_plugins=debug"]`).
    pub directives: Vec<String>,
    /// Write logs to `~/.zeroscan/logs/` instead of stderr.
    pub to_file: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            to_file: false,
        }
    }
}
