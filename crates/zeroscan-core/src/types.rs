//! Read-only projections of plugin state exchanged with the console.

use serde::{Deserialize, Serialize};

/// Prefix of a `set` status string that denotes failure.
///
/// Plugin managers signal an unknown option with
/// [`ManagerError::InvalidOption`](crate::ManagerError::InvalidOption), whose
/// message starts with this prefix. Status strings carrying it are treated as
/// errors too.
pub const INVALID_OPTION_PREFIX: &str = "Invalid option:";

/// One row of `list` / `search` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSummary {
    /// Unique plugin name.
    pub name: String,
    /// Affected versions or components.
    pub scope: String,
    /// One-line description.
    pub description: String,
}

impl PluginSummary {
    /// Create a new summary.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        scope: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            scope: scope.into(),
            description: description.into(),
        }
    }
}

/// Full plugin metadata shown by `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDetail {
    /// Unique plugin name.
    pub name: String,
    /// Plugin author.
    pub author: String,
    /// Targeted CMS.
    pub cms: String,
    /// Affected versions or components.
    pub scope: String,
    /// Long description.
    pub description: String,
    /// Advisory or write-up URL.
    pub reference: String,
}

impl PluginDetail {
    /// Project the detail onto its summary columns.
    #[must_use]
    pub fn summary(&self) -> PluginSummary {
        PluginSummary::new(&self.name, &self.scope, &self.description)
    }
}

/// A configurable parameter of the selected plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option name, as typed after `set`.
    pub name: String,
    /// Current value (empty when unset).
    pub current_setting: String,
    /// Whether the plugin refuses to run while this option is empty.
    pub required: bool,
    /// One-line description.
    pub description: String,
}

/// A discovered vulnerability: which plugin found it and what it found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnRecord {
    /// Name of the plugin that reported the finding.
    pub plugin: String,
    /// Free-form finding text.
    pub vulnerability: String,
}

impl VulnRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(plugin: impl Into<String>, vulnerability: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            vulnerability: vulnerability.into(),
        }
    }
}

/// Outcome of running the selected plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecReport {
    /// Whether the run completed.
    pub success: bool,
    /// Failure reason, or a short summary on success.
    pub message: String,
}

impl ExecReport {
    /// A completed run.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed run.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// An entry of a remote or local plugin list, used by `update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginListing {
    /// Unique plugin name.
    pub name: String,
    /// Where the plugin's manifest can be fetched from (remote lists only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,
}

impl PluginListing {
    /// A listing without a download location.
    #[must_use]
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manifest_url: None,
        }
    }
}
