//! Plugin manifest types.
//!
//! ```toml
//! name = "wp-xmlrpc-brute"
//! author = "zeroscan"
//! cms = "WordPress"
//! scope = "all versions"
//! description = "Password guessing through xmlrpc.php"
//! reference = "https://codex.wordpress.org/XML-RPC_Support"
//!
//! [entry_point]
//! command = "python3"
//! args = ["check.py"]
//!
//! [[options]]
//! name = "TARGET"
//! required = true
//! description = "Base URL of the site"
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use zeroscan_core::{ManagerError, ManagerResult, OptionSpec, PluginDetail, PluginSummary};

/// A plugin manifest loaded from `plugin.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Unique plugin name.
    pub name: String,
    /// Plugin author.
    #[serde(default)]
    pub author: String,
    /// Targeted CMS.
    #[serde(default)]
    pub cms: String,
    /// Affected versions or components.
    #[serde(default)]
    pub scope: String,
    /// Description shown by `list` and `info`.
    #[serde(default)]
    pub description: String,
    /// Advisory or write-up URL.
    #[serde(default)]
    pub reference: String,
    /// How to run the check.
    pub entry_point: EntryPoint,
    /// Configurable parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ManifestOption>,
}

/// The command that performs a plugin's check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Program to run, resolved against `PATH` or the plugin directory.
    pub command: String,
    /// Arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// One `[[options]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestOption {
    /// Option name.
    pub name: String,
    /// Value before the operator sets one.
    #[serde(default)]
    pub default: String,
    /// Whether the plugin refuses to run while the value is empty.
    #[serde(default)]
    pub required: bool,
    /// One-line description.
    #[serde(default)]
    pub description: String,
}

impl ManifestOption {
    /// Project onto an option row with the given current value.
    #[must_use]
    pub fn spec(&self, current: &str) -> OptionSpec {
        OptionSpec {
            name: self.name.clone(),
            current_setting: current.to_owned(),
            required: self.required,
            description: self.description.clone(),
        }
    }
}

impl PluginManifest {
    /// Parse a manifest from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Toml`] if the text is not a valid manifest.
    pub fn from_toml(text: &str) -> ManagerResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Check the invariants the console relies on.
    ///
    /// Names are single tokens because the console splits arguments on
    /// whitespace, and they double as the plugin's directory name, so only
    /// `[A-Za-z0-9._-]` is accepted and `.` / `..` are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::InvalidManifest`] describing the first problem.
    pub fn validate(&self) -> ManagerResult<()> {
        let invalid = |message: String| ManagerError::InvalidManifest {
            plugin: self.name.clone(),
            message,
        };

        if !is_safe_name(&self.name) {
            return Err(invalid(format!(
                "name '{}' must be a single path component of [A-Za-z0-9._-]",
                self.name
            )));
        }
        if self.entry_point.command.trim().is_empty() {
            return Err(invalid("entry_point.command is empty".to_owned()));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if option.name.is_empty() || option.name.chars().any(char::is_whitespace) {
                return Err(invalid(format!(
                    "option name '{}' must be a single non-empty token",
                    option.name
                )));
            }
            if !seen.insert(option.name.to_ascii_lowercase()) {
                return Err(invalid(format!("duplicate option '{}'", option.name)));
            }
        }
        Ok(())
    }

    /// Project onto the `list` columns.
    #[must_use]
    pub fn summary(&self) -> PluginSummary {
        PluginSummary::new(&self.name, &self.scope, &self.description)
    }

    /// Project onto the `info` fields.
    #[must_use]
    pub fn detail(&self) -> PluginDetail {
        PluginDetail {
            name: self.name.clone(),
            author: self.author.clone(),
            cms: self.cms.clone(),
            scope: self.scope.clone(),
            description: self.description.clone(),
            reference: self.reference.clone(),
        }
    }
}

/// Whether `name` can be used as a directory name under a plugin dir.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
name = "sqlmap-lite"
author = "zeroscan"
cms = "Joomla"
scope = "< 3.7.1"
description = "com_fields SQL injection"
reference = "CVE-2017-8917"

[entry_point]
command = "sh"
args = ["check.sh"]

[[options]]
name = "TARGET"
required = true
description = "Base URL"

[[options]]
name = "TIMEOUT"
default = "10"
description = "Request timeout"
"#;

    #[test]
    fn test_parse_sample() {
        let manifest = PluginManifest::from_toml(SAMPLE).unwrap();
        assert_eq!(manifest.name, "sqlmap-lite");
        assert_eq!(manifest.entry_point.args, vec!["check.sh"]);
        assert_eq!(manifest.options.len(), 2);
        assert!(manifest.options[0].required);
        assert_eq!(manifest.options[1].default, "10");
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_path_like_names_are_rejected() {
        for name in ["../escaped", "/etc/zeroscan", "a/b", "..", ".", "a\\b", "two words"] {
            let mut manifest = PluginManifest::from_toml(SAMPLE).unwrap();
            manifest.name = name.to_owned();
            assert!(manifest.validate().is_err(), "{name} should be rejected");
        }
        let mut manifest = PluginManifest::from_toml(SAMPLE).unwrap();
        manifest.name = "wp_rest.v2-inject".to_owned();
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_detail_fields() {
        let detail = PluginManifest::from_toml(SAMPLE).unwrap().detail();
        assert_eq!(detail.cms, "Joomla");
        assert_eq!(detail.reference, "CVE-2017-8917");
    }

    #[test]
    fn test_missing_entry_point_is_parse_error() {
        let err = PluginManifest::from_toml("name = \"x\"\n").unwrap_err();
        assert!(matches!(err, ManagerError::Toml(_)));
    }

    #[test]
    fn test_validate_rejects_whitespace_name() {
        let mut manifest = PluginManifest::from_toml(SAMPLE).unwrap();
        manifest.name = "two words".to_owned();
        assert!(matches!(
            manifest.validate(),
            Err(ManagerError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_options_ignoring_case() {
        let mut manifest = PluginManifest::from_toml(SAMPLE).unwrap();
        manifest.options[1].name = "target".to_owned();
        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate option"));
    }

    #[test]
    fn test_validate_rejects_empty_command() {
        let mut manifest = PluginManifest::from_toml(SAMPLE).unwrap();
        manifest.entry_point.command = " ".to_owned();
        assert!(manifest.validate().is_err());
    }
}
