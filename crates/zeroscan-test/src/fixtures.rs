//! Test fixtures for plugin metadata.

use std::path::{Path, PathBuf};

use zeroscan_core::{OptionSpec, PluginDetail, VulnRecord};

use crate::mocks::MockPluginManager;

/// Plugin metadata with predictable fields derived from the name.
#[must_use]
pub fn test_plugin(name: &str, cms: &str) -> PluginDetail {
    PluginDetail {
        name: name.to_string(),
        author: "tester".to_string(),
        cms: cms.to_string(),
        scope: format!("{cms} <= 4.7"),
        description: format!("{name} detection"),
        reference: format!("https://advisories.test/{name}"),
    }
}

/// An unset option.
#[must_use]
pub fn test_option(name: &str, required: bool) -> OptionSpec {
    OptionSpec {
        name: name.to_string(),
        current_setting: String::new(),
        required,
        description: format!("{name} value"),
    }
}

/// A mock with three plugins over two CMSs, two options and one finding.
#[must_use]
pub fn populated_manager() -> MockPluginManager {
    MockPluginManager::new()
        .with_plugin(test_plugin("joomla-fields-sqli", "Joomla"))
        .with_plugin(test_plugin("wp-rest-content-injection", "WordPress"))
        .with_plugin(test_plugin("wp-xmlrpc-brute", "WordPress"))
        .with_option(test_option("TARGET", true))
        .with_option(OptionSpec {
            name: "THREADS".to_string(),
            current_setting: "4".to_string(),
            required: false,
            description: "Worker count".to_string(),
        })
        .with_vuln(VulnRecord::new(
            "wp-xmlrpc-brute",
            "admin:admin accepted at http://blog.test/xmlrpc.php",
        ))
}

/// Write a minimal `plugin.toml` for `name` under `root/<name>/`.
///
/// # Panics
///
/// Panics if the directory or file cannot be written.
#[allow(clippy::unwrap_used)]
pub fn write_test_manifest(root: &Path, name: &str, cms: &str) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("plugin.toml"),
        format!(
            "name = \"{name}\"\ncms = \"{cms}\"\ndescription = \"{name} detection\"\n\n[entry_point]\ncommand = \"true\"\n"
        ),
    )
    .unwrap();
    dir
}

/// A temporary plugin directory holding manifests for `names`.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn test_plugin_dir(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        write_test_manifest(dir.path(), name, "WordPress");
    }
    dir
}
