//! Plugin manifest discovery.
//!
//! Each plugin directory holds one subdirectory per plugin with a
//! `plugin.toml` inside. Broken manifests are logged and skipped so one bad
//! plugin does not hide the others.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use zeroscan_core::ManagerResult;

use crate::manifest::PluginManifest;

/// Standard plugin manifest file name.
pub const MANIFEST_FILE_NAME: &str = "plugin.toml";

/// Discover plugin manifests in `dirs`, in order.
///
/// Returns `(manifest, plugin_dir)` pairs. When two directories provide the
/// same plugin name, the first one wins.
#[must_use]
pub fn discover_manifests(dirs: &[PathBuf]) -> Vec<(PluginManifest, PathBuf)> {
    let mut manifests = Vec::new();
    let mut names = HashSet::new();

    for dir in dirs {
        if !dir.is_dir() {
            debug!(path = %dir.display(), "plugin directory missing, skipping");
            continue;
        }
        match load_manifests_from_dir(dir) {
            Ok(found) => {
                for (manifest, plugin_dir) in found {
                    if names.insert(manifest.name.clone()) {
                        manifests.push((manifest, plugin_dir));
                    } else {
                        warn!(
                            plugin = %manifest.name,
                            path = %plugin_dir.display(),
                            "duplicate plugin name, keeping the first one"
                        );
                    }
                }
            },
            Err(e) => warn!(path = %dir.display(), error = %e, "failed to read plugin directory"),
        }
    }

    manifests.sort_by(|a, b| a.0.name.cmp(&b.0.name));
    info!(count = manifests.len(), "discovered plugin manifests");
    manifests
}

/// Load every valid manifest from the subdirectories of `dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn load_manifests_from_dir(dir: &Path) -> ManagerResult<Vec<(PluginManifest, PathBuf)>> {
    let mut manifests = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let manifest_path = path.join(MANIFEST_FILE_NAME);
        if !manifest_path.is_file() {
            continue;
        }
        match load_manifest(&manifest_path) {
            Ok(manifest) => {
                debug!(path = %manifest_path.display(), plugin = %manifest.name, "loaded plugin manifest");
                manifests.push((manifest, path));
            },
            Err(e) => {
                warn!(path = %manifest_path.display(), error = %e, "failed to load plugin manifest");
            },
        }
    }

    Ok(manifests)
}

/// Load and validate a single manifest file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_manifest(path: &Path) -> ManagerResult<PluginManifest> {
    let content = std::fs::read_to_string(path)?;
    let manifest = PluginManifest::from_toml(&content)?;
    manifest.validate()?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_plugin(root: &Path, dir_name: &str, name: &str) {
        let dir = root.join(dir_name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(MANIFEST_FILE_NAME),
            format!("name = \"{name}\"\n[entry_point]\ncommand = \"true\"\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_discovers_sorted_by_name() {
        let root = tempfile::tempdir().unwrap();
        write_plugin(root.path(), "b", "zeta");
        write_plugin(root.path(), "a", "alpha");

        let found = discover_manifests(&[root.path().to_path_buf()]);
        let names: Vec<_> = found.iter().map(|(m, _)| m.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(found[0].1, root.path().join("a"));
    }

    #[test]
    fn test_skips_broken_manifest() {
        let root = tempfile::tempdir().unwrap();
        write_plugin(root.path(), "good", "good");
        let bad = root.path().join("bad");
        std::fs::create_dir_all(&bad).unwrap();
        std::fs::write(bad.join(MANIFEST_FILE_NAME), "not toml [").unwrap();

        let found = discover_manifests(&[root.path().to_path_buf()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.name, "good");
    }

    #[test]
    fn test_first_directory_wins_on_duplicate() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_plugin(first.path(), "p", "same");
        write_plugin(second.path(), "p", "same");

        let found =
            discover_manifests(&[first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, first.path().join("p"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let found = discover_manifests(&[PathBuf::from("/nonexistent/zeroscan/plugins")]);
        assert!(found.is_empty());
    }
}
