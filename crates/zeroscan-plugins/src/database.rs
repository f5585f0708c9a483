//! The plugin index and vulnerability store.
//!
//! Both live in one JSON file. The index is a cache of discovered manifests,
//! replaced wholesale by a rebuild; findings accumulate until cleared.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use zeroscan_core::{ManagerError, ManagerResult, VulnRecord};

use crate::manifest::PluginManifest;

/// An indexed plugin and the directory it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// The plugin's manifest.
    pub manifest: PluginManifest,
    /// Directory holding the manifest.
    pub dir: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DatabaseFile {
    #[serde(default)]
    plugins: Vec<IndexEntry>,
    #[serde(default)]
    vulns: Vec<VulnRecord>,
}

/// JSON-file backed plugin index and vulnerability store.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    data: DatabaseFile,
    dirty: bool,
}

impl Database {
    /// Open the database at `path`, starting empty if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Database`] if the file exists but cannot be
    /// read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> ManagerResult<Self> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| db_err(&path, e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "database missing, starting empty");
                DatabaseFile::default()
            },
            Err(e) => return Err(db_err(&path, e)),
        };
        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Indexed plugins, sorted by name.
    #[must_use]
    pub fn plugins(&self) -> &[IndexEntry] {
        &self.data.plugins
    }

    /// Look up an indexed plugin by exact name.
    #[must_use]
    pub fn plugin(&self, name: &str) -> Option<&IndexEntry> {
        self.data.plugins.iter().find(|e| e.manifest.name == name)
    }

    /// Replace the whole index.
    pub fn replace_index(&mut self, mut entries: Vec<IndexEntry>) {
        entries.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));
        self.data.plugins = entries;
        self.dirty = true;
    }

    /// Recorded findings, oldest first.
    #[must_use]
    pub fn vulns(&self) -> &[VulnRecord] {
        &self.data.vulns
    }

    /// Record findings.
    pub fn add_vulns(&mut self, records: impl IntoIterator<Item = VulnRecord>) {
        let before = self.data.vulns.len();
        self.data.vulns.extend(records);
        if self.data.vulns.len() != before {
            self.dirty = true;
        }
    }

    /// Drop every finding.
    pub fn clear_vulns(&mut self) {
        self.data.vulns.clear();
        self.dirty = true;
    }

    /// Write pending changes to disk.
    ///
    /// Writes to a sibling temporary file and renames it over the target.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Database`] if the file cannot be written.
    pub fn save(&mut self) -> ManagerResult<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| db_err(&self.path, e))?;
        }
        let text = serde_json::to_string_pretty(&self.data).map_err(|e| db_err(&self.path, e))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(|e| db_err(&self.path, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| db_err(&self.path, e))?;
        self.dirty = false;
        debug!(path = %self.path.display(), "database saved");
        Ok(())
    }
}

fn db_err(path: &Path, e: impl std::fmt::Display) -> ManagerError {
    ManagerError::Database {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::EntryPoint;

    fn entry(name: &str) -> IndexEntry {
        IndexEntry {
            manifest: PluginManifest {
                name: name.to_owned(),
                author: String::new(),
                cms: "Drupal".to_owned(),
                scope: String::new(),
                description: String::new(),
                reference: String::new(),
                entry_point: EntryPoint {
                    command: "true".to_owned(),
                    args: Vec::new(),
                },
                options: Vec::new(),
            },
            dir: PathBuf::from("/plugins").join(name),
        }
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("database.json")).unwrap();
        assert!(db.plugins().is_empty());
        assert!(db.vulns().is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("database.json");

        let mut db = Database::open(&path).unwrap();
        db.replace_index(vec![entry("b"), entry("a")]);
        db.add_vulns([VulnRecord::new("a", "XSS at /search")]);
        db.save().unwrap();

        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.plugins()[0].manifest.name, "a");
        assert_eq!(reopened.plugin("b").unwrap().dir, PathBuf::from("/plugins/b"));
        assert_eq!(reopened.vulns(), &[VulnRecord::new("a", "XSS at /search")]);
    }

    #[test]
    fn test_clear_vulns_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        let mut db = Database::open(&path).unwrap();
        db.add_vulns([VulnRecord::new("a", "x")]);
        db.save().unwrap();
        db.clear_vulns();
        db.save().unwrap();

        assert!(Database::open(&path).unwrap().vulns().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_database_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            Database::open(&path),
            Err(ManagerError::Database { .. })
        ));
    }
}
