//! [`LocalPluginManager`]: the filesystem-backed [`PluginManager`].

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use zeroscan_core::{
    ExecReport, ManagerError, ManagerResult, OptionSpec, PluginDetail, PluginListing,
    PluginManager, PluginSummary, VERSION, VulnRecord,
};

use crate::database::{Database, IndexEntry};
use crate::discovery::{MANIFEST_FILE_NAME, discover_manifests, load_manifest};
use crate::manifest::PluginManifest;
use crate::runner::run_plugin;
use crate::update::{RemoteIndex, install_manifest, missing_plugins};

/// Where the manager finds plugins, keeps its database, and checks for updates.
#[derive(Debug, Clone)]
pub struct ManagerSettings {
    /// Directories scanned for plugins, in priority order. New plugins are
    /// installed into the first one.
    pub plugin_dirs: Vec<PathBuf>,
    /// JSON database file.
    pub database_path: PathBuf,
    /// Remote plugin index, if updates are enabled.
    pub index_url: Option<String>,
    /// HTTP timeout for update requests.
    pub timeout: Duration,
}

#[derive(Debug)]
struct LoadedPlugin {
    manifest: PluginManifest,
    dir: PathBuf,
    values: Vec<String>,
}

impl LoadedPlugin {
    fn new(manifest: PluginManifest, dir: PathBuf) -> Self {
        let values = manifest.options.iter().map(|o| o.default.clone()).collect();
        Self {
            manifest,
            dir,
            values,
        }
    }

    fn option_index(&self, name: &str) -> Option<usize> {
        self.manifest
            .options
            .iter()
            .position(|o| o.name.eq_ignore_ascii_case(name))
    }
}

/// Plugin manager over manifest directories and a JSON database.
#[derive(Debug)]
pub struct LocalPluginManager {
    settings: ManagerSettings,
    db: Database,
    current: Option<LoadedPlugin>,
}

impl LocalPluginManager {
    /// Open the database, building the index on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be read or the first rebuild
    /// cannot be saved.
    pub fn open(settings: ManagerSettings) -> ManagerResult<Self> {
        let db = Database::open(&settings.database_path)?;
        let mut manager = Self {
            settings,
            db,
            current: None,
        };
        if manager.db.plugins().is_empty() {
            debug!("plugin index empty, rebuilding");
            manager.rebuild_database()?;
        }
        Ok(manager)
    }

    /// Settings this manager was opened with.
    #[must_use]
    pub fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    fn loaded(&self) -> ManagerResult<&LoadedPlugin> {
        self.current.as_ref().ok_or(ManagerError::NoPluginLoaded)
    }

    fn remote_index(&self) -> ManagerResult<RemoteIndex> {
        let url = self
            .settings
            .index_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ManagerError::Update("no update index configured".to_owned()))?;
        RemoteIndex::new(url, self.settings.timeout)
    }
}

impl PluginManager for LocalPluginManager {
    fn version(&self) -> String {
        VERSION.to_owned()
    }

    fn cms_count(&self) -> usize {
        self.db
            .plugins()
            .iter()
            .map(|e| e.manifest.cms.as_str())
            .filter(|cms| !cms.is_empty())
            .collect::<BTreeSet<_>>()
            .len()
    }

    fn plugin_count(&self) -> usize {
        self.db.plugins().len()
    }

    fn list_plugins(&self) -> Vec<PluginSummary> {
        self.db.plugins().iter().map(|e| e.manifest.summary()).collect()
    }

    fn search_plugins(&self, keyword: &str) -> Vec<PluginSummary> {
        let needle = keyword.to_lowercase();
        self.db
            .plugins()
            .iter()
            .filter(|e| {
                e.manifest.name.to_lowercase().contains(&needle)
                    || e.manifest.description.to_lowercase().contains(&needle)
            })
            .map(|e| e.manifest.summary())
            .collect()
    }

    fn info_plugin(&self, name: &str) -> Option<PluginDetail> {
        self.db.plugin(name).map(|e| e.manifest.detail())
    }

    fn load_plugin(&mut self, name: &str) -> ManagerResult<()> {
        let dir = self
            .db
            .plugin(name)
            .map(|e| e.dir.clone())
            .ok_or_else(|| ManagerError::PluginNotFound(name.to_owned()))?;
        let manifest = load_manifest(&dir.join(MANIFEST_FILE_NAME))?;
        if manifest.name != name {
            return Err(ManagerError::InvalidManifest {
                plugin: name.to_owned(),
                message: format!("manifest now names '{}', rebuild the database", manifest.name),
            });
        }
        info!(plugin = %name, path = %dir.display(), "plugin loaded");
        self.current = Some(LoadedPlugin::new(manifest, dir));
        Ok(())
    }

    fn show_options(&self) -> ManagerResult<Vec<OptionSpec>> {
        let loaded = self.loaded()?;
        Ok(loaded
            .manifest
            .options
            .iter()
            .zip(&loaded.values)
            .map(|(option, value)| option.spec(value))
            .collect())
    }

    fn set_option(&mut self, name: &str, value: &str) -> ManagerResult<String> {
        let loaded = self.current.as_mut().ok_or(ManagerError::NoPluginLoaded)?;
        let idx = loaded
            .option_index(name)
            .ok_or_else(|| ManagerError::InvalidOption(name.to_owned()))?;
        value.clone_into(&mut loaded.values[idx]);
        let canonical = &loaded.manifest.options[idx].name;
        debug!(plugin = %loaded.manifest.name, option = %canonical, "option set");
        Ok(format!("{canonical} => {value}"))
    }

    fn exec_plugin(&mut self) -> ExecReport {
        let Some(loaded) = self.current.as_ref() else {
            return ExecReport::failure(ManagerError::NoPluginLoaded.to_string());
        };

        let missing: Vec<&str> = loaded
            .manifest
            .options
            .iter()
            .zip(&loaded.values)
            .filter(|(o, v)| o.required && v.trim().is_empty())
            .map(|(o, _)| o.name.as_str())
            .collect();
        if !missing.is_empty() {
            return ExecReport::failure(format!(
                "required option not set: {}",
                missing.join(", ")
            ));
        }

        let options: Vec<(String, String)> = loaded
            .manifest
            .options
            .iter()
            .zip(&loaded.values)
            .map(|(o, v)| (o.name.clone(), v.clone()))
            .collect();
        let plugin = loaded.manifest.name.clone();

        let output = match run_plugin(&loaded.manifest, &loaded.dir, &options) {
            Ok(output) => output,
            Err(e) => return ExecReport::failure(e.to_string()),
        };

        let found = output.findings.len();
        self.db.add_vulns(
            output
                .findings
                .into_iter()
                .map(|finding| VulnRecord::new(&plugin, finding)),
        );
        if let Err(e) = self.db.save() {
            warn!(error = %e, "failed to save findings");
            return ExecReport::failure(e.to_string());
        }

        if !output.success {
            let status = output
                .exit_code
                .map_or_else(|| "a signal".to_owned(), |c| format!("status {c}"));
            return ExecReport::failure(format!("{plugin} exited with {status}"));
        }
        match found {
            0 => ExecReport::success("no vulnerability found"),
            1 => ExecReport::success("1 vulnerability found"),
            n => ExecReport::success(format!("{n} vulnerabilities found")),
        }
    }

    fn show_vulns(&self) -> ManagerResult<Vec<VulnRecord>> {
        Ok(self.db.vulns().to_vec())
    }

    fn clear_vulns(&mut self) -> ManagerResult<()> {
        self.db.clear_vulns();
        self.db.save()
    }

    fn rebuild_database(&mut self) -> ManagerResult<()> {
        let entries: Vec<IndexEntry> = discover_manifests(&self.settings.plugin_dirs)
            .into_iter()
            .map(|(manifest, dir)| IndexEntry { manifest, dir })
            .collect();
        info!(count = entries.len(), "plugin index rebuilt");
        self.db.replace_index(entries);
        self.db.save()
    }

    fn fetch_remote_plugin_list(&self) -> ManagerResult<Vec<PluginListing>> {
        self.remote_index()?.fetch()
    }

    fn fetch_local_plugin_list(&self) -> ManagerResult<Vec<PluginListing>> {
        Ok(discover_manifests(&self.settings.plugin_dirs)
            .into_iter()
            .map(|(manifest, _)| PluginListing::local(manifest.name))
            .collect())
    }

    fn sync_plugins(
        &mut self,
        remote: &[PluginListing],
        local: &[PluginListing],
    ) -> ManagerResult<Vec<String>> {
        let missing = missing_plugins(remote, local);
        if missing.is_empty() {
            return Ok(Vec::new());
        }
        let target = self
            .settings
            .plugin_dirs
            .first()
            .ok_or_else(|| ManagerError::Update("no plugin directory configured".to_owned()))?
            .clone();
        let index = self.remote_index()?;

        let mut installed = Vec::with_capacity(missing.len());
        for listing in missing {
            let manifest = index.download_manifest(listing)?;
            let dir = install_manifest(&target, &manifest)?;
            info!(plugin = %manifest.name, path = %dir.display(), "plugin installed");
            installed.push(manifest.name);
        }
        Ok(installed)
    }

    fn shutdown(&mut self) -> ManagerResult<()> {
        self.current = None;
        self.db.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_plugin(root: &Path, name: &str, cms: &str, body: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(MANIFEST_FILE_NAME),
            format!(
                "name = \"{name}\"\ncms = \"{cms}\"\ndescription = \"{name} check\"\n{body}"
            ),
        )
        .unwrap();
    }

    const SHELL_PLUGIN: &str = r#"
[entry_point]
command = "sh"
args = ["-c", "echo \"VULN: weak password on $ZEROSCAN_OPT_TARGET\""]

[[options]]
name = "TARGET"
required = true
description = "Base URL"

[[options]]
name = "PORT"
default = "80"
"#;

    fn manager(root: &Path) -> LocalPluginManager {
        LocalPluginManager::open(ManagerSettings {
            plugin_dirs: vec![root.join("plugins")],
            database_path: root.join("database.json"),
            index_url: None,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn seeded() -> (tempfile::TempDir, LocalPluginManager) {
        let root = tempfile::tempdir().unwrap();
        let plugins = root.path().join("plugins");
        write_plugin(&plugins, "wp-login", "WordPress", SHELL_PLUGIN);
        write_plugin(&plugins, "joomla-sqli", "Joomla", "[entry_point]\ncommand = \"true\"\n");
        write_plugin(&plugins, "wp-xmlrpc", "WordPress", "[entry_point]\ncommand = \"true\"\n");
        let m = manager(root.path());
        (root, m)
    }

    #[test]
    fn test_open_builds_index() {
        let (_root, m) = seeded();
        assert_eq!(m.plugin_count(), 3);
        assert_eq!(m.cms_count(), 2);
        let names: Vec<_> = m.list_plugins().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["joomla-sqli", "wp-login", "wp-xmlrpc"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (_root, m) = seeded();
        let found = m.search_plugins("WP-");
        assert_eq!(found.len(), 2);
        assert!(m.search_plugins("nothing-matches").is_empty());
    }

    #[test]
    fn test_info_unknown_plugin() {
        let (_root, m) = seeded();
        assert!(m.info_plugin("ghost").is_none());
        assert_eq!(m.info_plugin("wp-login").unwrap().cms, "WordPress");
    }

    #[test]
    fn test_options_require_loaded_plugin() {
        let (_root, mut m) = seeded();
        assert!(matches!(m.show_options(), Err(ManagerError::NoPluginLoaded)));
        assert!(matches!(
            m.set_option("TARGET", "x"),
            Err(ManagerError::NoPluginLoaded)
        ));
    }

    #[test]
    fn test_load_and_set_options() {
        let (_root, mut m) = seeded();
        assert!(matches!(
            m.load_plugin("ghost"),
            Err(ManagerError::PluginNotFound(_))
        ));

        m.load_plugin("wp-login").unwrap();
        let options = m.show_options().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].current_setting, "80");

        assert_eq!(m.set_option("target", "http://a").unwrap(), "TARGET => http://a");
        let err = m.set_option("BOGUS", "1").unwrap_err();
        assert_eq!(err.to_string(), "Invalid option: BOGUS");
        assert_eq!(m.show_options().unwrap()[0].current_setting, "http://a");
    }

    #[test]
    fn test_reload_resets_values() {
        let (_root, mut m) = seeded();
        m.load_plugin("wp-login").unwrap();
        m.set_option("PORT", "8080").unwrap();
        m.load_plugin("wp-login").unwrap();
        assert_eq!(m.show_options().unwrap()[1].current_setting, "80");
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_records_findings() {
        let (root, mut m) = seeded();
        m.load_plugin("wp-login").unwrap();

        let report = m.exec_plugin();
        assert!(!report.success);
        assert!(report.message.contains("TARGET"));

        m.set_option("TARGET", "http://site").unwrap();
        let report = m.exec_plugin();
        assert!(report.success, "{}", report.message);
        assert_eq!(report.message, "1 vulnerability found");

        let vulns = m.show_vulns().unwrap();
        assert_eq!(
            vulns,
            vec![VulnRecord::new("wp-login", "weak password on http://site")]
        );

        // Findings survive a reopen.
        drop(m);
        let m = manager(root.path());
        assert_eq!(m.show_vulns().unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_without_findings() {
        let (_root, mut m) = seeded();
        m.load_plugin("joomla-sqli").unwrap();
        let report = m.exec_plugin();
        assert_eq!(report, ExecReport::success("no vulnerability found"));
    }

    #[test]
    fn test_exec_without_plugin_fails() {
        let (_root, mut m) = seeded();
        assert!(!m.exec_plugin().success);
    }

    #[test]
    fn test_clear_vulns() {
        let (_root, mut m) = seeded();
        m.db.add_vulns([VulnRecord::new("wp-login", "x")]);
        m.clear_vulns().unwrap();
        assert!(m.show_vulns().unwrap().is_empty());
    }

    #[test]
    fn test_rebuild_picks_up_new_plugins() {
        let (root, mut m) = seeded();
        write_plugin(
            &root.path().join("plugins"),
            "drupal-rce",
            "Drupal",
            "[entry_point]\ncommand = \"true\"\n",
        );
        assert_eq!(m.plugin_count(), 3);
        m.rebuild_database().unwrap();
        assert_eq!(m.plugin_count(), 4);
        assert_eq!(m.cms_count(), 3);
    }

    #[test]
    fn test_local_list_and_noop_sync() {
        let (_root, mut m) = seeded();
        let local = m.fetch_local_plugin_list().unwrap();
        assert_eq!(local.len(), 3);
        let remote = vec![PluginListing::local("wp-login")];
        assert!(m.sync_plugins(&remote, &local).unwrap().is_empty());
    }

    #[test]
    fn test_remote_list_requires_index_url() {
        let (_root, m) = seeded();
        let err = m.fetch_remote_plugin_list().unwrap_err();
        assert!(err.to_string().contains("no update index configured"));
    }
}
