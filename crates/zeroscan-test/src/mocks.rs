//! Mock implementations for testing.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use zeroscan_core::{
    ExecReport, ManagerError, ManagerResult, OptionSpec, PluginDetail, PluginListing,
    PluginManager, PluginSummary, VulnRecord,
};

#[derive(Debug)]
struct MockState {
    version: String,
    plugins: Vec<PluginDetail>,
    options: Vec<OptionSpec>,
    loaded: Option<String>,
    vulns: Vec<VulnRecord>,
    exec_report: ExecReport,
    set_response: Option<String>,
    remote: Vec<PluginListing>,
    fail_load: bool,
    fail_options: bool,
    fail_vulns: bool,
    fail_rebuild: bool,
    fail_update: bool,
    shutdown_count: usize,
    calls: Vec<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            version: "0.1.0-test".to_string(),
            plugins: Vec::new(),
            options: Vec::new(),
            loaded: None,
            vulns: Vec::new(),
            exec_report: ExecReport::success("no vulnerability found"),
            set_response: None,
            remote: Vec::new(),
            fail_load: false,
            fail_options: false,
            fail_vulns: false,
            fail_rebuild: false,
            fail_update: false,
            shutdown_count: 0,
            calls: Vec::new(),
        }
    }
}

/// Scriptable [`PluginManager`] that records every call.
///
/// Clones share state, so a test can move one clone into the console and
/// inspect the other afterwards. Every loaded plugin exposes the same option
/// table set with [`with_option`](Self::with_option).
#[derive(Debug, Clone, Default)]
pub struct MockPluginManager {
    state: Arc<Mutex<MockState>>,
}

impl MockPluginManager {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test poisons the lock; the state is still usable.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record(&self, call: impl Into<String>) {
        self.state().calls.push(call.into());
    }

    /// Add a known plugin.
    #[must_use]
    pub fn with_plugin(self, plugin: PluginDetail) -> Self {
        self.state().plugins.push(plugin);
        self
    }

    /// Add an option to the table every loaded plugin exposes.
    #[must_use]
    pub fn with_option(self, option: OptionSpec) -> Self {
        self.state().options.push(option);
        self
    }

    /// Seed the vulnerability database.
    #[must_use]
    pub fn with_vuln(self, record: VulnRecord) -> Self {
        self.state().vulns.push(record);
        self
    }

    /// Report returned by `exec_plugin`.
    #[must_use]
    pub fn with_exec_report(self, report: ExecReport) -> Self {
        self.state().exec_report = report;
        self
    }

    /// Status string returned by every `set_option`, bypassing the option table.
    #[must_use]
    pub fn with_set_response(self, response: impl Into<String>) -> Self {
        self.state().set_response = Some(response.into());
        self
    }

    /// Add a plugin to the remote index.
    #[must_use]
    pub fn with_remote_plugin(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let url = format!("https://plugins.test/{name}/plugin.toml");
        self.state().remote.push(PluginListing {
            name,
            manifest_url: Some(url),
        });
        self
    }

    /// Make every `load_plugin` fail with an invalid manifest.
    #[must_use]
    pub fn failing_load(self) -> Self {
        self.state().fail_load = true;
        self
    }

    /// Make `show_options` fail.
    #[must_use]
    pub fn failing_options(self) -> Self {
        self.state().fail_options = true;
        self
    }

    /// Make `show_vulns` and `clear_vulns` fail.
    #[must_use]
    pub fn failing_vulns(self) -> Self {
        self.state().fail_vulns = true;
        self
    }

    /// Make `rebuild_database` fail.
    #[must_use]
    pub fn failing_rebuild(self) -> Self {
        self.state().fail_rebuild = true;
        self
    }

    /// Make `fetch_remote_plugin_list` fail.
    #[must_use]
    pub fn failing_update(self) -> Self {
        self.state().fail_update = true;
        self
    }

    /// Calls received so far, e.g. `load_plugin(wp-login)`.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Whether a call with exactly this text was received.
    #[must_use]
    pub fn was_called(&self, call: &str) -> bool {
        self.state().calls.iter().any(|c| c == call)
    }

    /// Name of the plugin the mock considers loaded.
    #[must_use]
    pub fn loaded(&self) -> Option<String> {
        self.state().loaded.clone()
    }

    /// Current value of an option.
    #[must_use]
    pub fn option_value(&self, name: &str) -> Option<String> {
        self.state()
            .options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.current_setting.clone())
    }

    /// Recorded vulnerabilities.
    #[must_use]
    pub fn vulns(&self) -> Vec<VulnRecord> {
        self.state().vulns.clone()
    }

    /// Known plugin names.
    #[must_use]
    pub fn plugin_names(&self) -> Vec<String> {
        self.state().plugins.iter().map(|p| p.name.clone()).collect()
    }

    /// How many times `shutdown` ran.
    #[must_use]
    pub fn shutdown_count(&self) -> usize {
        self.state().shutdown_count
    }
}

impl PluginManager for MockPluginManager {
    fn version(&self) -> String {
        self.record("version");
        self.state().version.clone()
    }

    fn cms_count(&self) -> usize {
        self.record("cms_count");
        self.state()
            .plugins
            .iter()
            .map(|p| p.cms.clone())
            .collect::<BTreeSet<_>>()
            .len()
    }

    fn plugin_count(&self) -> usize {
        self.record("plugin_count");
        self.state().plugins.len()
    }

    fn list_plugins(&self) -> Vec<PluginSummary> {
        self.record("list_plugins");
        self.state().plugins.iter().map(PluginDetail::summary).collect()
    }

    fn search_plugins(&self, keyword: &str) -> Vec<PluginSummary> {
        self.record(format!("search_plugins({keyword})"));
        let needle = keyword.to_lowercase();
        self.state()
            .plugins
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .map(PluginDetail::summary)
            .collect()
    }

    fn info_plugin(&self, name: &str) -> Option<PluginDetail> {
        self.record(format!("info_plugin({name})"));
        self.state().plugins.iter().find(|p| p.name == name).cloned()
    }

    fn load_plugin(&mut self, name: &str) -> ManagerResult<()> {
        self.record(format!("load_plugin({name})"));
        let mut state = self.state();
        if state.fail_load {
            return Err(ManagerError::InvalidManifest {
                plugin: name.to_string(),
                message: "entry_point.command is empty".to_string(),
            });
        }
        if !state.plugins.iter().any(|p| p.name == name) {
            return Err(ManagerError::PluginNotFound(name.to_string()));
        }
        state.loaded = Some(name.to_string());
        Ok(())
    }

    fn show_options(&self) -> ManagerResult<Vec<OptionSpec>> {
        self.record("show_options");
        let state = self.state();
        if state.fail_options {
            return Err(ManagerError::Execution("option table unavailable".to_string()));
        }
        if state.loaded.is_none() {
            return Err(ManagerError::NoPluginLoaded);
        }
        Ok(state.options.clone())
    }

    fn set_option(&mut self, name: &str, value: &str) -> ManagerResult<String> {
        self.record(format!("set_option({name}, {value})"));
        let mut state = self.state();
        if let Some(response) = &state.set_response {
            return Ok(response.clone());
        }
        if state.loaded.is_none() {
            return Err(ManagerError::NoPluginLoaded);
        }
        let option = state
            .options
            .iter_mut()
            .find(|o| o.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ManagerError::InvalidOption(name.to_string()))?;
        option.current_setting = value.to_string();
        Ok(format!("{} => {value}", option.name))
    }

    fn exec_plugin(&mut self) -> ExecReport {
        self.record("exec_plugin");
        self.state().exec_report.clone()
    }

    fn show_vulns(&self) -> ManagerResult<Vec<VulnRecord>> {
        self.record("show_vulns");
        let state = self.state();
        if state.fail_vulns {
            return Err(ManagerError::Io(std::io::Error::other("database locked")));
        }
        Ok(state.vulns.clone())
    }

    fn clear_vulns(&mut self) -> ManagerResult<()> {
        self.record("clear_vulns");
        let mut state = self.state();
        if state.fail_vulns {
            return Err(ManagerError::Io(std::io::Error::other("database locked")));
        }
        state.vulns.clear();
        Ok(())
    }

    fn rebuild_database(&mut self) -> ManagerResult<()> {
        self.record("rebuild_database");
        if self.state().fail_rebuild {
            return Err(ManagerError::Database {
                path: "database.json".into(),
                message: "read-only file system".to_string(),
            });
        }
        Ok(())
    }

    fn fetch_remote_plugin_list(&self) -> ManagerResult<Vec<PluginListing>> {
        self.record("fetch_remote_plugin_list");
        let state = self.state();
        if state.fail_update {
            return Err(ManagerError::Update("index unreachable".to_string()));
        }
        Ok(state.remote.clone())
    }

    fn fetch_local_plugin_list(&self) -> ManagerResult<Vec<PluginListing>> {
        self.record("fetch_local_plugin_list");
        Ok(self
            .state()
            .plugins
            .iter()
            .map(|p| PluginListing::local(&p.name))
            .collect())
    }

    fn sync_plugins(
        &mut self,
        remote: &[PluginListing],
        local: &[PluginListing],
    ) -> ManagerResult<Vec<String>> {
        self.record("sync_plugins");
        let new: Vec<String> = remote
            .iter()
            .filter(|r| !local.iter().any(|l| l.name == r.name))
            .map(|r| r.name.clone())
            .collect();
        let mut state = self.state();
        for name in &new {
            state.plugins.push(PluginDetail {
                name: name.clone(),
                author: "remote".to_string(),
                cms: "Unknown".to_string(),
                scope: String::new(),
                description: format!("{name} from the remote index"),
                reference: String::new(),
            });
        }
        Ok(new)
    }

    fn shutdown(&mut self) -> ManagerResult<()> {
        self.record("shutdown");
        let mut state = self.state();
        state.shutdown_count = state.shutdown_count.saturating_add(1);
        Ok(())
    }
}
