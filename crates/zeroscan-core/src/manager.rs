//! The plugin manager interface consumed by the console.

use crate::error::ManagerResult;
use crate::types::{ExecReport, OptionSpec, PluginDetail, PluginListing, PluginSummary, VulnRecord};

/// Capability set the console needs from the plugin subsystem.
///
/// Implementors own plugin discovery, loading, option storage, the
/// vulnerability database and the update mechanism. The console holds one
/// implementor and never looks past this trait.
///
/// Calls are synchronous: the console runs one command to completion before
/// reading the next line.
pub trait PluginManager {
    /// Framework version string.
    fn version(&self) -> String;

    /// Number of distinct CMS targets covered by known plugins.
    fn cms_count(&self) -> usize;

    /// Number of known plugins.
    fn plugin_count(&self) -> usize;

    /// Every known plugin.
    fn list_plugins(&self) -> Vec<PluginSummary>;

    /// Plugins whose name or description matches `keyword`.
    fn search_plugins(&self, keyword: &str) -> Vec<PluginSummary>;

    /// Full metadata for `name`, or `None` if it is unknown.
    fn info_plugin(&self, name: &str) -> Option<PluginDetail>;

    /// Make `name` the plugin that option and exec calls act on.
    ///
    /// # Errors
    ///
    /// Fails if the plugin is unknown or its manifest does not validate.
    fn load_plugin(&mut self, name: &str) -> ManagerResult<()>;

    /// Live option rows of the loaded plugin.
    ///
    /// # Errors
    ///
    /// Fails if no plugin is loaded or its options cannot be read.
    fn show_options(&self) -> ManagerResult<Vec<OptionSpec>>;

    /// Set an option of the loaded plugin, returning a confirmation line.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::InvalidOption`](crate::ManagerError::InvalidOption)
    /// for an unknown option name.
    fn set_option(&mut self, name: &str, value: &str) -> ManagerResult<String>;

    /// Run the loaded plugin.
    fn exec_plugin(&mut self) -> ExecReport;

    /// Every recorded vulnerability.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be read.
    fn show_vulns(&self) -> ManagerResult<Vec<VulnRecord>>;

    /// Drop every recorded vulnerability.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be written.
    fn clear_vulns(&mut self) -> ManagerResult<()>;

    /// Clear and rebuild the plugin database from the installed plugins.
    ///
    /// # Errors
    ///
    /// Fails if plugin directories or the database cannot be accessed.
    fn rebuild_database(&mut self) -> ManagerResult<()>;

    /// Plugin list published by the remote index.
    ///
    /// # Errors
    ///
    /// Fails if the index cannot be fetched or parsed.
    fn fetch_remote_plugin_list(&self) -> ManagerResult<Vec<PluginListing>>;

    /// Plugins installed locally.
    ///
    /// # Errors
    ///
    /// Fails if plugin directories cannot be read.
    fn fetch_local_plugin_list(&self) -> ManagerResult<Vec<PluginListing>>;

    /// Install every remote plugin missing locally, returning the new names.
    ///
    /// # Errors
    ///
    /// Fails on the first plugin that cannot be downloaded or written.
    fn sync_plugins(
        &mut self,
        remote: &[PluginListing],
        local: &[PluginListing],
    ) -> ManagerResult<Vec<String>>;

    /// Flush state and release resources before the process exits.
    ///
    /// # Errors
    ///
    /// Fails if pending state cannot be persisted.
    fn shutdown(&mut self) -> ManagerResult<()>;
}
