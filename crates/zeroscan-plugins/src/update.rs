//! Remote plugin index.
//!
//! The index is a JSON array of `{"name": ..., "manifest_url": ...}` objects.
//! Installing a plugin means downloading its manifest into a new plugin
//! directory; anything the manifest's entry point needs must already be
//! available on the host.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{info, warn};

use zeroscan_core::{ManagerError, ManagerResult, PluginListing};

use crate::discovery::MANIFEST_FILE_NAME;
use crate::manifest::PluginManifest;

/// Client for the remote plugin index.
#[derive(Debug, Clone)]
pub struct RemoteIndex {
    url: String,
    client: Client,
}

impl RemoteIndex {
    /// Create a client for the index at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Update`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> ManagerResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("zeroscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(update_err)?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Index URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the published plugin list.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Update`] on network, HTTP status or JSON errors.
    pub fn fetch(&self) -> ManagerResult<Vec<PluginListing>> {
        info!(url = %self.url, "fetching remote plugin index");
        self.client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(update_err)?
            .json()
            .map_err(update_err)
    }

    /// Download and validate one manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Update`] if the download fails or the manifest
    /// does not describe the listed plugin.
    pub fn download_manifest(&self, listing: &PluginListing) -> ManagerResult<PluginManifest> {
        let url = listing.manifest_url.as_deref().ok_or_else(|| {
            ManagerError::Update(format!("{} has no manifest_url", listing.name))
        })?;
        let text = self
            .client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(update_err)?;

        let manifest = PluginManifest::from_toml(&text)?;
        manifest.validate()?;
        if manifest.name != listing.name {
            return Err(ManagerError::Update(format!(
                "manifest at {url} describes '{}', expected '{}'",
                manifest.name, listing.name
            )));
        }
        Ok(manifest)
    }
}

/// Remote listings whose names are not installed locally.
#[must_use]
pub fn missing_plugins<'a>(
    remote: &'a [PluginListing],
    local: &[PluginListing],
) -> Vec<&'a PluginListing> {
    remote
        .iter()
        .filter(|r| !local.iter().any(|l| l.name == r.name))
        .collect()
}

/// Write `manifest` into `<plugins_dir>/<name>/plugin.toml`.
///
/// # Errors
///
/// Returns an error if the manifest is invalid, its name would resolve
/// outside `plugins_dir`, or the directory or file cannot be written.
pub fn install_manifest(plugins_dir: &Path, manifest: &PluginManifest) -> ManagerResult<PathBuf> {
    manifest.validate()?;
    let mut components = Path::new(&manifest.name).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(ManagerError::Update(format!(
            "refusing to install '{}' outside {}",
            manifest.name,
            plugins_dir.display()
        )));
    }
    let dir = plugins_dir.join(&manifest.name);
    if dir.exists() {
        warn!(path = %dir.display(), "plugin directory already exists, overwriting manifest");
    }
    std::fs::create_dir_all(&dir)?;
    let text = toml::to_string_pretty(manifest)
        .map_err(|e| ManagerError::Update(format!("cannot serialize manifest: {e}")))?;
    std::fs::write(dir.join(MANIFEST_FILE_NAME), text)?;
    Ok(dir)
}

fn update_err(e: reqwest::Error) -> ManagerError {
    ManagerError::Update(e.to_string())
}
