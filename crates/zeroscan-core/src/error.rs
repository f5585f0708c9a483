//! Plugin manager error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a [`PluginManager`](crate::PluginManager).
#[derive(Debug, Error)]
pub enum ManagerError {
    /// No plugin with this name is known.
    #[error("plugin not found: {0}")]
    PluginNotFound(String),

    /// A plugin manifest exists but fails validation.
    #[error("invalid manifest for {plugin}: {message}")]
    InvalidManifest {
        /// The plugin whose manifest is invalid.
        plugin: String,
        /// Validation failure.
        message: String,
    },

    /// An operation on the current plugin was requested with none loaded.
    #[error("no plugin loaded")]
    NoPluginLoaded,

    /// The loaded plugin has no option with this name.
    ///
    /// The display form is part of the console's observable contract.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Running a plugin failed before it produced a report.
    #[error("execution failed: {0}")]
    Execution(String),

    /// Reading or writing the plugin/vulnerability database failed.
    #[error("database error at {path}: {message}")]
    Database {
        /// Database file.
        path: PathBuf,
        /// Failure reason.
        message: String,
    },

    /// Fetching or installing plugins from the remote index failed.
    #[error("update failed: {0}")]
    Update(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for plugin manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display_keeps_legacy_prefix() {
        let err = ManagerError::InvalidOption("BADOPT".to_string());
        assert_eq!(err.to_string(), "Invalid option: BADOPT");
        assert!(err.to_string().starts_with(crate::INVALID_OPTION_PREFIX));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ManagerError = io.into();
        assert!(matches!(err, ManagerError::Io(_)));
    }
}
