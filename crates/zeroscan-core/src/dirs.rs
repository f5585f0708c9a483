//! Directory layout for ZEROScan state.
//!
//! [`ZeroscanHome`] is `~/.zeroscan/` (or `$ZEROSCAN_HOME`):
//!
//! ```text
//! ~/.zeroscan/
//! ├── plugins/                      (installed plugins, one directory each)
//! │   └── <name>/plugin.toml
//! ├── logs/                         (rolling log files when file logging is on)
//! ├── database.json                 (plugin index and recorded vulnerabilities)
//! ├── history                       (console line history)
//! └── config.toml                   (user configuration)
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the home directory.
pub const HOME_ENV_VAR: &str = "ZEROSCAN_HOME";

/// Global ZEROScan home directory.
#[derive(Debug, Clone)]
pub struct ZeroscanHome {
    root: PathBuf,
}

impl ZeroscanHome {
    /// Resolve the home directory.
    ///
    /// Checks `$ZEROSCAN_HOME` first, then falls back to `$HOME/.zeroscan/`.
    ///
    /// # Errors
    ///
    /// Returns an error if `$ZEROSCAN_HOME` is relative, or if neither it nor
    /// `$HOME` is set.
    pub fn resolve() -> io::Result<Self> {
        let root = if let Ok(custom) = std::env::var(HOME_ENV_VAR) {
            let p = PathBuf::from(&custom);
            if !p.is_absolute() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "ZEROSCAN_HOME must be an absolute path",
                ));
            }
            p
        } else {
            let home = std::env::var("HOME").map_err(|_| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "neither ZEROSCAN_HOME nor HOME environment variable is set",
                )
            })?;
            PathBuf::from(home).join(".zeroscan")
        };

        Ok(Self { root })
    }

    /// Create from an explicit path (useful for testing).
    #[must_use]
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure the directory structure exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.plugins_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// Root directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Installed plugins directory (`~/.zeroscan/plugins/`).
    #[must_use]
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join("plugins")
    }

    /// Logs directory (`~/.zeroscan/logs/`).
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Path to the plugin index and vulnerability database.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.root.join("database.json")
    }

    /// Path to the console history file.
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.root.join("history")
    }

    /// Path to the user configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that mutate `ZEROSCAN_HOME`.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_home_resolve_with_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();

        // SAFETY: serialized by ENV_MUTEX
        unsafe { std::env::set_var(HOME_ENV_VAR, &path) };
        let home = ZeroscanHome::resolve().unwrap();
        assert_eq!(home.root(), path);
        unsafe { std::env::remove_var(HOME_ENV_VAR) };
    }

    #[test]
    fn test_home_rejects_relative_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        // SAFETY: serialized by ENV_MUTEX
        unsafe { std::env::set_var(HOME_ENV_VAR, "relative/dir") };
        let err = ZeroscanHome::resolve().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        unsafe { std::env::remove_var(HOME_ENV_VAR) };
    }

    #[test]
    fn test_home_ensure_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let home = ZeroscanHome::from_path(dir.path());
        home.ensure().unwrap();

        assert!(home.plugins_dir().is_dir());
        assert!(home.logs_dir().is_dir());
    }

    #[test]
    fn test_home_paths() {
        let home = ZeroscanHome::from_path("/tmp/zs");
        assert_eq!(home.database_path(), PathBuf::from("/tmp/zs/database.json"));
        assert_eq!(home.history_path(), PathBuf::from("/tmp/zs/history"));
        assert_eq!(home.config_path(), PathBuf::from("/tmp/zs/config.toml"));
    }
}
