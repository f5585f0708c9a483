//! Bridge from `zeroscan_config::Config` to the settings of each component.

use std::path::PathBuf;
use std::time::Duration;

use zeroscan_config::Config;
use zeroscan_console::ConsoleSettings;
use zeroscan_core::dirs::ZeroscanHome;
use zeroscan_plugins::ManagerSettings;
use zeroscan_plugins::runner::PLUGIN_LOG_TARGET;
use zeroscan_telemetry::{FileRotation, LogConfig, LogFormat};

/// Convert config to [`LogConfig`].
///
/// Plugin output is logged at `info` under its own target, so that target
/// is always enabled at `info` unless a configured directive overrides it.
pub(crate) fn to_log_config(cfg: &Config, home: &ZeroscanHome) -> LogConfig {
    let format = LogFormat::from_name(&cfg.logging.format).unwrap_or_default();

    let mut log_config = LogConfig::new(&cfg.logging.level)
        .with_format(format)
        .with_directive(format!("{PLUGIN_LOG_TARGET}=info"));

    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }

    if cfg.logging.to_file {
        log_config = log_config.with_file_logging(home.logs_dir(), FileRotation::Daily);
    }

    log_config
}

/// Convert config to [`ManagerSettings`].
///
/// `~/.zeroscan/plugins/` is always scanned first; configured directories
/// follow in order.
pub(crate) fn to_manager_settings(cfg: &Config, home: &ZeroscanHome) -> ManagerSettings {
    let mut plugin_dirs = vec![home.plugins_dir()];
    plugin_dirs.extend(cfg.plugins.dirs.iter().map(PathBuf::from));

    let database_path = if cfg.plugins.database.is_empty() {
        home.database_path()
    } else {
        PathBuf::from(&cfg.plugins.database)
    };

    let index_url = Some(cfg.update.index_url.clone()).filter(|u| !u.is_empty());

    ManagerSettings {
        plugin_dirs,
        database_path,
        index_url,
        timeout: Duration::from_secs(cfg.update.timeout_secs),
    }
}

/// Convert config to [`ConsoleSettings`].
pub(crate) fn to_console_settings(cfg: &Config) -> ConsoleSettings {
    ConsoleSettings {
        prompt_name: cfg.console.prompt_name.clone(),
        vulns_file: PathBuf::from(&cfg.console.vulns_file),
    }
}
