//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json", "full"];

/// Validate a fully-merged configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_console(config)?;
    validate_update(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_console(config: &Config) -> ConfigResult<()> {
    if config.console.prompt_name.trim().is_empty() {
        return Err(invalid("console.prompt_name", "prompt_name must not be empty"));
    }
    if config.console.vulns_file.trim().is_empty() {
        return Err(invalid("console.vulns_file", "vulns_file must not be empty"));
    }
    Ok(())
}

fn validate_update(config: &Config) -> ConfigResult<()> {
    if config.update.timeout_secs == 0 {
        return Err(invalid("update.timeout_secs", "timeout_secs must be positive"));
    }
    let url = &config.update.index_url;
    if !url.is_empty() && !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(invalid(
            "update.index_url",
            format!("index_url '{url}' must be an http(s) URL"),
        ));
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;
    if !LOG_LEVELS.contains(&l.level.as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported level '{}'; expected one of: {}",
                l.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }
    if !LOG_FORMATS.contains(&l.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported format '{}'; expected one of: {}",
                l.format,
                LOG_FORMATS.join(", ")
            ),
        ));
    }
    Ok(())
}
