//! Running a plugin's entry point.
//!
//! The entry point runs with the plugin directory as working directory and
//! each option exported as `ZEROSCAN_OPT_<NAME>`. Every stdout line is
//! forwarded to the `zeroscan::plugin` log target; lines starting with
//! `VULN:` are findings.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

use zeroscan_core::{ManagerError, ManagerResult};

use crate::manifest::PluginManifest;

/// Prefix marking a finding on a plugin's stdout.
pub const FINDING_PREFIX: &str = "VULN:";

/// Prefix of the environment variables carrying option values.
pub const OPTION_ENV_PREFIX: &str = "ZEROSCAN_OPT_";

/// Log target used for plugin output.
pub const PLUGIN_LOG_TARGET: &str = "zeroscan::plugin";

/// What a finished plugin run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Finding texts, prefix stripped.
    pub findings: Vec<String>,
}

/// Environment variable name for an option.
#[must_use]
pub fn option_env_name(option: &str) -> String {
    let sanitized: String = option
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{OPTION_ENV_PREFIX}{sanitized}")
}

/// Run the plugin and wait for it to exit.
///
/// Blocks until the child exits; there is no timeout.
///
/// # Errors
///
/// Returns [`ManagerError::Execution`] if the process cannot be spawned.
pub fn run_plugin(
    manifest: &PluginManifest,
    dir: &Path,
    options: &[(String, String)],
) -> ManagerResult<RunOutput> {
    let program = resolve_program(&manifest.entry_point.command, dir);
    info!(plugin = %manifest.name, program = %program.display(), "running plugin");

    let output = Command::new(&program)
        .args(&manifest.entry_point.args)
        .current_dir(dir)
        .envs(
            options
                .iter()
                .map(|(name, value)| (option_env_name(name), value.as_str())),
        )
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            ManagerError::Execution(format!("failed to start {}: {e}", program.display()))
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut findings = Vec::new();
    for line in stdout.lines() {
        info!(target: PLUGIN_LOG_TARGET, plugin = %manifest.name, "{line}");
        if let Some(finding) = line.strip_prefix(FINDING_PREFIX) {
            let finding = finding.trim();
            if !finding.is_empty() {
                findings.push(finding.to_owned());
            }
        }
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        warn!(target: PLUGIN_LOG_TARGET, plugin = %manifest.name, "{line}");
    }

    Ok(RunOutput {
        success: output.status.success(),
        exit_code: output.status.code(),
        findings,
    })
}

/// Prefer an executable shipped inside the plugin directory over `PATH`.
fn resolve_program(command: &str, dir: &Path) -> PathBuf {
    let local = dir.join(command);
    if command.contains(std::path::MAIN_SEPARATOR) || local.is_file() {
        local
    } else {
        PathBuf::from(command)
    }
}
