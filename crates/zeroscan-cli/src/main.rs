//! ZEROScan - CMS vulnerability scanning console.
//!
//! Parses the command line, loads configuration, installs logging, opens the
//! plugin database and hands control to the interactive console.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use zeroscan_config::Config;
use zeroscan_console::{Console, Theme, repl};
use zeroscan_core::PluginManager;
use zeroscan_core::dirs::ZeroscanHome;
use zeroscan_plugins::LocalPluginManager;

mod config_bridge;
mod theme;

use theme::print_banner;

/// ZEROScan - CMS vulnerability scanning console
#[derive(Parser)]
#[command(name = "zeroscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Home directory for plugins, database and history
    #[arg(long, value_name = "DIR")]
    home: Option<PathBuf>,

    /// Load configuration from this file only
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let home = match &cli.home {
        Some(dir) => ZeroscanHome::from_path(dir),
        None => ZeroscanHome::resolve().context("cannot locate the ZEROScan home directory")?,
    };
    home.ensure()
        .with_context(|| format!("cannot create {}", home.root().display()))?;

    let config = match &cli.config {
        Some(path) => Config::load_file(path)?,
        None => {
            let workspace_root = std::env::current_dir().ok();
            Config::load_with_home(workspace_root.as_deref(), home.root())?.config
        },
    };

    let mut log_config = config_bridge::to_log_config(&config, &home);
    if cli.verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Err(e) = zeroscan_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    print_banner();

    let settings = config_bridge::to_manager_settings(&config, &home);
    let manager = LocalPluginManager::open(settings).context("cannot open plugin database")?;
    info!(plugins = manager.plugin_count(), home = %home.root().display(), "plugin manager ready");
    if manager.plugin_count() == 0 {
        println!(
            "{}",
            Theme::warning(&format!(
                "No plugins installed. Add plugins under {} and run rebuild.",
                home.plugins_dir().display()
            ))
        );
        println!();
    }

    let console = Console::new(manager, config_bridge::to_console_settings(&config));
    let history = config.console.history.then(|| home.history_path());
    repl::run(console, history).context("console stopped")?;

    Ok(())
}
