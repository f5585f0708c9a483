//! Command handlers.

use std::fs::OpenOptions;
use std::io::Write;
use std::process::{Command as Process, Stdio};

use tracing::{debug, info};
use zeroscan_core::{INVALID_OPTION_PREFIX, PluginManager};

use crate::command::HELP_ENTRIES;
use crate::console::{Console, Flow};
use crate::error::{ConsoleError, ConsoleResult};
use crate::render;
use crate::theme::Theme;

const VULNS_USAGE: &str = "vulns [-d | -o <plugin>]";

impl<M: PluginManager> Console<M> {
    pub(crate) fn cmd_help(&mut self) -> ConsoleResult<()> {
        self.print(&render::help(HELP_ENTRIES))
    }

    pub(crate) fn cmd_version(&mut self) -> ConsoleResult<()> {
        let text = render::version(
            &self.manager.version(),
            self.manager.cms_count(),
            self.manager.plugin_count(),
        );
        self.print(&text)
    }

    pub(crate) fn cmd_list(&mut self) -> ConsoleResult<()> {
        let plugins = self.manager.list_plugins();
        self.print(&render::plugin_table("Modules", &plugins))
    }

    pub(crate) fn cmd_search(&mut self, keyword: &str) -> ConsoleResult<()> {
        if keyword.is_empty() {
            return Err(ConsoleError::Usage("search <keyword>"));
        }
        let plugins = self.manager.search_plugins(keyword);
        self.print(&render::plugin_table("Matching Modules", &plugins))
    }

    pub(crate) fn cmd_info(&mut self, plugin: &str) -> ConsoleResult<()> {
        let name = if plugin.is_empty() {
            self.session
                .current_plugin()
                .ok_or(ConsoleError::Usage("info <plugin>"))?
                .to_owned()
        } else {
            plugin.to_owned()
        };
        let detail = self
            .manager
            .info_plugin(&name)
            .ok_or(ConsoleError::InvalidPlugin(name))?;
        self.print(&render::plugin_detail(&detail))
    }

    pub(crate) fn cmd_use(&mut self, plugin: &str) -> ConsoleResult<()> {
        if plugin.is_empty() {
            return Err(ConsoleError::Usage("use <plugin>"));
        }
        self.manager
            .load_plugin(plugin)
            .map_err(|source| ConsoleError::LoadFailed {
                plugin: plugin.to_owned(),
                source,
            })?;
        info!(plugin = %plugin, "plugin selected");
        self.session.select(plugin);
        Ok(())
    }

    pub(crate) fn cmd_back(&mut self) -> ConsoleResult<()> {
        self.session.deselect();
        Ok(())
    }

    pub(crate) fn cmd_options(&mut self) -> ConsoleResult<()> {
        let options = self
            .manager
            .show_options()
            .map_err(|e| ConsoleError::Plugin(e.to_string()))?;
        self.print(&render::options(&options))
    }

    pub(crate) fn cmd_set(&mut self, args: &str) -> ConsoleResult<()> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        let [option, value] = tokens.as_slice() else {
            return Err(ConsoleError::Usage("set <option> <value>"));
        };
        let status = self
            .manager
            .set_option(option, value)
            .map_err(|e| ConsoleError::Plugin(e.to_string()))?;
        if status.starts_with(INVALID_OPTION_PREFIX) {
            return Err(ConsoleError::Plugin(status));
        }
        self.println(&status)
    }

    pub(crate) fn cmd_exploit(&mut self) -> ConsoleResult<()> {
        let report = self.manager.exec_plugin();
        debug!(success = report.success, message = %report.message, "plugin run finished");
        if report.success {
            Ok(())
        } else {
            Err(ConsoleError::Plugin(report.message))
        }
    }

    pub(crate) fn cmd_vulns(&mut self, args: &str) -> ConsoleResult<()> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {
                let records = self
                    .manager
                    .show_vulns()
                    .map_err(|e| ConsoleError::Plugin(e.to_string()))?;
                self.print(&render::vulns(&records))
            },
            ["-d"] => {
                self.manager
                    .clear_vulns()
                    .map_err(|e| ConsoleError::Plugin(e.to_string()))?;
                self.println(&Theme::success("Clear database successfully."))
            },
            ["-o", plugin] => self.export_vulns(plugin),
            _ => Err(ConsoleError::Usage(VULNS_USAGE)),
        }
    }

    /// Append one section for `plugin` to the export file, even when it has
    /// no findings.
    fn export_vulns(&mut self, plugin: &str) -> ConsoleResult<()> {
        let records = self
            .manager
            .show_vulns()
            .map_err(|e| ConsoleError::Plugin(e.to_string()))?;
        let section = render::export_section(plugin, &records);

        let path = &self.settings.vulns_file;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(section.as_bytes())?;
        info!(plugin = %plugin, path = %path.display(), "findings exported");

        self.println(&Theme::success("Save vulns successfully."))
    }

    pub(crate) fn cmd_rebuild(&mut self) -> ConsoleResult<()> {
        self.println(&Theme::process("Clear current database"))?;
        self.println(&Theme::process("Rebuild database"))?;
        self.manager
            .rebuild_database()
            .map_err(ConsoleError::Fatal)?;
        info!("plugin database rebuilt");
        self.println(&Theme::success("OK"))
    }

    pub(crate) fn cmd_update(&mut self) -> ConsoleResult<()> {
        let banner = format!("Attempting to update the {}", self.settings.prompt_name);
        self.println(&Theme::process(&banner))?;

        self.println(&Theme::process("Downloading plugin list"))?;
        let remote = self
            .manager
            .fetch_remote_plugin_list()
            .map_err(ConsoleError::Fatal)?;
        info!(count = remote.len(), "remote plugin list fetched");

        self.println(&Theme::process("Getting local plugin list"))?;
        let local = self
            .manager
            .fetch_local_plugin_list()
            .map_err(ConsoleError::Fatal)?;

        self.println(&Theme::process("Comparing and updating"))?;
        let added = self
            .manager
            .sync_plugins(&remote, &local)
            .map_err(ConsoleError::Fatal)?;
        info!(count = added.len(), "plugins synchronized");
        let names: Vec<String> = added.iter().map(|name| format!("'{name}'")).collect();
        self.println(&Theme::success(&format!(
            "New plugins: [{}]",
            names.join(", ")
        )))?;

        self.cmd_rebuild()
    }

    pub(crate) fn cmd_shell(&mut self, command_line: &str) -> ConsoleResult<()> {
        if command_line.is_empty() {
            return Err(ConsoleError::Usage("shell <command>"));
        }
        self.println(&Theme::process(&format!("exec: {command_line}")))?;
        info!(command = %command_line, "running shell command");

        let output = shell_command(command_line)
            .stdin(Stdio::inherit())
            .output()?;
        debug!(status = %output.status, "shell command finished");

        self.print("\n")?;
        self.out.write_all(&output.stdout)?;
        self.out.write_all(&output.stderr)?;
        self.out.flush()?;
        Ok(())
    }

    pub(crate) fn cmd_exit(&mut self) -> ConsoleResult<Flow> {
        self.shutdown()?;
        Ok(Flow::Exit)
    }
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Process {
    let mut cmd = Process::new("cmd");
    cmd.args(["/C", command_line]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Process {
    let mut cmd = Process::new("sh");
    cmd.args(["-c", command_line]);
    cmd
}
