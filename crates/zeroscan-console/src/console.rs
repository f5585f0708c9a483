//! The console: dispatch over one plugin manager and one session.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, warn};
use zeroscan_core::PluginManager;

use crate::command::{Command, CommandKind};
use crate::error::{ConsoleError, ConsoleResult};
use crate::session::Session;
use crate::theme::Theme;

/// What the read loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// The manager has shut down; stop reading.
    Exit,
}

/// Console settings taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    /// Leading word of the prompt.
    pub prompt_name: String,
    /// File `vulns -o` appends to.
    pub vulns_file: PathBuf,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            prompt_name: "ZEROScan".to_owned(),
            vulns_file: PathBuf::from("vulns.txt"),
        }
    }
}

/// The interactive console.
///
/// Holds the plugin manager, the session, and the two output sinks. Each
/// call to [`execute`](Self::execute) runs one line to completion.
pub struct Console<M> {
    pub(crate) manager: M,
    pub(crate) session: Session,
    pub(crate) settings: ConsoleSettings,
    pub(crate) out: Box<dyn Write>,
    pub(crate) err: Box<dyn Write>,
}

impl<M: PluginManager> Console<M> {
    /// A console writing to stdout and stderr.
    pub fn new(manager: M, settings: ConsoleSettings) -> Self {
        Self {
            manager,
            session: Session::new(settings.prompt_name.clone()),
            settings,
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    /// A console with default settings writing to the given sinks.
    pub fn with_output(
        manager: M,
        out: impl Write + 'static,
        err: impl Write + 'static,
    ) -> Self {
        Self {
            manager,
            session: Session::new(ConsoleSettings::default().prompt_name),
            settings: ConsoleSettings::default(),
            out: Box::new(out),
            err: Box::new(err),
        }
    }

    /// Replace the settings. Clears the selection.
    #[must_use]
    pub fn with_settings(mut self, settings: ConsoleSettings) -> Self {
        self.session = Session::new(settings.prompt_name.clone());
        self.settings = settings;
        self
    }

    /// The plugin manager.
    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// The session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The selected plugin.
    pub fn current_plugin(&self) -> Option<&str> {
        self.session.current_plugin()
    }

    /// The prompt for the next line.
    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    /// Active settings.
    pub fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    /// Run one line.
    ///
    /// Blank lines do nothing. Errors are returned, not printed; see
    /// [`handle_line`](Self::handle_line) for the printing variant.
    ///
    /// # Errors
    ///
    /// Returns the handler's error. The session is unchanged on error.
    pub fn execute(&mut self, line: &str) -> ConsoleResult<Flow> {
        let Some(command) = Command::parse(line) else {
            return Ok(Flow::Continue);
        };
        let Some(kind) = command.kind() else {
            return Err(ConsoleError::UnknownCommand(line.trim().to_owned()));
        };
        debug!(command = kind.name(), args = %command.args, "dispatching");

        if kind.needs_plugin() && self.session.current_plugin().is_none() {
            return Err(ConsoleError::NoPluginSelected);
        }

        let args = command.args.as_str();
        match kind {
            CommandKind::Help => self.cmd_help(),
            CommandKind::Version => self.cmd_version(),
            CommandKind::List => self.cmd_list(),
            CommandKind::Search => self.cmd_search(args),
            CommandKind::Info => self.cmd_info(args),
            CommandKind::Use => self.cmd_use(args),
            CommandKind::Options => self.cmd_options(),
            CommandKind::Set => self.cmd_set(args),
            CommandKind::Exploit => self.cmd_exploit(),
            CommandKind::Vulns => self.cmd_vulns(args),
            CommandKind::Rebuild => self.cmd_rebuild(),
            CommandKind::Update => self.cmd_update(),
            CommandKind::Back => self.cmd_back(),
            CommandKind::Shell => self.cmd_shell(args),
            CommandKind::Exit => return self.cmd_exit(),
        }?;
        Ok(Flow::Continue)
    }

    /// Run one line and print any non-fatal error to the error sink.
    ///
    /// # Errors
    ///
    /// Returns only [`ConsoleError::Fatal`] errors, after printing them.
    pub fn handle_line(&mut self, line: &str) -> ConsoleResult<Flow> {
        match self.execute(line) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                self.report_error(&e);
                if e.is_fatal() {
                    Err(e)
                } else {
                    Ok(Flow::Continue)
                }
            },
        }
    }

    /// Print an error with the error style.
    pub fn report_error(&mut self, error: &ConsoleError) {
        match error {
            ConsoleError::LoadFailed { plugin, source } => {
                warn!(plugin = %plugin, error = %source, "plugin load failed");
            },
            ConsoleError::Fatal(source) => warn!(error = %source, "fatal manager error"),
            other => debug!(kind = ?other.kind(), error = %other, "command failed"),
        }
        if let Err(e) = writeln!(self.err, "{}", Theme::error(&error.to_string())) {
            warn!(error = %e, "failed to write to error output");
        }
    }

    /// Shut the manager down, as on end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Fatal`] if the manager cannot persist its state.
    pub fn shutdown(&mut self) -> ConsoleResult<()> {
        debug!("shutting down plugin manager");
        self.manager.shutdown().map_err(ConsoleError::Fatal)
    }

    pub(crate) fn print(&mut self, text: &str) -> ConsoleResult<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    pub(crate) fn println(&mut self, text: &str) -> ConsoleResult<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }
}
