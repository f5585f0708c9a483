//! Console error types.

use thiserror::Error;
use zeroscan_core::ManagerError;

/// Errors produced while handling one console line.
///
/// The display form of each variant is the message the operator sees.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Malformed or missing arguments; carries the usage string.
    #[error("{0}")]
    Usage(&'static str),

    /// A command that acts on the current plugin ran with none selected.
    #[error("Select a plugin first.")]
    NoPluginSelected,

    /// The manager has no plugin by this name.
    #[error("Invalid plugin: {0}")]
    InvalidPlugin(String),

    /// Selecting a plugin failed.
    #[error("Failed to load plugin: {plugin}")]
    LoadFailed {
        /// Plugin that was requested.
        plugin: String,
        /// Why the manager refused it.
        #[source]
        source: ManagerError,
    },

    /// The manager rejected an operation on the current plugin or database.
    #[error("{0}")]
    Plugin(String),

    /// The first token matches no command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Writing output or running a shell command failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The line editor failed.
    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// A rebuild or update failed; the console cannot continue.
    #[error("{0}")]
    Fatal(ManagerError),
}

/// Coarse classification of a [`ConsoleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad arguments or an unknown command.
    Usage,
    /// The session is not in the state the command needs.
    State,
    /// The plugin manager refused the request.
    Collaborator,
    /// Terminal or process I/O failed.
    Io,
    /// The console must stop.
    Fatal,
}

impl ConsoleError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) | Self::UnknownCommand(_) => ErrorKind::Usage,
            Self::NoPluginSelected => ErrorKind::State,
            Self::InvalidPlugin(_) | Self::LoadFailed { .. } | Self::Plugin(_) => {
                ErrorKind::Collaborator
            },
            Self::Io(_) | Self::Readline(_) => ErrorKind::Io,
            Self::Fatal(_) => ErrorKind::Fatal,
        }
    }

    /// Whether the console must stop after this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Fatal
    }
}

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages() {
        assert_eq!(ConsoleError::Usage("set <option> <value>").to_string(), "set <option> <value>");
        assert_eq!(ConsoleError::NoPluginSelected.to_string(), "Select a plugin first.");
        assert_eq!(
            ConsoleError::UnknownCommand("foo bar".into()).to_string(),
            "Unknown command: foo bar"
        );
    }

    #[test]
    fn test_load_failed_keeps_cause() {
        let err = ConsoleError::LoadFailed {
            plugin: "wp-login".into(),
            source: ManagerError::PluginNotFound("wp-login".into()),
        };
        assert_eq!(err.to_string(), "Failed to load plugin: wp-login");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("plugin not found: wp-login")
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ConsoleError::Usage("x").kind(), ErrorKind::Usage);
        assert_eq!(ConsoleError::NoPluginSelected.kind(), ErrorKind::State);
        assert_eq!(ConsoleError::InvalidPlugin("x".into()).kind(), ErrorKind::Collaborator);
        assert!(ConsoleError::Fatal(ManagerError::Update("down".into())).is_fatal());
        assert!(!ConsoleError::Plugin("x".into()).is_fatal());
    }
}
