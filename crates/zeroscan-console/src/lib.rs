//! ZEROScan Console - the operator REPL of the ZEROScan framework.
//!
//! The console reads one line at a time, routes it to a command handler,
//! and keeps track of which plugin is selected. Everything about plugins
//! themselves (discovery, options, execution, the vulnerability database,
//! updates) is delegated to a [`PluginManager`](zeroscan_core::PluginManager).
//!
//! - [`Console`]: dispatch, session state and handlers over one manager
//! - [`Command`] / [`CommandKind`]: the fixed command table
//! - [`render`]: the fixed-width text layouts
//! - [`repl`]: the rustyline loop with history and tab completion
//!
//! `shell` runs its argument through the system shell with the operator's
//! privileges. It is a convenience for a trusted operator, not a sandbox.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod render;
pub mod repl;

mod command;
mod completion;
mod console;
mod error;
mod handlers;
mod session;
mod theme;

pub use command::{Command, CommandKind, HELP_ENTRIES};
pub use console::{Console, ConsoleSettings, Flow};
pub use error::{ConsoleError, ConsoleResult, ErrorKind};
pub use session::Session;
pub use theme::Theme;
