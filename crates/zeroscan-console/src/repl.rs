//! Rustyline-based read loop with history and tab completion.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::{
    CompletionType, Config, Context, EditMode, Editor, Helper, Highlighter, Validator,
};
use tracing::{debug, warn};
use zeroscan_core::PluginManager;

use crate::console::{Console, Flow};
use crate::error::ConsoleResult;

type CompleteFn = Box<dyn Fn(&str, usize) -> (usize, Vec<String>)>;

/// Events returned by the line editor.
pub(crate) enum ReadlineEvent {
    /// A line of input.
    Line(String),
    /// Ctrl+C: the current line was discarded.
    Interrupted,
    /// Ctrl+D or a terminal error.
    Eof,
}

/// Helper that provides console completion and history hints.
#[derive(Helper, Validator, Highlighter)]
struct ReplHelper {
    complete: CompleteFn,
    hinter: HistoryHinter,
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = (self.complete)(line, pos);
        let pairs = candidates
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

/// Line editor with optional persistent history.
pub(crate) struct ReplEditor {
    editor: Editor<ReplHelper, DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl ReplEditor {
    /// Create an editor, loading history from `history_path` when given.
    fn new(history_path: Option<PathBuf>, complete: CompleteFn) -> ConsoleResult<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(ReplHelper {
            complete,
            hinter: HistoryHinter::new(),
        }));

        if let Some(path) = &history_path {
            if !path.exists() {
                std::fs::write(path, "")?;
            }
            if let Err(e) = editor.load_history(path) {
                warn!(path = %path.display(), error = %e, "failed to load history");
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Read one line.
    fn readline(&mut self, prompt: &str) -> ReadlineEvent {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if let Some(path) = &self.history_path
                    && let Err(e) = self.editor.save_history(path)
                {
                    debug!(error = %e, "failed to save history");
                }
                ReadlineEvent::Line(line)
            },
            Err(ReadlineError::Interrupted) => ReadlineEvent::Interrupted,
            Err(ReadlineError::Eof) => ReadlineEvent::Eof,
            Err(e) => {
                warn!(error = %e, "terminal read failed");
                ReadlineEvent::Eof
            },
        }
    }
}

/// Run the console until `exit`, end of input, or a fatal error.
///
/// Ctrl+C discards the current line and keeps the console alive. End of
/// input shuts the manager down like `exit` does.
///
/// # Errors
///
/// Returns the fatal error that stopped the console, or a line editor
/// setup error.
pub fn run<M: PluginManager + 'static>(
    console: Console<M>,
    history_path: Option<PathBuf>,
) -> ConsoleResult<()> {
    let console = Rc::new(RefCell::new(console));
    let for_completion = Rc::clone(&console);
    let complete: CompleteFn = Box::new(move |line: &str, pos: usize| {
        for_completion
            .try_borrow()
            .map(|c| c.complete(line, pos))
            .unwrap_or_default()
    });
    let mut editor = ReplEditor::new(history_path, complete)?;

    loop {
        let prompt = console.borrow().prompt();
        match editor.readline(&prompt) {
            ReadlineEvent::Line(line) => {
                if console.borrow_mut().handle_line(&line)? == Flow::Exit {
                    return Ok(());
                }
            },
            ReadlineEvent::Interrupted => {},
            ReadlineEvent::Eof => return console.borrow_mut().shutdown(),
        }
    }
}
