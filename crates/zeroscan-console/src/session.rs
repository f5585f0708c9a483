//! Session state: the selected plugin and the prompt derived from it.

/// ANSI red, as used for the selected plugin in the prompt.
const RED: &str = "\x1b[31m";
/// ANSI default foreground.
const RESET: &str = "\x1b[39m";

/// Which plugin, if any, the operator has selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    prompt_name: String,
    current_plugin: Option<String>,
}

impl Session {
    /// A session with nothing selected.
    #[must_use]
    pub fn new(prompt_name: impl Into<String>) -> Self {
        Self {
            prompt_name: prompt_name.into(),
            current_plugin: None,
        }
    }

    /// The selected plugin.
    #[must_use]
    pub fn current_plugin(&self) -> Option<&str> {
        self.current_plugin.as_deref()
    }

    /// Mark `name` as selected. Loading it is the caller's job.
    pub fn select(&mut self, name: impl Into<String>) {
        self.current_plugin = Some(name.into());
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.current_plugin = None;
    }

    /// `ZEROScan > `, or `ZEROScan exploit(<plugin>) > ` with the plugin in red.
    #[must_use]
    pub fn prompt(&self) -> String {
        match &self.current_plugin {
            None => format!("{} > ", self.prompt_name),
            Some(plugin) => format!("{} exploit({RED}{plugin}{RESET}) > ", self.prompt_name),
        }
    }
}
