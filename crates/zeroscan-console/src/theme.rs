//! Console theme and styling.

use colored::Colorize;

/// Styling for console messages.
pub struct Theme;

impl Theme {
    /// Format a success message.
    #[must_use]
    pub fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    #[must_use]
    pub fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    #[must_use]
    pub fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format a progress step.
    #[must_use]
    pub fn process(text: &str) -> String {
        format!("{} {}", "*".blue(), text)
    }
}
