//! Tab completion.

use zeroscan_core::PluginManager;

use crate::command::CommandKind;
use crate::console::Console;

impl<M: PluginManager> Console<M> {
    /// Completion candidates for `line` with the cursor at byte `pos`.
    ///
    /// Returns the byte offset where the completed word starts and the
    /// candidates for it. The first word completes to command names. Any
    /// argument of `info` and `use` completes to plugin names
    /// (case-sensitive prefix); any argument of `set` completes to the
    /// selected plugin's option names (case-insensitive prefix).
    pub fn complete(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let prefix = line.get(..pos).unwrap_or(line);
        let word = prefix.rsplit(char::is_whitespace).next().unwrap_or_default();
        let start = prefix.len().saturating_sub(word.len());
        let before: Vec<&str> = prefix[..start].split_whitespace().collect();

        let candidates = match before.as_slice() {
            [] => CommandKind::ALL
                .iter()
                .map(|k| k.name())
                .filter(|name| name.starts_with(word))
                .map(str::to_owned)
                .collect(),
            ["info" | "use", ..] => self.plugin_candidates(word),
            ["set", ..] => self.option_candidates(word),
            _ => Vec::new(),
        };
        (start, candidates)
    }

    fn plugin_candidates(&self, word: &str) -> Vec<String> {
        self.manager
            .list_plugins()
            .into_iter()
            .map(|p| p.name)
            .filter(|name| name.starts_with(word))
            .collect()
    }

    fn option_candidates(&self, word: &str) -> Vec<String> {
        if self.session.current_plugin().is_none() {
            return Vec::new();
        }
        let Ok(options) = self.manager.show_options() else {
            return Vec::new();
        };
        let word = word.to_lowercase();
        options
            .into_iter()
            .map(|o| o.name)
            .filter(|name| name.to_lowercase().starts_with(&word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::console::Console;
    use zeroscan_test::{CapturedOutput, MockPluginManager, populated_manager, test_option};

    fn console(manager: MockPluginManager) -> Console<MockPluginManager> {
        let out = CapturedOutput::new();
        Console::with_output(manager, out.clone(), out)
    }

    #[test]
    fn test_command_names() {
        let c = console(populated_manager());
        assert_eq!(c.complete("ex", 2), (0, vec!["exploit".into(), "exit".into()]));
        assert_eq!(c.complete("", 0).1.len(), 15);
        assert!(c.complete("EX", 2).1.is_empty());
    }

    #[test]
    fn test_plugin_names_are_case_sensitive() {
        let c = console(populated_manager());
        let (start, found) = c.complete("use wp-", 7);
        assert_eq!(start, 4);
        assert_eq!(found, vec!["wp-rest-content-injection", "wp-xmlrpc-brute"]);
        assert!(c.complete("info WP-", 8).1.is_empty());
        assert_eq!(c.complete("info ", 5).1.len(), 3);
    }

    #[test]
    fn test_option_names_are_case_insensitive() {
        let mut c = console(populated_manager().with_option(test_option("Timeout", false)));
        assert!(c.complete("set t", 5).1.is_empty());

        c.execute("use wp-xmlrpc-brute").unwrap();
        let (start, found) = c.complete("set t", 5);
        assert_eq!(start, 4);
        assert_eq!(found, vec!["TARGET", "THREADS", "Timeout"]);
        assert_eq!(c.complete("set THR", 7).1, vec!["THREADS"]);
    }

    #[test]
    fn test_option_errors_yield_nothing() {
        let mut c = console(populated_manager().failing_options());
        c.execute("use wp-xmlrpc-brute").unwrap();
        assert!(c.complete("set ", 4).1.is_empty());
    }

    #[test]
    fn test_later_arguments_complete_too() {
        let mut c = console(populated_manager());
        c.execute("use wp-xmlrpc-brute").unwrap();
        assert_eq!(c.complete("set TARGET t", 12), (11, vec!["TARGET".into(), "THREADS".into()]));
        assert_eq!(
            c.complete("info joomla-fields-sqli wp-x", 28),
            (24, vec!["wp-xmlrpc-brute".into()])
        );
        assert!(c.complete("list w", 6).1.is_empty());
    }
}
