//! The command table and line tokenizer.

/// Every console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Print the command table.
    Help,
    /// Print version and plugin counts.
    Version,
    /// List every plugin.
    List,
    /// Search plugins by keyword.
    Search,
    /// Show plugin metadata.
    Info,
    /// Select a plugin.
    Use,
    /// Show the selected plugin's options.
    Options,
    /// Set an option of the selected plugin.
    Set,
    /// Run the selected plugin.
    Exploit,
    /// Show, clear or export findings.
    Vulns,
    /// Rebuild the plugin database.
    Rebuild,
    /// Fetch new plugins, then rebuild.
    Update,
    /// Deselect the current plugin.
    Back,
    /// Run a system command.
    Shell,
    /// Shut down and leave.
    Exit,
}

impl CommandKind {
    /// All commands in table order.
    pub const ALL: [Self; 15] = [
        Self::Help,
        Self::Version,
        Self::List,
        Self::Search,
        Self::Info,
        Self::Use,
        Self::Options,
        Self::Set,
        Self::Exploit,
        Self::Vulns,
        Self::Rebuild,
        Self::Update,
        Self::Back,
        Self::Shell,
        Self::Exit,
    ];

    /// The name the operator types.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Version => "version",
            Self::List => "list",
            Self::Search => "search",
            Self::Info => "info",
            Self::Use => "use",
            Self::Options => "options",
            Self::Set => "set",
            Self::Exploit => "exploit",
            Self::Vulns => "vulns",
            Self::Rebuild => "rebuild",
            Self::Update => "update",
            Self::Back => "back",
            Self::Shell => "shell",
            Self::Exit => "exit",
        }
    }

    /// Exact, case-sensitive lookup.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Whether the command acts on the selected plugin.
    #[must_use]
    pub fn needs_plugin(self) -> bool {
        matches!(self, Self::Options | Self::Set | Self::Exploit)
    }
}

/// Rows of the `help` table: usage form and description.
pub const HELP_ENTRIES: &[(&str, &str)] = &[
    ("help", "Help menu"),
    ("version", "Show the framework version numbers"),
    ("list", "List all plugins"),
    ("search <keyword>", "Search plugin names and descriptions"),
    ("info <plugin>", "Display information about one plugin"),
    ("use <plugin>", "Select a plugin by name"),
    ("options", "Display options for current plugin"),
    ("set <option> <value>", "Set a variable to a value"),
    ("exploit", "Run current plugin"),
    ("vulns", "List all vulnerabilities in the database"),
    ("vulns -d", "Clear all vulnerabilities in the database"),
    ("vulns -o <plugin>", "Save vulnerabilities to file"),
    ("update", "Update the framework"),
    ("rebuild", "Rebuild the database"),
    ("back", "Move back from the current plugin"),
    ("shell <command>", "Run a system command"),
    ("exit", "Exit the console"),
];

/// One tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// First token, as typed.
    pub name: String,
    /// Everything after the first whitespace run, trimmed.
    pub args: String,
}

impl Command {
    /// Split a line into command name and argument line.
    ///
    /// Returns `None` for blank lines. A leading `?` is shorthand for `help`
    /// and a leading `!` for `shell`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Some(rest) = line.strip_prefix('?') {
            return Some(Self::new(CommandKind::Help.name(), rest));
        }
        if let Some(rest) = line.strip_prefix('!') {
            return Some(Self::new(CommandKind::Shell.name(), rest));
        }
        let (name, args) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        Some(Self::new(name, args))
    }

    fn new(name: &str, args: &str) -> Self {
        Self {
            name: name.to_owned(),
            args: args.trim().to_owned(),
        }
    }

    /// The registered command this line names, if any.
    #[must_use]
    pub fn kind(&self) -> Option<CommandKind> {
        CommandKind::from_name(&self.name)
    }
}
