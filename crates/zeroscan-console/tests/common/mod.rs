//! Shared harness for console integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use zeroscan_console::{Console, ConsoleSettings};
use zeroscan_test::{CapturedOutput, MockPluginManager, setup_test_logging};

/// A console over a mock manager with captured output and a private
/// export file.
pub struct ConsoleHarness {
    /// The console under test.
    pub console: Console<MockPluginManager>,
    /// Shared handle on the console's manager.
    pub manager: MockPluginManager,
    /// What the console wrote to its output sink.
    pub out: CapturedOutput,
    /// What the console wrote to its error sink.
    pub err: CapturedOutput,
    /// Holds the export file.
    pub dir: TempDir,
}

impl ConsoleHarness {
    /// Wrap `manager` in a fresh console.
    pub fn new(manager: MockPluginManager) -> Self {
        setup_test_logging("zeroscan_console=debug");
        let out = CapturedOutput::new();
        let err = CapturedOutput::new();
        let dir = tempfile::tempdir().unwrap();
        let settings = ConsoleSettings {
            vulns_file: dir.path().join("vulns.txt"),
            ..ConsoleSettings::default()
        };
        let console = Console::with_output(manager.clone(), out.clone(), err.clone())
            .with_settings(settings);
        Self {
            console,
            manager,
            out,
            err,
            dir,
        }
    }

    /// Run lines through the printing entry point, as the REPL does.
    pub fn run(&mut self, lines: &[&str]) {
        for line in lines {
            self.console.handle_line(line).unwrap();
        }
    }

    /// Path of the export file.
    pub fn vulns_file(&self) -> PathBuf {
        self.dir.path().join("vulns.txt")
    }

    /// Contents of the export file, or empty if it was never written.
    pub fn exported(&self) -> String {
        std::fs::read_to_string(self.vulns_file()).unwrap_or_default()
    }
}
