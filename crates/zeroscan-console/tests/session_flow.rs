//! Selection, options, set and exploit flows.

mod common;

use common::ConsoleHarness;
use zeroscan_console::{ConsoleError, ErrorKind, Flow};
use zeroscan_core::ExecReport;
use zeroscan_test::{populated_manager, test_option};

#[test]
fn test_plugin_commands_need_selection_and_skip_manager() {
    let mut h = ConsoleHarness::new(populated_manager());

    for line in ["options", "set TARGET http://x", "set", "exploit"] {
        let err = h.console.execute(line).unwrap_err();
        assert!(matches!(err, ConsoleError::NoPluginSelected), "{line}");
        assert_eq!(err.kind(), ErrorKind::State);
    }
    assert!(h.manager.calls().is_empty());
}

#[test]
fn test_state_error_is_printed() {
    let mut h = ConsoleHarness::new(populated_manager());
    h.run(&["exploit"]);
    assert!(h.err.contents().contains("Select a plugin first."));
    assert!(h.out.is_empty());
}

#[test]
fn test_set_requires_exactly_two_tokens() {
    let mut h = ConsoleHarness::new(populated_manager());
    h.console.execute("use wp-xmlrpc-brute").unwrap();

    for line in ["set", "set TARGET", "set TARGET http://x extra"] {
        let err = h.console.execute(line).unwrap_err();
        assert_eq!(err.to_string(), "set <option> <value>");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
    assert!(!h.manager.calls().iter().any(|c| c.starts_with("set_option")));
}

#[test]
fn test_use_then_back_restores_prompt() {
    let mut h = ConsoleHarness::new(populated_manager());
    let initial = h.console.prompt();
    assert_eq!(initial, "ZEROScan > ");

    assert_eq!(h.console.execute("use wp-xmlrpc-brute").unwrap(), Flow::Continue);
    assert_eq!(h.console.current_plugin(), Some("wp-xmlrpc-brute"));
    assert!(h.console.prompt().contains("wp-xmlrpc-brute"));
    assert!(h.console.prompt().starts_with("ZEROScan exploit("));

    h.console.execute("back").unwrap();
    assert_eq!(h.console.current_plugin(), None);
    assert_eq!(h.console.prompt(), initial);
}

#[test]
fn test_failed_use_keeps_state() {
    let mut h = ConsoleHarness::new(populated_manager());
    h.console.execute("use wp-xmlrpc-brute").unwrap();
    let prompt = h.console.prompt();

    let err = h.console.execute("use no-such-plugin").unwrap_err();
    assert_eq!(err.to_string(), "Failed to load plugin: no-such-plugin");
    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert_eq!(h.console.current_plugin(), Some("wp-xmlrpc-brute"));
    assert_eq!(h.console.prompt(), prompt);
}

#[test]
fn test_failed_use_from_invalid_manifest() {
    let mut h = ConsoleHarness::new(populated_manager().failing_load());
    h.run(&["use wp-xmlrpc-brute"]);
    assert!(h.err.contents().contains("Failed to load plugin: wp-xmlrpc-brute"));
    assert_eq!(h.console.current_plugin(), None);
}

#[test]
fn test_use_without_argument() {
    let mut h = ConsoleHarness::new(populated_manager());
    let err = h.console.execute("use").unwrap_err();
    assert_eq!(err.to_string(), "use <plugin>");
    assert!(h.manager.calls().is_empty());
}

#[test]
fn test_options_set_exploit_scenario() {
    let mut h = ConsoleHarness::new(populated_manager());
    h.run(&["use wp-xmlrpc-brute", "options"]);

    let table = h.out.take();
    let target_row = table
        .lines()
        .find(|l| l.trim_start().starts_with("TARGET"))
        .unwrap();
    assert_eq!(target_row, format!("\t{:<20}{:<40}{:<10}TARGET value", "TARGET", "", "yes"));

    h.run(&["set TARGET http://x"]);
    let status = h.out.take();
    assert_eq!(status, "TARGET => http://x\n");
    assert!(!status.starts_with("Invalid option:"));
    assert_eq!(h.manager.option_value("TARGET").as_deref(), Some("http://x"));

    h.run(&["exploit"]);
    assert!(h.manager.was_called("exec_plugin"));
    assert!(h.out.is_empty());
    assert!(h.err.is_empty());
}

#[test]
fn test_options_are_refetched_every_time() {
    let mut h = ConsoleHarness::new(populated_manager());
    h.run(&["use wp-xmlrpc-brute", "options", "set THREADS 16", "options"]);
    let shows = h.manager.calls().iter().filter(|c| *c == "show_options").count();
    assert_eq!(shows, 2);
    assert!(h.out.contents().contains("16"));
}

#[test]
fn test_invalid_option_goes_to_error_output() {
    let mut h = ConsoleHarness::new(populated_manager());
    h.run(&["use wp-xmlrpc-brute", "set BADOPT 1"]);
    assert!(h.err.contents().contains("Invalid option: BADOPT"));
    assert!(!h.out.contents().contains("BADOPT"));
}

#[test]
fn test_invalid_option_status_string_is_an_error() {
    let mut h = ConsoleHarness::new(
        populated_manager().with_set_response("Invalid option: BADOPT"),
    );
    h.console.execute("use wp-xmlrpc-brute").unwrap();
    let err = h.console.execute("set BADOPT 1").unwrap_err();
    assert!(matches!(err, ConsoleError::Plugin(ref m) if m == "Invalid option: BADOPT"));
}

#[test]
fn test_options_error_is_reported() {
    let mut h = ConsoleHarness::new(populated_manager().failing_options());
    h.run(&["use wp-xmlrpc-brute", "options"]);
    assert!(h.err.contents().contains("option table unavailable"));
    assert!(h.out.is_empty());
}

#[test]
fn test_failed_exploit_shows_message() {
    let mut h = ConsoleHarness::new(
        populated_manager().with_exec_report(ExecReport::failure("required option not set: TARGET")),
    );
    h.run(&["use wp-xmlrpc-brute", "exploit"]);
    assert!(h.err.contents().contains("required option not set: TARGET"));
}

#[test]
fn test_set_value_case_insensitive_option() {
    let mut h = ConsoleHarness::new(populated_manager().with_option(test_option("Timeout", false)));
    h.run(&["use joomla-fields-sqli", "set timeout 5"]);
    assert_eq!(h.out.contents(), "Timeout => 5\n");
}
