//! Fixed-width text layouts for console output.
//!
//! Every function returns the complete block, including leading and
//! trailing blank lines, ready to be written as-is.

use std::fmt::Write as _;

use zeroscan_core::{OptionSpec, PluginDetail, PluginSummary, VulnRecord};

fn title(out: &mut String, text: &str) {
    let _ = write!(out, "\n{text}\n{}\n\n", "=".repeat(text.chars().count()));
}

/// The `help` table.
#[must_use]
pub fn help(entries: &[(&str, &str)]) -> String {
    let mut out = String::new();
    title(&mut out, "Core Commands");
    let _ = writeln!(out, "{:<30}{}", "Command", "Description");
    let _ = writeln!(out, "{:<30}{}", "-------", "-----------");
    for (usage, description) in entries {
        let _ = writeln!(out, "{usage:<30}{description}");
    }
    out.push('\n');
    out
}

/// The `version` report.
#[must_use]
pub fn version(version: &str, cms_count: usize, plugin_count: usize) -> String {
    format!("\nVersion: {version}\nCMS: {cms_count}\nModules: {plugin_count}\n\n")
}

/// A plugin table under `heading` (`Modules` or `Matching Modules`).
#[must_use]
pub fn plugin_table(heading: &str, plugins: &[PluginSummary]) -> String {
    let mut out = String::new();
    title(&mut out, heading);
    let _ = writeln!(out, "{:<40}{:<40}{}", "Name", "Scope", "Description");
    let _ = writeln!(out, "{:<40}{:<40}{}", "----", "-----", "-----------");
    for p in plugins {
        let _ = writeln!(out, "{:<40}{:<40}{}", p.name, p.scope, p.description);
    }
    out.push('\n');
    out
}

/// The `info` block.
#[must_use]
pub fn plugin_detail(detail: &PluginDetail) -> String {
    format!(
        "\n{:>15}: {}\n{:>15}: {}\n{:>15}: {}\n\n\
         Author:\n\t{}\n\n\
         Description:\n\t{}\n\n\
         Reference:\n\t{}\n\n",
        "Name",
        detail.name,
        "CMS",
        detail.cms,
        "Scope",
        detail.scope,
        detail.author,
        detail.description,
        detail.reference,
    )
}

/// The `options` table. Required is shown as `yes` / `no`.
#[must_use]
pub fn options(options: &[OptionSpec]) -> String {
    let mut out = String::from("\n");
    let _ = writeln!(
        out,
        "\t{:<20}{:<40}{:<10}{}",
        "Name", "Current Setting", "Required", "Description"
    );
    let _ = writeln!(
        out,
        "\t{:<20}{:<40}{:<10}{}",
        "----", "---------------", "--------", "-----------"
    );
    for o in options {
        let required = if o.required { "yes" } else { "no" };
        let _ = writeln!(
            out,
            "\t{:<20}{:<40}{:<10}{}",
            o.name, o.current_setting, required, o.description
        );
    }
    out.push('\n');
    out
}

/// The `vulns` table.
#[must_use]
pub fn vulns(records: &[VulnRecord]) -> String {
    let mut out = String::new();
    title(&mut out, "Vulns");
    let _ = writeln!(out, "{:<40}{}", "Plugin", "Vuln");
    let _ = writeln!(out, "{:<40}{}", "------", "----");
    for r in records {
        let _ = writeln!(out, "{:<40}{}", r.plugin, r.vulnerability);
    }
    out.push('\n');
    out
}

/// One export section: `\n[<plugin>]\n` followed by the plugin's findings
/// one per line, then a blank line.
#[must_use]
pub fn export_section(plugin: &str, records: &[VulnRecord]) -> String {
    let mut out = format!("\n[{plugin}]\n");
    for r in records.iter().filter(|r| r.plugin == plugin) {
        out.push_str(&r.vulnerability);
        out.push('\n');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_table_layout() {
        let table = plugin_table(
            "Modules",
            &[PluginSummary::new("wp-login", "4.x", "Weak admin password")],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[1], "Modules");
        assert_eq!(lines[2], "=======");
        assert_eq!(lines[4], format!("{:<40}{:<40}Description", "Name", "Scope"));
        assert_eq!(lines[6], format!("{:<40}{:<40}Weak admin password", "wp-login", "4.x"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let table = plugin_table("Matching Modules", &[]);
        assert!(table.contains("Matching Modules\n================\n"));
        assert_eq!(table.lines().filter(|l| l.starts_with("Name")).count(), 1);
        assert!(table.ends_with("-----------\n\n"));
    }

    #[test]
    fn test_detail_layout() {
        let detail = PluginDetail {
            name: "wp-login".into(),
            author: "alice".into(),
            cms: "WordPress".into(),
            scope: "all".into(),
            description: "Weak admin password".into(),
            reference: "https://example.test".into(),
        };
        let text = plugin_detail(&detail);
        assert!(text.starts_with("\n           Name: wp-login\n            CMS: WordPress\n"));
        assert!(text.contains("Author:\n\talice\n\n"));
        assert!(text.contains("Reference:\n\thttps://example.test\n"));
    }

    #[test]
    fn test_options_required_column() {
        let text = options(&[OptionSpec {
            name: "TARGET".into(),
            current_setting: String::new(),
            required: true,
            description: "Base URL".into(),
        }]);
        let row = text.lines().nth(3).unwrap();
        assert_eq!(row, format!("\t{:<20}{:<40}{:<10}Base URL", "TARGET", "", "yes"));
    }

    #[test]
    fn test_vulns_table() {
        let text = vulns(&[VulnRecord::new("pluginA", "SQLi at /login")]);
        let rows: Vec<&str> = text.lines().skip(4).filter(|l| !l.is_empty()).collect();
        assert_eq!(
            rows,
            vec![
                format!("{:<40}Vuln", "Plugin"),
                format!("{:<40}----", "------"),
                format!("{:<40}SQLi at /login", "pluginA"),
            ]
        );
    }

    #[test]
    fn test_export_section_filters_by_plugin() {
        let records = [
            VulnRecord::new("a", "first"),
            VulnRecord::new("b", "other"),
            VulnRecord::new("a", "second"),
        ];
        assert_eq!(export_section("a", &records), "\n[a]\nfirst\nsecond\n\n");
        assert_eq!(export_section("zzz", &records), "\n[zzz]\n\n");
    }
}
