//! Environment variable fallbacks.
//!
//! Env vars are **fallback**, not override: they only apply to fields that no
//! config file set.

use std::collections::HashMap;

use tracing::debug;

use crate::loader::SetFields;

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "ZEROSCAN_LOG_LEVEL",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "ZEROSCAN_LOG_FORMAT",
        field_path: "logging.format",
    },
    EnvMapping {
        var_name: "ZEROSCAN_VULNS_FILE",
        field_path: "console.vulns_file",
    },
    EnvMapping {
        var_name: "ZEROSCAN_DATABASE",
        field_path: "plugins.database",
    },
    EnvMapping {
        var_name: "ZEROSCAN_UPDATE_URL",
        field_path: "update.index_url",
    },
];

/// Snapshot the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Apply env var fallbacks to string fields that no config file set.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks(
    merged: &mut toml::Value,
    set_fields: &SetFields,
    env_vars: &HashMap<String, String>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if set_fields.contains(mapping.field_path) {
            continue;
        }
        let Some(val) = env_vars.get(mapping.var_name) else {
            continue;
        };

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var fallback"
        );
        set_string_field(merged, mapping.field_path, val);
        count = count.saturating_add(1);
    }

    count
}

/// Set `section.key` to a string, creating the section if needed.
fn set_string_field(root: &mut toml::Value, path: &str, val: &str) {
    let Some((section, key)) = path.split_once('.') else {
        return;
    };
    let Some(table) = root.as_table_mut() else {
        return;
    };
    let section = table
        .entry(section.to_owned())
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    if let Some(section) = section.as_table_mut() {
        section.insert(key.to_owned(), toml::Value::String(val.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_creates_missing_section() {
        let mut merged = toml::Value::Table(toml::map::Map::new());
        let env = HashMap::from([("ZEROSCAN_UPDATE_URL".to_owned(), "https://x".to_owned())]);
        let n = apply_env_fallbacks(&mut merged, &SetFields::new(), &env);
        assert_eq!(n, 1);
        assert_eq!(merged["update"]["index_url"].as_str(), Some("https://x"));
    }

    #[test]
    fn test_fallback_skips_file_set_fields() {
        let mut merged: toml::Value = toml::from_str("[logging]\nlevel = \"info\"\n").unwrap();
        let set = SetFields::from(["logging.level".to_owned()]);
        let env = HashMap::from([("ZEROSCAN_LOG_LEVEL".to_owned(), "trace".to_owned())]);
        assert_eq!(apply_env_fallbacks(&mut merged, &set, &env), 0);
        assert_eq!(merged["logging"]["level"].as_str(), Some("info"));
    }
}
