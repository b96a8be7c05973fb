//! Configuration loading and representation.

use std::path::PathBuf;

/// Where and how the catalog is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Catalog file; `.json` is appended when missing.
    pub data_file: PathBuf,
    /// Indent the written JSON.
    pub pretty: bool,
}

impl StoreConfig {
    pub const DATA_FILE_VAR: &'static str = "STOCKROOM_DATA_FILE";
    pub const PRETTY_VAR: &'static str = "STOCKROOM_PRETTY";
    pub const DEFAULT_DATA_FILE: &'static str = "inventory.json";

    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            pretty: true,
        }
    }

    /// Read `STOCKROOM_DATA_FILE` / `STOCKROOM_PRETTY`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = lookup(Self::DATA_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DATA_FILE.to_string());

        let pretty = match lookup(Self::PRETTY_VAR) {
            None => true,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    value = %raw,
                    "{} is not a boolean; using pretty output",
                    Self::PRETTY_VAR
                );
                true
            }),
        };

        Self {
            data_file: PathBuf::from(data_file),
            pretty,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DATA_FILE)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.data_file, PathBuf::from("inventory.json"));
        assert!(config.pretty);
    }

    #[test]
    fn reads_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("STOCKROOM_DATA_FILE", "/var/lib/stockroom/catalog.json"),
            ("STOCKROOM_PRETTY", "off"),
        ]));
        assert_eq!(config.data_file, PathBuf::from("/var/lib/stockroom/catalog.json"));
        assert!(!config.pretty);
    }

    #[test]
    fn blank_path_and_bad_flag_fall_back() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("STOCKROOM_DATA_FILE", "  "),
            ("STOCKROOM_PRETTY", "maybe"),
        ]));
        assert_eq!(config, StoreConfig::default());
    }
}
