use std::collections::HashMap;
use std::path::PathBuf;

use tablegen::config::{AppConfig, LANGUAGE_ENV, LOG_ENV, OPEN_ENV};
use tablegen::state::i18n::Language;
use tracing::Level;

fn config_from(vars: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_without_environment() {
    let config = config_from(&[]);
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.open_path, None);
    assert_eq!(config.language, Language::En);
    assert_eq!(config.log_level, Level::INFO);
}

#[test]
fn test_all_settings_are_read() {
    let config = config_from(&[
        (OPEN_ENV, "/tmp/table.json"),
        (LANGUAGE_ENV, "zh-Hant"),
        (LOG_ENV, "debug"),
    ]);
    assert_eq!(config.open_path, Some(PathBuf::from("/tmp/table.json")));
    assert_eq!(config.language, Language::ZhHant);
    assert_eq!(config.log_level, Level::DEBUG);
}

#[test]
fn test_invalid_values_fall_back() {
    let config = config_from(&[(OPEN_ENV, "  "), (LANGUAGE_ENV, "klingon"), (LOG_ENV, "loud")]);
    assert_eq!(config, AppConfig::default());
}
