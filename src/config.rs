use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::state::i18n::Language;

pub const OPEN_ENV: &str = "TABLEGEN_OPEN";
pub const LANGUAGE_ENV: &str = "TABLEGEN_LANG";
pub const LOG_ENV: &str = "TABLEGEN_LOG";

/// Start-up settings read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub open_path: Option<PathBuf>,
    pub language: Language,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            open_path: None,
            language: Language::default(),
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Invalid values fall back to the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(OPEN_ENV).filter(|value| !value.trim().is_empty()) {
            config.open_path = Some(PathBuf::from(path));
        }

        if let Some(code) = lookup(LANGUAGE_ENV) {
            match Language::from_code(&code) {
                Some(language) => config.language = language,
                None => tracing::warn!(code = %code, "unknown {LANGUAGE_ENV}, using English"),
            }
        }

        if let Some(level) = lookup(LOG_ENV) {
            match Level::from_str(level.trim()) {
                Ok(level) => config.log_level = level,
                Err(_) => tracing::warn!(level = %level, "unknown {LOG_ENV}, using info"),
            }
        }

        config
    }
}
