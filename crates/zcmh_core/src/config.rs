//! Runtime configuration for the core.
//!
//! # Responsibility
//! - Hold the few values a host may override: database location, log level
//!   and consultation phone number.
//! - Resolve overrides from `ZCMH_*` environment variables.
//!
//! # Invariants
//! - Blank environment values are ignored and the default is kept.
//! - Scheduling and playback constants are not configurable here.

use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "zcmh.sqlite3";
pub const DEFAULT_CONSULT_PHONE: &str = "6289691789422";

pub const ENV_DB_PATH: &str = "ZCMH_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ZCMH_LOG_LEVEL";
pub const ENV_CONSULT_PHONE: &str = "ZCMH_CONSULT_PHONE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub consult_phone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
            log_level: crate::logging::default_log_level().to_string(),
            consult_phone: DEFAULT_CONSULT_PHONE.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values returned from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = non_blank(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(phone) = non_blank(ENV_CONSULT_PHONE) {
            config.consult_phone = phone;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DB_FILE_NAME, DEFAULT_CONSULT_PHONE, ENV_DB_PATH, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = AppConfig::from_lookup(|_| None);
        assert!(config.db_path.ends_with(DB_FILE_NAME));
        assert_eq!(config.consult_phone, DEFAULT_CONSULT_PHONE);
    }

    #[test]
    fn overrides_replace_defaults_and_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "/data/app/zcmh.db"),
            (ENV_LOG_LEVEL, "   "),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/app/zcmh.db"));
        assert_eq!(config.log_level, AppConfig::default().log_level);
    }
}
