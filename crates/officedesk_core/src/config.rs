//! Runtime configuration for the office core.
//!
//! Values come from defaults, then `OFFICEDESK_*` environment variables;
//! front ends layer their own flags on top.

use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "OFFICEDESK_DB";
pub const ENV_LOG_LEVEL: &str = "OFFICEDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "OFFICEDESK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "officedesk.sqlite3";
const MESSAGE_POLL_INTERVAL: Duration = Duration::from_secs(5);
const NOTIFICATION_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file holding every collection.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// How often chat views re-read the message log.
    pub message_poll_interval: Duration,
    /// How often inbox views re-read notifications.
    pub notification_poll_interval: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
            message_poll_interval: MESSAGE_POLL_INTERVAL,
            notification_poll_interval: NOTIFICATION_POLL_INTERVAL,
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by any non-empty `OFFICEDESK_*` variable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();
        if let Some(path) = value(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = value(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn defaults_match_poll_cadence() {
        let config = CoreConfig::default();
        assert_eq!(config.message_poll_interval, Duration::from_secs(5));
        assert_eq!(config.notification_poll_interval, Duration::from_secs(10));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn lookup_overrides_defaults_and_ignores_blank_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DB_PATH, "/tmp/office.db"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "  "),
        ]);
        let config = CoreConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/tmp/office.db"));
        assert_eq!(config.log_level, "warn");
        assert!(config.log_dir.is_none());
    }
}
