//! Serializable logger settings

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use crate::sinks::file::{DEFAULT_LOG_DIR, DEFAULT_LOG_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 200;

/// Default pause before [`wait`](crate::Log4u::wait) starts polling
pub const DEFAULT_DRAIN_WARMUP: Duration = Duration::from_secs(1);

/// Settings loadable from JSON. Every field is optional in the input.
///
/// # Example
///
/// ```
/// use log4u::{LogLevel, LoggerSettings};
///
/// let settings = LoggerSettings::from_json_str(r#"{ "level": "warn", "queue_capacity": 64 }"#)
///     .unwrap();
/// assert_eq!(settings.level, LogLevel::Warn);
/// assert_eq!(settings.queue_capacity, 64);
/// assert!(settings.console);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Verbosity threshold; unknown names become `OUT`
    pub level: LogLevel,
    pub queue_capacity: usize,
    pub log_dir: PathBuf,
    pub file_name: String,
    /// Copy every line to stdout as well
    pub console: bool,
    /// ANSI colored level tags
    pub colored_prefixes: bool,
    pub drain_warmup_ms: u64,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Out,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            file_name: DEFAULT_LOG_FILE.to_string(),
            console: true,
            colored_prefixes: true,
            drain_warmup_ms: DEFAULT_DRAIN_WARMUP.as_millis() as u64,
        }
    }
}

impl LoggerSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger settings",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerSettings",
                "queue_capacity must be at least 1",
            ));
        }
        if self.file_name.is_empty() {
            return Err(LoggerError::config("LoggerSettings", "file_name is empty"));
        }
        Ok(())
    }

    pub fn drain_warmup(&self) -> Duration {
        Duration::from_millis(self.drain_warmup_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = LoggerSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, LoggerSettings::default());
        assert_eq!(settings.queue_capacity, 200);
        assert_eq!(settings.log_dir, PathBuf::from("log"));
        assert_eq!(settings.file_name, "log4u.log");
        assert_eq!(settings.drain_warmup(), Duration::from_secs(1));
    }

    #[test]
    fn test_unknown_level_normalizes_to_out() {
        let settings = LoggerSettings::from_json_str(r#"{ "level": "trace" }"#).unwrap();
        assert_eq!(settings.level, LogLevel::Out);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = LoggerSettings::from_json_str(r#"{ "queue_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = LoggerSettings::from_json_str("{ level: ").unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("log4u.json");
        std::fs::write(&path, r#"{ "level": "INFO", "console": false, "drain_warmup_ms": 5 }"#)
            .unwrap();

        let settings = LoggerSettings::from_json_file(&path).unwrap();
        assert_eq!(settings.level, LogLevel::Info);
        assert!(!settings.console);
        assert_eq!(settings.drain_warmup(), Duration::from_millis(5));

        let err = LoggerSettings::from_json_file(temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }
}
