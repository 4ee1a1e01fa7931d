//! Serializable logger configuration

use super::error::Result;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use crate::appenders::rotating_file::{DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything needed to build a [`Logger`](crate::Logger)
///
/// Missing fields take their defaults, so a config file only needs the
/// fields it changes.
///
/// # Example
///
/// ```
/// use mlog::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{ "level": "warn", "path": "logs/app.log" }"#).unwrap();
/// assert_eq!(config.level, LogLevel::Warn);
/// assert_eq!(config.backup_count, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    /// Log file; `None` or an empty path disables file output
    pub path: Option<PathBuf>,
    pub max_bytes: u64,
    pub backup_count: usize,
    /// Color console messages by severity
    pub colors: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            path: None,
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
            colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// File path, if file output is enabled
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.path.as_ref().filter(|p| !p.as_os_str().is_empty())
    }
}
