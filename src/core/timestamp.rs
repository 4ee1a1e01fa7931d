//! Timestamp formatting utilities
//!
//! Log lines carry a local wall-clock timestamp. The default layout is the
//! classic `2025/01/08 10:30:45`; ISO 8601, RFC 3339 and strftime layouts are
//! available through configuration.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp layout options
///
/// # Examples
///
/// ```
/// use mlog::core::TimestampFormat;
/// use chrono::Local;
///
/// let stamp = TimestampFormat::Classic.format(&Local::now());
/// assert_eq!(stamp.len(), "2025/01/08 10:30:45".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025/01/08 10:30:45` in local time
    #[default]
    Classic,

    /// `2025/01/08 10:30:45.123456` in local time
    ClassicMicros,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 with the local offset: `2025-01-08T10:30:45+01:00`
    Rfc3339,

    /// Custom strftime format, applied to local time
    ///
    /// ```
    /// use mlog::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a local timestamp according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Classic => datetime.format("%Y/%m/%d %H:%M:%S").to_string(),
            TimestampFormat::ClassicMicros => {
                datetime.format("%Y/%m/%d %H:%M:%S%.6f").to_string()
            }
            TimestampFormat::Iso8601 => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                // An unchecked layout with bad specifiers falls back to Classic
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::Classic.format(datetime),
                }
            }
        }
    }

    /// Reject custom layouts chrono cannot render, such as `%Q`
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = self {
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "TimestampFormat",
                    format!("invalid strftime layout '{}'", format_str),
                ));
            }
        }
        Ok(())
    }
}
