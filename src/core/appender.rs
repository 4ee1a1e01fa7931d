//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A sink that accepts log entries.
///
/// Appenders are shared between severity channels, so they take `&self`
/// and serialize writes internally.
pub trait Appender: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
