//! Log entry structure

use super::log_level::Severity;
use chrono::{DateTime, Local};
use std::panic::Location;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub file: &'static str,
    pub line: u32,
}

impl LogEntry {
    /// Keep one emit on one line.
    ///
    /// A single trailing newline is dropped (the formatter adds its own);
    /// any other line breaks are escaped.
    fn sanitize_message(message: &str) -> String {
        let message = message
            .strip_suffix("\r\n")
            .or_else(|| message.strip_suffix('\n'))
            .unwrap_or(message);
        message.replace('\r', "\\r").replace('\n', "\\n")
    }

    #[track_caller]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self::at(severity, message, Location::caller())
    }

    pub fn at(
        severity: Severity,
        message: impl Into<String>,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            severity,
            message: Self::sanitize_message(&message.into()),
            timestamp: Local::now(),
            file: location.file(),
            line: location.line(),
        }
    }

    /// File name of the call site without its directories, like `main.rs`
    pub fn short_file(&self) -> &'static str {
        self.file
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(self.file)
    }
}
