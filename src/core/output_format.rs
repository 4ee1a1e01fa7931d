//! Line layout for log entries
//!
//! Every destination writes the same layout:
//!
//! `I: 2025/01/08 10:30:45 main.rs:42: Request processed`
//!
//! Console destinations may additionally wrap the message in the severity's
//! ANSI color; file destinations never do.

use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use colored::Colorize;

/// Format an entry as one newline-terminated line
pub fn format_line(entry: &LogEntry, timestamp_format: &TimestampFormat, use_colors: bool) -> String {
    let message = if use_colors {
        entry
            .message
            .color(entry.severity.color_code())
            .to_string()
    } else {
        entry.message.clone()
    };

    format!(
        "{}: {} {}:{}: {}\n",
        entry.severity.tag(),
        timestamp_format.format(&entry.timestamp),
        entry.short_file(),
        entry.line,
        message
    )
}
