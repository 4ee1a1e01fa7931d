//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod routing;
pub mod timestamp;

pub use appender::Appender;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result, FATAL_EXIT_CODE, INTERNAL_FAILURE_EXIT_CODE};
pub use log_entry::LogEntry;
pub use log_level::{LogLevel, Severity};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::format_line;
pub use routing::{console_severities, ConsoleStream, Destination, RoutingTable};
pub use timestamp::TimestampFormat;
