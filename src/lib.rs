//! # mlog
//!
//! A small leveled logger with console routing and size-based log rotation.
//!
//! ## Features
//!
//! - **Level routing**: a configured minimum level decides which severity
//!   channels reach stdout/stderr, the log file, both, or nowhere
//! - **Rotating file**: `app.log` rolls over to `app.log.1` … `app.log.N`
//!   once it reaches a size limit
//! - **Thread safe**: lines from concurrent callers never interleave, and a
//!   burst of writers crossing the limit rotates exactly once
//! - **Explicit failure**: fatal logs and logger failures are returned as
//!   errors; [`terminate`] turns them into exit statuses
//!
//! ```no_run
//! use mlog::prelude::*;
//!
//! let logger = Logger::start(LogLevel::Trace, "app.log")?;
//! mlog::trace!(logger, "hello {}", "world")?;
//! logger.close()?;
//! # Ok::<(), mlog::LoggerError>(())
//! ```

pub mod append;
pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;
pub mod terminate;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender};
    pub use crate::core::{
        Appender, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Result, Severity, TimestampFormat,
    };
}

pub use append::{append, appendln};
pub use appenders::{ConsoleAppender, RotatingFileAppender};
pub use core::{
    Appender, ConsoleStream, Destination, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, Result, RoutingTable, Severity, TimestampFormat,
    format_line, FATAL_EXIT_CODE, INTERNAL_FAILURE_EXIT_CODE,
};
