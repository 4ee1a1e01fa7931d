//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The call site of
//! the macro is what ends up in the line's `file.rs:line` tag.
//!
//! # Examples
//!
//! ```
//! use mlog::prelude::*;
//! use mlog::info;
//!
//! let logger = Logger::builder(LogLevel::Info).build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//! ```

/// Log a message at the given severity.
///
/// # Examples
///
/// ```
/// # use mlog::prelude::*;
/// # let logger = Logger::builder(LogLevel::Info).build().unwrap();
/// use mlog::log;
/// log!(logger, Severity::Info, "Simple message").unwrap();
/// log!(logger, Severity::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, format_args!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use mlog::prelude::*;
/// # let logger = Logger::builder(LogLevel::Trace).build().unwrap();
/// use mlog::trace;
/// trace!(logger, "Entering function: calculate()").unwrap();
/// trace!(logger, "Variable value: {}", 42).unwrap();
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Trace, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning.
///
/// # Examples
///
/// ```
/// # use mlog::prelude::*;
/// # let logger = Logger::builder(LogLevel::Info).build().unwrap();
/// use mlog::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5).unwrap();
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal message and evaluate to the `LoggerError` to exit with.
///
/// # Examples
///
/// ```no_run
/// # use mlog::prelude::*;
/// # let logger = Logger::builder(LogLevel::Error).build().unwrap();
/// use mlog::fatal;
/// let decision = fatal!(logger, "Unable to recover from error: {}", "disk full");
/// mlog::terminate::terminate(decision);
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format_args!($($arg)+))
    };
}

/// Append a formatted string to a file without a trailing newline.
///
/// ```no_run
/// mlog::append!("test.log", "{} - {}", "Hello", "World").unwrap();
/// ```
#[macro_export]
macro_rules! append {
    ($path:expr, $($arg:tt)+) => {
        $crate::append::append($path, format_args!($($arg)+))
    };
}

/// Append a formatted line to a file.
#[macro_export]
macro_rules! appendln {
    ($path:expr, $($arg:tt)+) => {
        $crate::append::appendln($path, format_args!($($arg)+))
    };
}
