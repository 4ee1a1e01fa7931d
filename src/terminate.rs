//! Top-level handling of unrecoverable logger outcomes
//!
//! The [`Logger`](crate::Logger) never exits the process. Fatal log calls and
//! logger failures come back as [`LoggerError`]s; this module is where they
//! are turned into an exit status.

use crate::core::error::{LoggerError, Result};

/// Exit with the status matching `err`.
///
/// A fatal log call exits with 255. Any other error is a logger failure: a
/// diagnostic is printed to stderr and the process exits with 1.
pub fn terminate(err: LoggerError) -> ! {
    if !err.is_fatal_log() {
        eprintln!("mlog: {}", err);
    }
    std::process::exit(err.exit_code())
}

/// Unwrap `result`, terminating the process on error.
pub fn exit_on_error<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => terminate(err),
    }
}
