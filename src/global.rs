//! Process-wide logger
//!
//! A thin facade over one shared [`Logger`] for programs that want to log
//! from anywhere without passing a handle around. Unlike the handle API,
//! these functions do not return logger failures: a logger that cannot
//! write terminates the process (status 1), and fatal calls exit with 255.
//!
//! ```no_run
//! use mlog::{global, LogLevel};
//!
//! global::start(LogLevel::Trace, "app.log");
//! global::trace(format_args!("hello {}", "world"));
//! global::stop().unwrap();
//! ```

use crate::appenders::rotating_file::{DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES};
use crate::core::error::{LoggerError, Result};
use crate::core::log_level::{LogLevel, Severity};
use crate::core::logger::Logger;
use crate::terminate::{exit_on_error, terminate};
use parking_lot::RwLock;
use std::fmt::{self, Display};
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const NO_LEVEL: u8 = u8::MAX;

static LOGGER: RwLock<Option<Arc<Logger>>> = parking_lot::const_rwlock(None);
static LEVEL: AtomicU8 = AtomicU8::new(NO_LEVEL);

/// Start logging with the default rotation settings (10 MiB, 5 backups).
///
/// An empty `path` logs to the console only. Exits the process with status
/// 1 if the log file cannot be set up.
pub fn start(level: LogLevel, path: impl AsRef<Path>) {
    start_ex(level, path, DEFAULT_MAX_BYTES, DEFAULT_BACKUP_COUNT);
}

/// Start logging with explicit rotation settings.
pub fn start_ex(level: LogLevel, path: impl AsRef<Path>, max_bytes: u64, backup_count: usize) {
    let logger = exit_on_error(Logger::start_ex(level, path, max_bytes, backup_count));
    install(logger);
}

/// Make `logger` the process-wide logger, returning the one it replaces.
///
/// The previous logger is not merged into the new one; its file is closed
/// once the last handle to it is dropped.
pub fn install(logger: Logger) -> Option<Arc<Logger>> {
    let level = logger.level();
    let previous = LOGGER.write().replace(Arc::new(logger));
    LEVEL.store(level as u8, Ordering::Release);
    previous
}

/// Close the log file and remove the process-wide logger.
///
/// Emits after `stop` are dropped until the next `start`, and so are emits
/// still in flight on another thread when `stop` closes the file.
pub fn stop() -> Result<()> {
    let previous = LOGGER.write().take();
    LEVEL.store(NO_LEVEL, Ordering::Release);
    match previous {
        Some(logger) => logger.close(),
        None => Ok(()),
    }
}

/// Sync the current log file to stable storage
pub fn sync() -> Result<()> {
    match logger() {
        Some(logger) => logger.sync(),
        None => Ok(()),
    }
}

/// Level of the running logger, `None` if not started
pub fn level() -> Option<LogLevel> {
    LogLevel::from_u8(LEVEL.load(Ordering::Acquire))
}

/// Handle to the running logger
pub fn logger() -> Option<Arc<Logger>> {
    LOGGER.read().clone()
}

fn emit(severity: Severity, message: impl Display, location: &'static Location<'static>) {
    // Clone out of the lock so a slow write never blocks stop()
    if let Some(logger) = logger() {
        exit_on_error(deliver(&logger, severity, message, location));
    }
}

/// Write through `logger`, treating a sink closed by `stop` as a dropped line
fn deliver(
    logger: &Arc<Logger>,
    severity: Severity,
    message: impl Display,
    location: &'static Location<'static>,
) -> Result<()> {
    match logger.log_at(severity, message, location) {
        Err(LoggerError::SinkClosed { .. }) if !is_installed(logger) => Ok(()),
        outcome => outcome,
    }
}

fn is_installed(logger: &Arc<Logger>) -> bool {
    LOGGER
        .read()
        .as_ref()
        .is_some_and(|current| Arc::ptr_eq(current, logger))
}

#[track_caller]
pub fn trace(message: impl Display) {
    emit(Severity::Trace, message, Location::caller());
}

#[track_caller]
pub fn info(message: impl Display) {
    emit(Severity::Info, message, Location::caller());
}

#[track_caller]
pub fn warning(message: impl Display) {
    emit(Severity::Warn, message, Location::caller());
}

#[track_caller]
pub fn error(err: impl Display) {
    emit(Severity::Error, err, Location::caller());
}

#[track_caller]
pub fn if_error<T, E: Display>(result: &std::result::Result<T, E>) {
    if let Err(e) = result {
        emit(Severity::Error, e, Location::caller());
    }
}

fn fatal_at(message: impl Display, location: &'static Location<'static>) -> ! {
    let decision = match logger() {
        Some(logger) => logger.fatal_at(message, location),
        None => {
            eprintln!("F: {}", message);
            LoggerError::fatal(message.to_string())
        }
    };
    terminate(decision)
}

/// Log the values on the fatal channel, sync, and exit with status 255.
#[track_caller]
pub fn fatal(message: impl Display) -> ! {
    fatal_at(message, Location::caller())
}

/// Formatted variant of [`fatal`]: `global::fatalf(format_args!("bad {}", x))`.
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    fatal_at(args, Location::caller())
}

/// Exit through [`fatal`] if `result` is an error; `Ok` is a no-op.
#[track_caller]
pub fn fatal_if_error<T, E: Display>(result: &std::result::Result<T, E>) {
    if let Err(e) = result {
        fatal_at(e, Location::caller());
    }
}
