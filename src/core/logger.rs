//! Main logger implementation

use super::{
    appender::Appender,
    config::LoggerConfig,
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::{LogLevel, Severity},
    metrics::LoggerMetrics,
    routing::{ConsoleStream, Destination, RoutingTable},
    timestamp::TimestampFormat,
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use parking_lot::Mutex;
use std::fmt::Display;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One severity channel: its destination and the writer lock that keeps a
/// tee'd line together.
struct Channel {
    destination: Destination,
    console: Option<Arc<ConsoleAppender>>,
    lock: Mutex<()>,
}

/// A configured leveled logger
///
/// Routing is fixed at construction. To change the level or the file,
/// build a new logger.
///
/// # Example
///
/// ```no_run
/// use mlog::{LogLevel, Logger};
///
/// let logger = Logger::start(LogLevel::Info, "logs/app.log").unwrap();
/// logger.info(format_args!("listening on port {}", 8080)).unwrap();
/// logger.close().unwrap();
/// ```
pub struct Logger {
    routing: RoutingTable,
    channels: [Channel; 5],
    file: Option<Arc<RotatingFileAppender>>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with default rotation settings (10 MiB, 5 backups).
    /// An empty `path` disables file output.
    pub fn start(level: LogLevel, path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(level).file(path.as_ref()).build()
    }

    pub fn start_ex(
        level: LogLevel,
        path: impl AsRef<Path>,
        max_bytes: u64,
        backup_count: usize,
    ) -> Result<Self> {
        Self::builder(level)
            .file(path.as_ref())
            .max_bytes(max_bytes)
            .backup_count(backup_count)
            .build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use mlog::prelude::*;
    ///
    /// let logger = Logger::builder(LogLevel::Warn).colors(false).build().unwrap();
    /// assert_eq!(logger.level(), LogLevel::Warn);
    /// ```
    #[must_use]
    pub fn builder(level: LogLevel) -> LoggerBuilder {
        LoggerBuilder::new(level)
    }

    pub fn level(&self) -> LogLevel {
        self.routing.level()
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    /// The rotating file sink shared by every file-bound channel
    pub fn file_appender(&self) -> Option<&Arc<RotatingFileAppender>> {
        self.file.as_ref()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether an emit at `severity` reaches any destination
    pub fn is_enabled(&self, severity: Severity) -> bool {
        !self.channels[severity.index()].destination.is_discard()
    }

    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl Display) -> Result<()> {
        self.log_at(severity, message, Location::caller())
    }

    pub(crate) fn log_at(
        &self,
        severity: Severity,
        message: impl Display,
        location: &'static Location<'static>,
    ) -> Result<()> {
        let channel = &self.channels[severity.index()];
        if channel.destination.is_discard() {
            self.metrics.record_discarded();
            return Ok(());
        }

        let entry = LogEntry::at(severity, message.to_string(), location);

        let _guard = channel.lock.lock();
        let mut outcome = Ok(());

        if channel.destination.writes_file() {
            if let Some(ref file) = self.file {
                outcome = file.append(&entry);
            }
        }
        if let Some(ref console) = channel.console {
            let written = console.append(&entry);
            if outcome.is_ok() {
                outcome = written;
            }
        }

        match outcome {
            Ok(()) => {
                self.metrics.record_written();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failure();
                Err(e)
            }
        }
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Display) -> Result<()> {
        self.log_at(Severity::Trace, message, Location::caller())
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Display) -> Result<()> {
        self.log_at(Severity::Info, message, Location::caller())
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl Display) -> Result<()> {
        self.log_at(Severity::Warn, message, Location::caller())
    }

    /// Log an error value on the error channel
    #[inline]
    #[track_caller]
    pub fn error(&self, err: impl Display) -> Result<()> {
        self.log_at(Severity::Error, err, Location::caller())
    }

    /// Log the error of `result`, if any
    #[track_caller]
    pub fn if_error<T, E: Display>(&self, result: &std::result::Result<T, E>) -> Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) => self.log_at(Severity::Error, e, Location::caller()),
        }
    }

    /// Log on the fatal channel and sync the log file.
    ///
    /// Returns the [`LoggerError::Fatal`] the caller must act on; use
    /// [`terminate`](crate::terminate::terminate) to exit with status 255.
    ///
    /// ```no_run
    /// # use mlog::prelude::*;
    /// # let logger = Logger::start(LogLevel::Error, "").unwrap();
    /// mlog::terminate::terminate(logger.fatal("configuration missing"));
    /// ```
    #[must_use = "a fatal log must be propagated or handed to terminate()"]
    #[track_caller]
    pub fn fatal(&self, message: impl Display) -> LoggerError {
        self.fatal_at(message, Location::caller())
    }

    /// Like [`fatal`](Self::fatal) for the error of `result`; `Ok` is a no-op.
    #[track_caller]
    pub fn fatal_if_error<T, E: Display>(&self, result: &std::result::Result<T, E>) -> Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(self.fatal_at(e, Location::caller())),
        }
    }

    pub(crate) fn fatal_at(
        &self,
        message: impl Display,
        location: &'static Location<'static>,
    ) -> LoggerError {
        let message = message.to_string();

        // The process is going down either way; report, do not escalate
        if let Err(e) = self.log_at(Severity::Fatal, &message, location) {
            eprintln!("[LOGGER ERROR] Failed to write fatal log line: {}", e);
        }
        if let Err(e) = self.sync() {
            eprintln!("[LOGGER ERROR] Failed to sync log file: {}", e);
        }

        LoggerError::fatal(message)
    }

    /// Flush console writers and sync the log file to stable storage
    pub fn sync(&self) -> Result<()> {
        for channel in &self.channels {
            if let Some(ref console) = channel.console {
                console.flush()?;
            }
        }
        if let Some(ref file) = self.file {
            file.sync()?;
        }
        Ok(())
    }

    /// Close the log file. Later file-bound emits fail with `SinkClosed`.
    pub fn close(&self) -> Result<()> {
        match self.file {
            Some(ref file) => file.close(),
            None => Ok(()),
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use mlog::prelude::*;
///
/// let logger = Logger::builder(LogLevel::Trace)
///     .file("logs/app.log")
///     .max_bytes(1024 * 1024)
///     .backup_count(3)
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    stdout: Option<ConsoleAppender>,
    stderr: Option<ConsoleAppender>,
}

impl LoggerBuilder {
    pub fn new(level: LogLevel) -> Self {
        Self::from_config(LoggerConfig {
            level,
            ..LoggerConfig::default()
        })
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            stdout: None,
            stderr: None,
        }
    }

    /// Log file path; an empty path means no file
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_bytes(mut self, max_bytes: u64) -> Self {
        self.config.max_bytes = max_bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn backup_count(mut self, backup_count: usize) -> Self {
        self.config.backup_count = backup_count;
        self
    }

    /// Color console messages (default `true`). Ignored for appenders set
    /// through [`stdout`](Self::stdout) / [`stderr`](Self::stderr).
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, colors: bool) -> Self {
        self.config.colors = colors;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Replace the appender used for stdout-bound channels
    #[must_use = "builder methods return a new value"]
    pub fn stdout(mut self, appender: ConsoleAppender) -> Self {
        self.stdout = Some(appender);
        self
    }

    /// Replace the appender used for stderr-bound channels
    #[must_use = "builder methods return a new value"]
    pub fn stderr(mut self, appender: ConsoleAppender) -> Self {
        self.stderr = Some(appender);
        self
    }

    /// Build the Logger, opening the log file if one is configured
    ///
    /// # Errors
    ///
    /// Fails if `max_bytes` is zero, the timestamp layout is not a valid
    /// strftime string, or the log file cannot be created.
    pub fn build(self) -> Result<Logger> {
        let config = self.config;
        config.timestamp_format.validate()?;

        let file = match config.file_path() {
            Some(path) => Some(Arc::new(
                RotatingFileAppender::new(path, config.max_bytes, config.backup_count)?
                    .with_timestamp_format(config.timestamp_format.clone()),
            )),
            None => None,
        };

        let console = |stream: ConsoleStream| {
            ConsoleAppender::new(stream)
                .with_colors(config.colors)
                .with_timestamp_format(config.timestamp_format.clone())
        };
        let stdout = Arc::new(
            self.stdout
                .unwrap_or_else(|| console(ConsoleStream::Stdout)),
        );
        let stderr = Arc::new(
            self.stderr
                .unwrap_or_else(|| console(ConsoleStream::Stderr)),
        );

        let routing = RoutingTable::new(config.level, file.is_some());
        let channels = std::array::from_fn(|i| {
            let destination = routing.route(Severity::ALL[i]);
            let console = destination.console().map(|stream| match stream {
                ConsoleStream::Stdout => Arc::clone(&stdout),
                ConsoleStream::Stderr => Arc::clone(&stderr),
            });
            Channel {
                destination,
                console,
                lock: Mutex::new(()),
            }
        });

        Ok(Logger {
            routing,
            channels,
            file,
            metrics: LoggerMetrics::new(),
        })
    }
}
