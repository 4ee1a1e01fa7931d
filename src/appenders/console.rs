//! Console appender implementation

use crate::core::{format_line, Appender, ConsoleStream, LogEntry, LoggerError, Result, TimestampFormat};
use parking_lot::Mutex;
use std::io::Write;

/// Writes colored lines to stdout, stderr, or any injected writer.
pub struct ConsoleAppender {
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleAppender {
    pub fn new(stream: ConsoleStream) -> Self {
        match stream {
            ConsoleStream::Stdout => Self::stdout(),
            ConsoleStream::Stderr => Self::stderr(),
        }
    }

    pub fn stdout() -> Self {
        Self::from_writer("stdout", std::io::stdout())
    }

    pub fn stderr() -> Self {
        Self::from_writer("stderr", std::io::stderr())
    }

    /// Console appender over an arbitrary writer, e.g. an in-memory buffer
    ///
    /// # Example
    ///
    /// ```
    /// use mlog::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::from_writer("capture", Vec::new()).with_colors(false);
    /// ```
    pub fn from_writer<W: Write + Send + 'static>(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(Box::new(writer)),
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this appender
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let output = format_line(entry, &self.timestamp_format, self.use_colors);
        let mut writer = self.writer.lock();
        writer.write_all(output.as_bytes()).map_err(|e| {
            LoggerError::io_operation("writing to console", self.name.clone(), e)
        })?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
