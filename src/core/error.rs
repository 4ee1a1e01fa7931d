//! Error types for the logger system

/// Exit status used when a fatal log line has been emitted.
pub const FATAL_EXIT_CODE: i32 = 255;

/// Exit status used when the logger itself fails (bad configuration, failed write).
pub const INTERNAL_FAILURE_EXIT_CODE: i32 = 1;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Write attempted after the sink was closed
    #[error("Log file '{path}' is closed")]
    SinkClosed { path: String },

    /// A fatal line was logged; the caller is expected to terminate
    #[error("fatal: {message}")]
    Fatal { message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn sink_closed(path: impl Into<String>) -> Self {
        LoggerError::SinkClosed { path: path.into() }
    }

    pub fn fatal<S: Into<String>>(msg: S) -> Self {
        LoggerError::Fatal {
            message: msg.into(),
        }
    }

    /// Whether this error is the outcome of a fatal log call rather than a failure
    pub fn is_fatal_log(&self) -> bool {
        matches!(self, LoggerError::Fatal { .. })
    }

    /// Process exit status a top-level handler should use for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal_log() {
            FATAL_EXIT_CODE
        } else {
            INTERNAL_FAILURE_EXIT_CODE
        }
    }
}
