//! Appender implementations

pub mod console;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use rotating_file::{RotatingFileAppender, DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES};

pub use crate::core::Appender;
