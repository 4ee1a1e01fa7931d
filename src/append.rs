//! One-shot append helpers
//!
//! These open the target file, write, and close it again. They bypass level
//! routing and rotation, and their I/O errors are returned to the caller.

use crate::core::error::{LoggerError, Result};
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

fn write_to<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::io_operation("opening file for append", path.display().to_string(), e)
        })?;
    file.write_all(content.as_bytes()).map_err(|e| {
        LoggerError::io_operation("appending to file", path.display().to_string(), e)
    })?;
    Ok(())
}

/// Append `content` to `path` as is, creating the file if needed.
///
/// # Example
///
/// ```no_run
/// mlog::append("test.log", format_args!("{} - {}", "Hello", "World")).unwrap();
/// ```
pub fn append<P: AsRef<Path>>(path: P, content: impl Display) -> Result<()> {
    write_to(path, &content.to_string())
}

/// Append `content` followed by a newline to `path`, creating the file if needed.
pub fn appendln<P: AsRef<Path>>(path: P, content: impl Display) -> Result<()> {
    write_to(path, &format!("{}\n", content))
}
