//! Rotating file appender with size-based rotation
//!
//! Before every write the appender stats the live file. Once it has reached
//! `max_bytes`, the backups are renumbered (`app.log.1` becomes `app.log.2`,
//! and so on up to `backup_count`), the live file becomes `app.log.1`, and a
//! fresh file is opened. The stat, the rotation and the write happen under
//! one lock, so concurrent writers never rotate twice for the same overflow.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::log_entry::LogEntry;
use crate::core::output_format::format_line;
use crate::core::timestamp::TimestampFormat;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default maximum size of the live file (10 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of numbered backups kept
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Size-rotating file sink
///
/// # Examples
///
/// ```no_run
/// use mlog::appenders::RotatingFileAppender;
///
/// let sink = RotatingFileAppender::new("logs/app.log", 1024 * 1024, 3).unwrap();
/// sink.write(b"started\n").unwrap();
/// sink.close().unwrap();
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    /// `None` once closed
    file: Mutex<Option<File>>,
    rotations: AtomicU64,
    timestamp_format: TimestampFormat,
}

impl RotatingFileAppender {
    /// Open (or create) the log file, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_bytes` is zero, or if the directory or file
    /// cannot be created.
    pub fn new<P: AsRef<Path>>(path: P, max_bytes: u64, backup_count: usize) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if max_bytes == 0 {
            return Err(LoggerError::config(
                "RotatingFileAppender",
                "invalid max bytes: must be greater than zero",
            ));
        }

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = Self::open(&base_path).map_err(|e| {
            LoggerError::file_appender(
                base_path.display().to_string(),
                format!("Failed to open: {}", e),
            )
        })?;

        Ok(Self {
            base_path,
            max_bytes,
            backup_count,
            file: Mutex::new(Some(file)),
            rotations: AtomicU64::new(0),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Set the timestamp format used when appending entries
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn open(path: &Path) -> std::io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Write raw bytes, rotating first if the live file is full.
    ///
    /// Returns the number of bytes written, which is always `buf.len()`. If
    /// the backups could not be renumbered, the line is still written and
    /// the rename error is returned afterwards.
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        let mut guard = self.file.lock();

        let size = match guard.as_ref() {
            Some(file) => file
                .metadata()
                .map_err(|e| {
                    LoggerError::file_appender(
                        self.base_path.display().to_string(),
                        format!("Cannot access file metadata: {}", e),
                    )
                })?
                .len(),
            None => return Err(LoggerError::sink_closed(self.base_path.display().to_string())),
        };

        // A failed backup shift still leaves a live file to write to; report
        // the shift error only after the line is written.
        let mut shift_error = None;
        if self.should_rotate(size) {
            if let Err(e) = self.rotate(&mut guard) {
                if guard.is_none() {
                    return Err(e);
                }
                shift_error = Some(e);
            }
        }

        let file = guard
            .as_mut()
            .ok_or_else(|| LoggerError::sink_closed(self.base_path.display().to_string()))?;
        file.write_all(buf).map_err(|e| {
            LoggerError::file_appender(
                self.base_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;

        match shift_error {
            Some(e) => Err(e),
            None => Ok(buf.len()),
        }
    }

    fn should_rotate(&self, size: u64) -> bool {
        // max_bytes is validated in new(); zero still means "never rotate".
        self.max_bytes > 0 && self.backup_count > 0 && size >= self.max_bytes
    }

    /// Renumber backups and reopen the live file. Called with the lock held.
    fn rotate(&self, slot: &mut Option<File>) -> Result<()> {
        // Release the descriptor before renaming the file under it
        drop(slot.take());

        let shifted = self.shift_backups();

        // Reopen even if shifting failed so the appender stays usable
        let file = Self::open(&self.base_path).map_err(|e| {
            LoggerError::file_rotation(
                self.base_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;
        *slot = Some(file);

        shifted?;
        self.rotations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// `path.i` -> `path.i+1` from the oldest slot down, then `path` -> `path.1`.
    /// Whatever sat in `path.<backup_count>` is overwritten.
    fn shift_backups(&self) -> Result<()> {
        for i in (1..self.backup_count).rev() {
            Self::rename_over(&self.backup_path(i), &self.backup_path(i + 1))?;
        }
        Self::rename_over(&self.base_path, &self.backup_path(1))
    }

    fn rename_over(from: &Path, to: &Path) -> Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(first) => {
                // Some platforms refuse to rename over an existing file
                let _ = fs::remove_file(to);
                fs::rename(from, to).map_err(|_| {
                    LoggerError::file_rotation(
                        from.display().to_string(),
                        format!("Failed to rename to '{}': {}", to.display(), first),
                    )
                })
            }
        }
    }

    /// Flush OS buffers of the live file to stable storage. No-op when closed.
    pub fn sync(&self) -> Result<()> {
        if let Some(file) = self.file.lock().as_ref() {
            file.sync_all().map_err(|e| {
                LoggerError::io_operation(
                    "syncing log file",
                    self.base_path.display().to_string(),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// Close the live file. Closing an already closed appender is a no-op.
    pub fn close(&self) -> Result<()> {
        if let Some(file) = self.file.lock().take() {
            file.sync_all().map_err(|e| {
                LoggerError::io_operation(
                    "closing log file",
                    self.base_path.display().to_string(),
                    e,
                )
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.file.lock().is_some()
    }

    /// Get backup file path for given index
    #[must_use]
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.base_path.as_os_str().to_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    /// Size of the live file on disk, or 0 when closed
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.file
            .lock()
            .as_ref()
            .and_then(|f| f.metadata().ok())
            .map_or(0, |m| m.len())
    }

    /// Number of rotations performed since the appender was opened
    #[must_use]
    pub fn rotation_count(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    /// Get base path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    #[must_use]
    pub fn backup_count(&self) -> usize {
        self.backup_count
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "RotatingFileAppender"
    }

    fn append(&self, entry: &LogEntry) -> Result<()> {
        let line = format_line(entry, &self.timestamp_format, false);
        self.write(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Writes go straight to the file; there is no user-space buffer.
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            eprintln!("[LOGGER ERROR] Failed to close log file on drop: {}", e);
        }
    }
}
