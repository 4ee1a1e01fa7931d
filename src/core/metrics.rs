//! Logger metrics
//!
//! Counters for emitted lines, lines dropped by routing, and failed writes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a [`Logger`](crate::Logger)
///
/// # Example
///
/// ```
/// use mlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_discarded();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.lines_discarded(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines delivered to at least one destination
    lines_written: AtomicU64,

    /// Emits whose channel was routed to nowhere
    lines_discarded: AtomicU64,

    /// Emits that failed to reach one of their destinations
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            lines_discarded: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_discarded(&self) -> u64 {
        self.lines_discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Record a delivered line, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_discarded(&self) -> u64 {
        self.lines_discarded.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            lines_written: AtomicU64::new(self.lines_written()),
            lines_discarded: AtomicU64::new(self.lines_discarded()),
            write_failures: AtomicU64::new(self.write_failures()),
        }
    }
}
