//! Logger metrics for observability
//!
//! Counters for monitoring how entries flow through a logger: how many were
//! written, filtered out by level, lost to handler failures, or accepted by
//! no handler at all.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use logging_tour::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.emitted_count(), 1);
/// assert_eq!(metrics.filtered_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries written by at least one handler without error
    emitted: AtomicU64,

    /// Calls rejected by the logger's effective level
    filtered: AtomicU64,

    /// Entries for which at least one handler failed
    handler_errors: AtomicU64,

    /// Entries that no handler in the logger chain accepted, either because
    /// there were none or because every handler's level rejected them
    unhandled: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            handler_errors: AtomicU64::new(0),
            unhandled: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_error_count(&self) -> u64 {
        self.handler_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn unhandled_count(&self) -> u64 {
        self.unhandled.load(Ordering::Relaxed)
    }

    /// Record a written entry, returning the previous count
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handler_error(&self) -> u64 {
        self.handler_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_unhandled(&self) -> u64 {
        self.unhandled.fetch_add(1, Ordering::Relaxed)
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
            emitted: AtomicU64::new(self.emitted_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            handler_errors: AtomicU64::new(self.handler_error_count()),
            unhandled: AtomicU64::new(self.unhandled_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.emitted_count(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.handler_error_count(), 0);
        assert_eq!(metrics.unhandled_count(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_emitted(), 0);
        assert_eq!(metrics.record_emitted(), 1);
        assert_eq!(metrics.emitted_count(), 2);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_filtered();

        let snapshot = metrics.clone();
        metrics.record_filtered();

        assert_eq!(metrics.filtered_count(), 2);
        assert_eq!(snapshot.filtered_count(), 1);
    }
}
