//! Engine metrics for observability
//!
//! Counters for monitoring the buffering and dispatch engine: delivered
//! events, lossy discards, flush cycles, and isolated sink failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the buffering and dispatch engine
///
/// # Example
///
/// ```
/// use log_pipeline::EngineMetrics;
///
/// let metrics = EngineMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_discarded();
///
/// assert_eq!(metrics.delivered_count(), 1);
/// assert_eq!(metrics.discarded_count(), 1);
/// ```
#[derive(Debug)]
pub struct EngineMetrics {
    /// Number of events delivered to at least one appender
    delivered_count: AtomicU64,

    /// Number of events discarded by lossy ring-buffer eviction
    discarded_count: AtomicU64,

    /// Number of flush cycles (capacity, trigger, explicit or close)
    flush_count: AtomicU64,

    /// Number of isolated per-appender delivery failures
    sink_failure_count: AtomicU64,
}

impl EngineMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            delivered_count: AtomicU64::new(0),
            discarded_count: AtomicU64::new(0),
            flush_count: AtomicU64::new(0),
            sink_failure_count: AtomicU64::new(0),
        }
    }

    /// Get the number of delivered events
    #[inline]
    pub fn delivered_count(&self) -> u64 {
        self.delivered_count.load(Ordering::Relaxed)
    }

    /// Get the number of discarded events
    #[inline]
    pub fn discarded_count(&self) -> u64 {
        self.discarded_count.load(Ordering::Relaxed)
    }

    /// Get the number of flush cycles
    #[inline]
    pub fn flush_count(&self) -> u64 {
        self.flush_count.load(Ordering::Relaxed)
    }

    /// Get the number of isolated sink failures
    #[inline]
    pub fn sink_failure_count(&self) -> u64 {
        self.sink_failure_count.load(Ordering::Relaxed)
    }

    /// Record a delivered event
    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a discarded event
    #[inline]
    pub fn record_discarded(&self) -> u64 {
        self.discarded_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a flush cycle
    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flush_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an isolated sink failure
    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failure_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Get discard rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no events have been processed.
    pub fn discard_rate(&self) -> f64 {
        let discarded = self.discarded_count() as f64;
        let total = self.delivered_count() as f64 + discarded;
        if total == 0.0 {
            0.0
        } else {
            (discarded / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.delivered_count.store(0, Ordering::Relaxed);
        self.discarded_count.store(0, Ordering::Relaxed);
        self.flush_count.store(0, Ordering::Relaxed);
        self.sink_failure_count.store(0, Ordering::Relaxed);
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EngineMetrics {
    /// Create a snapshot of the current metric values
    fn clone(&self) -> Self {
        Self {
            delivered_count: AtomicU64::new(self.delivered_count()),
            discarded_count: AtomicU64::new(self.discarded_count()),
            flush_count: AtomicU64::new(self.flush_count()),
            sink_failure_count: AtomicU64::new(self.sink_failure_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = EngineMetrics::new();
        assert_eq!(metrics.delivered_count(), 0);
        assert_eq!(metrics.discarded_count(), 0);
        assert_eq!(metrics.flush_count(), 0);
        assert_eq!(metrics.sink_failure_count(), 0);
    }

    #[test]
    fn test_metrics_counters() {
        let metrics = EngineMetrics::new();
        metrics.record_delivered();
        metrics.record_delivered();
        metrics.record_discarded();
        metrics.record_flush();
        metrics.record_sink_failure();

        assert_eq!(metrics.delivered_count(), 2);
        assert_eq!(metrics.discarded_count(), 1);
        assert_eq!(metrics.flush_count(), 1);
        assert_eq!(metrics.sink_failure_count(), 1);
    }

    #[test]
    fn test_metrics_discard_rate() {
        let metrics = EngineMetrics::new();
        assert_eq!(metrics.discard_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        for _ in 0..10 {
            metrics.record_discarded();
        }

        let rate = metrics.discard_rate();
        assert!((9.9..=10.1).contains(&rate), "Discard rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = EngineMetrics::new();
        metrics.record_delivered();
        metrics.record_flush();

        metrics.reset();

        assert_eq!(metrics.delivered_count(), 0);
        assert_eq!(metrics.flush_count(), 0);
    }

    #[test]
    fn test_metrics_clone_snapshot() {
        let metrics = EngineMetrics::new();
        metrics.record_delivered();

        let snapshot = metrics.clone();
        metrics.record_delivered();

        assert_eq!(snapshot.delivered_count(), 1);
        assert_eq!(metrics.delivered_count(), 2);
    }
}
