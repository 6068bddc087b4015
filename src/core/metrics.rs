//! Logger metrics for observability
//!
//! Atomic counters for monitoring dispatcher health: entries delivered,
//! entries suppressed by the level gate, and transport failures.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries handed to at least one transport
    total_logged: AtomicU64,

    /// Entries suppressed by the level gate before any processing
    suppressed_count: AtomicU64,

    /// Transport log() calls that returned an error or panicked
    transport_errors: AtomicU64,

    /// Sensitive-logging requests rejected by approval validation
    rejected_approvals: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            suppressed_count: AtomicU64::new(0),
            transport_errors: AtomicU64::new(0),
            rejected_approvals: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn transport_errors(&self) -> u64 {
        self.transport_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_approvals(&self) -> u64 {
        self.rejected_approvals.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_transport_error(&self) -> u64 {
        self.transport_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected_approval(&self) -> u64 {
        self.rejected_approvals.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.suppressed_count.store(0, Ordering::Relaxed);
        self.transport_errors.store(0, Ordering::Relaxed);
        self.rejected_approvals.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
