//! High-water mark tracking for a budget.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct PeakTracker {
    peak_bytes: AtomicUsize,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self {
            peak_bytes: AtomicUsize::new(0),
        }
    }

    /// Record a new "used bytes" value; updates peak if higher.
    pub fn record_used(&self, used_bytes: usize) {
        let prev = self.peak_bytes.fetch_max(used_bytes, Ordering::AcqRel);
        if used_bytes > prev {
            trace_new_peak(used_bytes, prev);
        }
    }

    pub fn peak(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }
}

#[cfg(feature = "tracing")]
fn trace_new_peak(used_bytes: usize, previous_peak: usize) {
    tracing::trace!(used_bytes, previous_peak, "new memory peak");
}

#[cfg(not(feature = "tracing"))]
fn trace_new_peak(_used_bytes: usize, _previous_peak: usize) {}
