//! Fetch cycle counters.
//!
//! Lock-free atomics written by the fetcher thread and read by the
//! dashboard through [`FetchMetrics::snapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing the fetcher's history.
#[derive(Debug, Default)]
pub struct FetchMetrics {
    cycles_published: AtomicU64,
    cycles_skipped: AtomicU64,
    consecutive_failures: AtomicU64,
    last_flight_count: AtomicU64,
}

/// Point-in-time copy of [`FetchMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchMetricsSnapshot {
    pub cycles_published: u64,
    pub cycles_skipped: u64,
    pub consecutive_failures: u64,
    pub last_flight_count: u64,
}

impl FetchMetricsSnapshot {
    pub fn total_cycles(&self) -> u64 {
        self.cycles_published + self.cycles_skipped
    }
}

impl FetchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_published(&self, flights: usize) {
        self.cycles_published.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
        self.last_flight_count
            .store(flights as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_skipped(&self) {
        self.cycles_skipped.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FetchMetricsSnapshot {
        FetchMetricsSnapshot {
            cycles_published: self.cycles_published.load(Ordering::Relaxed),
            cycles_skipped: self.cycles_skipped.load(Ordering::Relaxed),
            consecutive_failures: self.consecutive_failures.load(Ordering::Relaxed),
            last_flight_count: self.last_flight_count.load(Ordering::Relaxed),
        }
    }
}
