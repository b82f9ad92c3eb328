//! Metrics hooks for pool operations
//!
//! Thread-safe counters for monitoring allocation behavior and node
//! accounting. The node gauge mirrors the trie's materialized-node count,
//! so teardown accounting can be checked without external tooling.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

/// Metrics collector for address pool operations
#[derive(Debug, Default)]
pub struct PoolMetrics {
    /// Successful allocations, preferred or forced
    pub allocations: AtomicU64,
    /// Allocations where the fallback granted a different address
    pub forced_allocations: AtomicU64,
    /// Successful frees
    pub frees: AtomicU64,
    /// Rejected frees of unallocated addresses
    pub double_frees: AtomicU64,
    /// Allocations rejected because the pool was exhausted
    pub exhaustions: AtomicU64,
    /// Allocations rejected by the node budget
    pub budget_failures: AtomicU64,
    /// Current materialized trie nodes
    pub nodes_materialized: AtomicUsize,
}

impl PoolMetrics {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a point-in-time snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            allocations: self.allocations.load(Ordering::Relaxed),
            forced_allocations: self.forced_allocations.load(Ordering::Relaxed),
            frees: self.frees.load(Ordering::Relaxed),
            double_frees: self.double_frees.load(Ordering::Relaxed),
            exhaustions: self.exhaustions.load(Ordering::Relaxed),
            budget_failures: self.budget_failures.load(Ordering::Relaxed),
            nodes_materialized: self.nodes_materialized.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.allocations.store(0, Ordering::Relaxed);
        self.forced_allocations.store(0, Ordering::Relaxed);
        self.frees.store(0, Ordering::Relaxed);
        self.double_frees.store(0, Ordering::Relaxed);
        self.exhaustions.store(0, Ordering::Relaxed);
        self.budget_failures.store(0, Ordering::Relaxed);
        self.nodes_materialized.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub allocations: u64,
    pub forced_allocations: u64,
    pub frees: u64,
    pub double_frees: u64,
    pub exhaustions: u64,
    pub budget_failures: u64,
    pub nodes_materialized: usize,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to integrate with an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    /// Record a successful allocation. `forced` is true when the fallback
    /// granted an address other than the preferred one.
    fn record_allocation(&self, forced: bool);

    /// Record an allocation rejected because the pool was exhausted.
    fn record_exhaustion(&self);

    /// Record an allocation rejected by the node budget.
    fn record_budget_failure(&self);

    /// Record a successful free.
    fn record_free(&self);

    /// Record a rejected free of an unallocated address.
    fn record_double_free(&self);

    /// Record the current materialized node count.
    fn record_nodes(&self, count: usize);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_allocation(&self, _: bool) {}
    fn record_exhaustion(&self) {}
    fn record_budget_failure(&self) {}
    fn record_free(&self) {}
    fn record_double_free(&self) {}
    fn record_nodes(&self, _: usize) {}
}

impl MetricsRecorder for PoolMetrics {
    fn record_allocation(&self, forced: bool) {
        self.allocations.fetch_add(1, Ordering::Relaxed);
        if forced {
            self.forced_allocations.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_exhaustion(&self) {
        self.exhaustions.fetch_add(1, Ordering::Relaxed);
    }

    fn record_budget_failure(&self) {
        self.budget_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn record_free(&self) {
        self.frees.fetch_add(1, Ordering::Relaxed);
    }

    fn record_double_free(&self) {
        self.double_frees.fetch_add(1, Ordering::Relaxed);
    }

    fn record_nodes(&self, count: usize) {
        self.nodes_materialized.store(count, Ordering::Relaxed);
    }
}
