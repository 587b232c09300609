//! Cache Statistics Module
//!
//! Reports document occupancy and per-store read counters.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of a cache file plus the reads served by one store instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful reads through this store
    pub hits: u64,
    /// Number of reads that found the key absent or expired
    pub misses: u64,
    /// Items currently stored, expired or not
    pub total_entries: usize,
    /// Items past their expiration but not yet collected
    pub expired_entries: usize,
    /// Tags with at least one member
    pub tags: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Entries that a read would still return.
    pub fn live_entries(&self) -> usize {
        self.total_entries.saturating_sub(self.expired_entries)
    }
}
