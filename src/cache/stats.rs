//! Cache Statistics Module
//!
//! Tracks price cache usage during one run.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered with a fresh price
    pub hits: u64,
    /// Lookups with no record or a stale one
    pub misses: u64,
    /// Records added for ids not seen before
    pub inserts: u64,
    /// Existing records overwritten with a newer observation
    pub refreshes: u64,
    /// Current number of records in the cache
    pub total_records: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups were made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn set_total_records(&mut self, count: usize) {
        self.total_records = count;
    }
}
