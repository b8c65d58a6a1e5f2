//! Cache Statistics Module
//!
//! Counters for how useful the path cache is: lookups answered without a
//! filesystem search, and entries lost to capacity pressure or to a
//! `cache.pathCount` reduction.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to a filesystem search
    pub misses: u64,
    /// Oldest entries dropped to make room for a new source path
    pub evictions: u64,
    /// Entries dropped because the capacity was lowered
    pub shrink_evictions: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of lookups that skipped the filesystem, 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_shrink_eviction(&mut self) {
        self.shrink_evictions += 1;
    }
}
