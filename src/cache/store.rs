//! Path Cache Module
//!
//! Bounded map from a source file path to its resolved friend file path,
//! evicting the oldest inserted entry when over capacity.

use std::collections::HashMap;

use crate::cache::{CacheStats, FifoTracker};

// == Path Cache ==
/// Fixed-capacity, insertion-ordered path cache.
///
/// Eviction is strict FIFO: reads never promote an entry and overwriting an
/// existing key keeps its original position. A capacity of zero disables the
/// cache, every `set` is then a no-op.
#[derive(Debug)]
pub struct PathCache {
    /// Source path -> friend path
    entries: HashMap<String, String>,
    /// Insertion order tracker
    order: FifoTracker,
    /// Diagnostic counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl PathCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: FifoTracker::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Get ==
    /// Returns the cached friend path for `key`.
    ///
    /// Pure lookup: neither eviction order nor statistics change.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    // == Lookup ==
    /// Like [`PathCache::get`], but records a hit or a miss.
    pub fn lookup(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites `key -> value`.
    ///
    /// A new key arriving while the cache is full evicts the single oldest
    /// entry first. Overwrites never evict and never reorder.
    pub fn set(&mut self, key: String, value: String) {
        if self.capacity == 0 {
            return;
        }

        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }

        if self.entries.len() >= self.capacity && self.evict_oldest() {
            self.stats.record_eviction();
        }

        self.order.push(&key);
        self.entries.insert(key, value);
        debug_assert_eq!(self.order.len(), self.entries.len());
    }

    // == Capacity ==
    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting oldest entries until the cache fits.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity && self.evict_oldest() {
            self.stats.record_shrink_eviction();
        }
    }

    // == Is Disabled ==
    /// A zero-capacity cache never holds anything.
    pub fn is_disabled(&self) -> bool {
        self.capacity == 0
    }

    // == Contains ==
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Estimated Byte Size ==
    /// Sum of the UTF-8 byte lengths of every stored key and value.
    ///
    /// Diagnostic only; map and allocator overhead are not counted.
    pub fn estimated_byte_size(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the oldest entry. Returns false when there was nothing to drop.
    fn evict_oldest(&mut self) -> bool {
        match self.order.evict_oldest() {
            Some(oldest) => {
                self.entries.remove(&oldest);
                true
            }
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, keys: &[&str]) -> PathCache {
        let mut cache = PathCache::new(capacity);
        for key in keys {
            cache.set(key.to_string(), format!("{key}.h"));
        }
        cache
    }

    #[test]
    fn test_cache_new() {
        let cache = PathCache::new(200);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 200);
        assert!(!cache.is_disabled());
    }

    #[test]
    fn test_cache_set_and_get() {
        let mut cache = PathCache::new(10);

        cache.set("/ws/src/main.c".to_string(), "/ws/include/main.h".to_string());

        assert_eq!(cache.get("/ws/src/main.c"), Some("/ws/include/main.h"));
        assert_eq!(cache.get("/ws/src/other.c"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_evicts_oldest_when_full() {
        let mut cache = filled(3, &["a", "b", "c"]);

        cache.set("d".to_string(), "d.h".to_string());

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains_key("a"));
        assert!(cache.contains_key("b"));
        assert!(cache.contains_key("d"));
    }

    #[test]
    fn test_cache_get_does_not_promote() {
        let mut cache = filled(3, &["a", "b", "c"]);

        // Reading "a" must not save it from eviction.
        assert!(cache.get("a").is_some());
        assert!(cache.lookup("a").is_some());
        cache.set("d".to_string(), "d.h".to_string());

        assert!(!cache.contains_key("a"));
        assert!(cache.contains_key("b"));
    }

    #[test]
    fn test_cache_overwrite_keeps_position() {
        let mut cache = filled(3, &["a", "b", "c"]);

        cache.set("a".to_string(), "other.h".to_string());
        assert_eq!(cache.get("a"), Some("other.h"));
        assert_eq!(cache.len(), 3);

        cache.set("d".to_string(), "d.h".to_string());
        assert!(!cache.contains_key("a"), "overwritten key is still the oldest");
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_cache_shrink_evicts_many() {
        let mut cache = filled(5, &["a", "b", "c", "d", "e"]);

        cache.set_capacity(2);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key("d"));
        assert!(cache.contains_key("e"));
        assert_eq!(cache.stats().shrink_evictions, 3);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_cache_overwrite_when_full_does_not_evict() {
        let mut cache = filled(3, &["a", "b", "c"]);

        cache.set("c".to_string(), "c.hpp".to_string());

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("a"), Some("a.h"));
        assert_eq!(cache.get("b"), Some("b.h"));
        assert_eq!(cache.get("c"), Some("c.hpp"));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_cache_grow_keeps_entries() {
        let mut cache = filled(2, &["a", "b"]);

        cache.set_capacity(10);
        cache.set("c".to_string(), "c.h".to_string());

        assert_eq!(cache.len(), 3);
        assert!(cache.contains_key("a"));
    }

    #[test]
    fn test_cache_zero_capacity_never_stores() {
        let mut cache = PathCache::new(0);
        assert!(cache.is_disabled());

        cache.set("a".to_string(), "a.h".to_string());

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_cache_set_capacity_zero_empties() {
        let mut cache = filled(3, &["a", "b", "c"]);

        cache.set_capacity(0);

        assert!(cache.is_empty());
        assert!(cache.is_disabled());
    }

    #[test]
    fn test_cache_estimated_byte_size() {
        let mut cache = PathCache::new(10);
        assert_eq!(cache.estimated_byte_size(), 0);

        cache.set("ab".to_string(), "cde".to_string());
        // Multi-byte characters count in UTF-8 bytes.
        cache.set("é".to_string(), "x".to_string());

        assert_eq!(cache.estimated_byte_size(), 2 + 3 + 2 + 1);
    }

    #[test]
    fn test_cache_lookup_stats() {
        let mut cache = filled(10, &["a"]);

        assert!(cache.lookup("a").is_some());
        assert!(cache.lookup("missing").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
