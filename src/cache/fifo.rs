//! FIFO Tracker Module
//!
//! Tracks insertion order for oldest-first eviction.

use std::collections::VecDeque;

// == FIFO Tracker ==
/// Tracks insertion order of cache keys.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest inserted
/// - Back = Newest inserted
///
/// Reads never reorder keys, so eviction is strictly by insertion order.
#[derive(Debug, Default)]
pub struct FifoTracker {
    /// Keys by insertion time
    order: VecDeque<String>,
}

impl FifoTracker {
    // == Constructor ==
    /// Creates a new empty FIFO tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push ==
    /// Records a newly inserted key as the newest entry.
    ///
    /// Callers only push keys that are not tracked yet; overwriting an
    /// existing cache key keeps its original position.
    pub fn push(&mut self, key: &str) {
        self.order.push_back(key.to_string());
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest inserted key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
