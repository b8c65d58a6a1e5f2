//! Cache Module
//!
//! Bounded, insertion-ordered cache of resolved friend-file paths.

mod fifo;
mod stats;
mod store;


// Re-export public types
pub use fifo::FifoTracker;
pub use stats::CacheStats;
pub use store::PathCache;

// == Public Constants ==
/// Default number of cached source paths.
pub const DEFAULT_CAPACITY: usize = 200;
