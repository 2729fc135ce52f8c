//! Cache Module
//!
//! Provides two independent bounded in-memory cache engines: LFU with soft
//! TTL expiry and LRU with pure recency eviction.

mod entry;
mod lfu;
mod lru;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use lfu::{LfuCache, LfuStore};
pub use lru::{LruCache, LruStore};
pub use stats::CacheStats;

// == Public Constants ==
/// Default interval between background TTL sweeps, in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
