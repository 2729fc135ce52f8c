//! Bounded Cache - in-process bounded key-value caches
//!
//! Provides two independent eviction engines over host-supplied key and
//! value types:
//!
//! - [`LfuCache`] - least-frequently-used eviction with soft TTL expiry
//!   enforced by a cancellable background sweep task
//! - [`LruCache`] - least-recently-used eviction via a sentinel-delimited
//!   recency list
//!
//! Both engines guard their whole state with a single lock, so one
//! instance can be shared across tasks behind an `Arc`.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, LfuCache, LruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
