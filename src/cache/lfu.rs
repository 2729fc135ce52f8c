//! LFU Engine Module
//!
//! Bounded cache evicting the least-frequently-used entry, with soft TTL
//! expiry enforced by a periodic background sweep.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{CacheEntry, CacheStats};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

// == LFU Store ==
/// Synchronous LFU core: the key→entry map plus statistics.
///
/// All operations take `&mut self`; [`LfuCache`] serializes concurrent
/// access behind a single lock. `get` is a mutating lookup (hit count and
/// access time are updated on every hit).
#[derive(Debug)]
pub struct LfuStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LfuStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new store with the given capacity.
    ///
    /// Capacity validation happens in the public constructors.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// On a hit the entry's hit count is incremented by exactly 1 and its
    /// access time refreshed. Expiry is deliberately not checked here:
    /// an entry past its TTL stays retrievable until the next sweep
    /// removes it (lazy expiry). Absent keys leave entries untouched.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch(Instant::now());
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a key-value pair with a TTL in seconds.
    ///
    /// If the key already exists this is a full update: hit count
    /// incremented, both timestamps reset to now, TTL and value replaced.
    /// Otherwise, if the store is at capacity, the entry with the minimum
    /// hit count is evicted first (ties: oldest write time, then oldest
    /// access time), and the new entry is inserted with `hit_count = 1`.
    pub fn put(&mut self, key: K, value: V, ttl_seconds: u64) {
        let now = Instant::now();

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, ttl_seconds, now);
            return;
        }

        if self.entries.len() == self.capacity {
            if let Some(victim) = self.least_frequently_used_key() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(key, CacheEntry::new(value, ttl_seconds, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Least Frequently Used Key ==
    /// Linear scan for the eviction victim: minimum hit count, ties broken
    /// by oldest write time, then oldest access time.
    fn least_frequently_used_key(&self) -> Option<K> {
        self.entries
            .iter()
            .min_by(|(_, a), (_, b)| {
                a.hit_count
                    .cmp(&b.hit_count)
                    .then(a.write_time.cmp(&b.write_time))
                    .then(a.access_time.cmp(&b.access_time))
            })
            .map(|(key, _)| key.clone())
    }

    // == Sweep Expired ==
    /// Removes all entries whose TTL has elapsed relative to their write
    /// time. Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        self.stats.record_expirations(count as u64);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Hit Count ==
    /// Returns the current hit count for a key without touching the entry.
    pub fn hit_count(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.hit_count)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == LFU Cache ==
/// Concurrent LFU cache handle.
///
/// Wraps an [`LfuStore`] in a single `Arc<RwLock<_>>` so that any number
/// of tasks may call `get`/`put` on the same instance; every operation
/// takes the write lock (lookups mutate), giving linearizable semantics.
/// Construction spawns the background TTL sweep task; dropping the handle
/// aborts it, tying the sweeper's lifetime to the cache's.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    store: Arc<RwLock<LfuStore<K, V>>>,
    sweeper: JoinHandle<()>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an LFU cache with the given capacity and the default sweep
    /// interval (60 seconds).
    ///
    /// Must be called within a tokio runtime. Fails with
    /// [`CacheError::InvalidArgument`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::with_capacity(capacity))
    }

    /// Creates an LFU cache from a [`CacheConfig`].
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        if config.capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "cache capacity must be a positive integer".to_string(),
            ));
        }

        let store = Arc::new(RwLock::new(LfuStore::new(config.capacity)));
        let sweeper = spawn_sweep_task(Arc::clone(&store), config.sweep_interval_secs);

        info!(
            capacity = config.capacity,
            sweep_interval_secs = config.sweep_interval_secs,
            "LFU cache created"
        );

        Ok(Self { store, sweeper })
    }

    // == Get ==
    /// Retrieves a value by key, bumping its hit count on a hit.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.store.write().await.get(key)
    }

    // == Put ==
    /// Stores a key-value pair with a TTL in seconds, evicting the
    /// least-frequently-used entry if at capacity.
    pub async fn put(&self, key: K, value: V, ttl_seconds: u64) {
        self.store.write().await.put(key, value, ttl_seconds);
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl<K, V> Drop for LfuCache<K, V> {
    /// Stops the background sweep task when the cache is discarded.
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}
