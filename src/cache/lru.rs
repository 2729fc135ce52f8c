//! LRU Engine Module
//!
//! Bounded cache evicting the least-recently-used entry. Recency is kept
//! in a doubly linked list delimited by two permanent sentinel nodes
//! (head = LRU end, tail = MRU end). The list lives in an index arena —
//! nodes are slots in a `Vec` linked by `usize` handles and the key map
//! stores handles — so splices are O(1) without aliasing hazards.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Arena slot of the head sentinel (LRU end). Never holds user data.
const HEAD: usize = 0;
/// Arena slot of the tail sentinel (MRU end). Never holds user data.
const TAIL: usize = 1;

// == List Node ==
/// One slot in the recency list arena. Sentinels keep `key`/`value` at
/// `None`; user nodes always hold both.
#[derive(Debug)]
struct Node<K, V> {
    key: Option<K>,
    value: Option<V>,
    prev: usize,
    next: usize,
}

// == LRU Store ==
/// Synchronous LRU core: key→handle map plus the arena-backed recency
/// list. List order is strictly least-recent-first between the sentinels,
/// and the list always holds exactly the keys present in the map.
#[derive(Debug)]
pub struct LruStore<K, V> {
    /// Key → arena handle
    index: HashMap<K, usize>,
    /// Recency list storage; slots 0 and 1 are the sentinels
    arena: Vec<Node<K, V>>,
    /// Recycled arena slots
    free: Vec<usize>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LruStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new store with the given capacity.
    ///
    /// Capacity validation happens in the public constructors.
    pub fn new(capacity: usize) -> Self {
        let arena = vec![
            Node {
                key: None,
                value: None,
                prev: HEAD,
                next: TAIL,
            },
            Node {
                key: None,
                value: None,
                prev: HEAD,
                next: TAIL,
            },
        ];

        Self {
            index: HashMap::with_capacity(capacity),
            arena,
            free: Vec::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit moves the node to the MRU end of the list before returning
    /// the stored value.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.index.get(key) {
            Some(&slot) => {
                self.detach(slot);
                self.append_mru(slot);
                self.stats.record_hit();
                self.arena[slot].value.clone()
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists only its recency is refreshed; the stored
    /// value is NOT replaced. This preserves the system's historical
    /// update semantics and is pinned by tests; it is flagged as a likely
    /// defect awaiting product-owner confirmation.
    ///
    /// Otherwise, if the map is exactly at capacity, the node adjacent to
    /// the head sentinel is evicted from both map and list, and the new
    /// entry is appended at the MRU end.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&slot) = self.index.get(&key) {
            self.detach(slot);
            self.append_mru(slot);
            return;
        }

        if self.index.len() == self.capacity {
            self.evict_lru();
        }

        let slot = self.alloc(key.clone(), value);
        self.index.insert(key, slot);
        self.append_mru(slot);
        self.stats.set_total_entries(self.index.len());
    }

    // == Evict LRU ==
    /// Removes the least-recently-used node (the one right after the head
    /// sentinel) from both the map and the list, recycling its slot.
    fn evict_lru(&mut self) {
        let victim = self.arena[HEAD].next;
        if victim == TAIL {
            return;
        }

        self.detach(victim);
        if let Some(key) = self.arena[victim].key.take() {
            self.index.remove(&key);
        }
        self.arena[victim].value = None;
        self.free.push(victim);
        self.stats.record_eviction();
    }

    // == Alloc ==
    /// Places a new user node in the arena, reusing a freed slot if one
    /// is available. The node is not linked into the list yet.
    fn alloc(&mut self, key: K, value: V) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.arena[slot].key = Some(key);
                self.arena[slot].value = Some(value);
                slot
            }
            None => {
                self.arena.push(Node {
                    key: Some(key),
                    value: Some(value),
                    prev: HEAD,
                    next: TAIL,
                });
                self.arena.len() - 1
            }
        }
    }

    // == Detach ==
    /// Unlinks a node from the list. The node's own links become stale
    /// until it is re-appended.
    fn detach(&mut self, slot: usize) {
        let prev = self.arena[slot].prev;
        let next = self.arena[slot].next;
        self.arena[prev].next = next;
        self.arena[next].prev = prev;
    }

    // == Append MRU ==
    /// Links a node at the MRU end, immediately before the tail sentinel.
    fn append_mru(&mut self, slot: usize) {
        let last = self.arena[TAIL].prev;
        self.arena[last].next = slot;
        self.arena[slot].prev = last;
        self.arena[slot].next = TAIL;
        self.arena[TAIL].prev = slot;
    }

    // == Peek LRU ==
    /// Returns the least-recently-used key without touching recency.
    pub fn peek_lru(&self) -> Option<&K> {
        let slot = self.arena[HEAD].next;
        if slot == TAIL {
            None
        } else {
            self.arena[slot].key.as_ref()
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == List Keys ==
    /// Walks the list from the LRU end and returns the keys in order.
    /// Test support; also checks the list/map size invariant.
    #[cfg(test)]
    fn keys_lru_to_mru(&self) -> Vec<K> {
        let mut keys = Vec::new();
        let mut slot = self.arena[HEAD].next;
        while slot != TAIL {
            let node = &self.arena[slot];
            if let Some(key) = node.key.as_ref() {
                keys.push(key.clone());
            }
            slot = node.next;
        }
        assert_eq!(keys.len(), self.index.len(), "list/map size invariant");
        keys
    }
}

// == LRU Cache ==
/// Concurrent LRU cache handle.
///
/// Wraps an [`LruStore`] in a single `Arc<RwLock<_>>`; every `get`/`put`
/// takes the write lock (lookups splice the recency list), so all list
/// and map mutations are serialized. Share one instance behind an `Arc`
/// to use it from several tasks.
#[derive(Debug)]
pub struct LruCache<K, V> {
    store: Arc<RwLock<LruStore<K, V>>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an LRU cache with the given capacity.
    ///
    /// Fails with [`CacheError::InvalidArgument`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "cache capacity must be a positive integer".to_string(),
            ));
        }

        info!(capacity, "LRU cache created");

        Ok(Self {
            store: Arc::new(RwLock::new(LruStore::new(capacity))),
        })
    }

    /// Creates an LRU cache from a [`CacheConfig`]. Only the capacity is
    /// used; this engine has no TTL sweep.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::new(config.capacity)
    }

    // == Get ==
    /// Retrieves a value by key, marking it most-recently-used on a hit.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.store.write().await.get(key)
    }

    // == Put ==
    /// Stores a key-value pair, evicting the least-recently-used entry if
    /// at capacity. An existing key only has its recency refreshed.
    pub async fn put(&self, key: K, value: V) {
        self.store.write().await.put(key, value);
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
