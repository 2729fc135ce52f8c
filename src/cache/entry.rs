//! Cache Entry Module
//!
//! Defines the record the LFU engine keeps per key: the stored value,
//! write/access timestamps, a TTL relative to the write time, and the
//! hit count used as the eviction priority.

use std::time::Instant;

// == Cache Entry ==
/// A single LFU cache entry with value, timestamps, TTL and hit count.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant of creation or last full update
    pub write_time: Instant,
    /// Instant of the last read or write
    pub access_time: Instant,
    /// TTL in seconds, relative to `write_time`
    pub expire_time: u64,
    /// Number of times this entry was read or written; never below 1
    pub hit_count: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry with `hit_count = 1` and both timestamps set to `now`.
    pub fn new(value: V, ttl_seconds: u64, now: Instant) -> Self {
        Self {
            value,
            write_time: now,
            access_time: now,
            expire_time: ttl_seconds,
            hit_count: 1,
        }
    }

    // == Touch ==
    /// Records a read: bumps the hit count by exactly 1 and refreshes the
    /// access time. The write time and TTL are untouched.
    pub fn touch(&mut self, now: Instant) {
        self.hit_count += 1;
        self.access_time = now;
    }

    // == Refresh ==
    /// Records a full update: bumps the hit count, resets both timestamps,
    /// and replaces the TTL and the stored value.
    pub fn refresh(&mut self, value: V, ttl_seconds: u64, now: Instant) {
        self.hit_count += 1;
        self.write_time = now;
        self.access_time = now;
        self.expire_time = ttl_seconds;
        self.value = value;
    }

    // == Is Expired ==
    /// Checks whether the entry's TTL has logically elapsed.
    ///
    /// An entry is expired once strictly more than `expire_time` whole
    /// seconds have passed since `write_time`. Expired entries remain
    /// retrievable until the next background sweep removes them; lookups
    /// never consult this.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.write_time).as_secs() > self.expire_time
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_entry_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("test_value", 60, now);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.hit_count, 1);
        assert_eq!(entry.expire_time, 60);
        assert_eq!(entry.write_time, now);
        assert_eq!(entry.access_time, now);
    }

    #[test]
    fn test_touch_increments_hit_count_and_access_time() {
        let created = Instant::now();
        let mut entry = CacheEntry::new("v", 60, created);

        let later = created + Duration::from_secs(5);
        entry.touch(later);

        assert_eq!(entry.hit_count, 2);
        assert_eq!(entry.access_time, later);
        // Write time unchanged by a read
        assert_eq!(entry.write_time, created);
        assert_eq!(entry.expire_time, 60);
    }

    #[test]
    fn test_refresh_replaces_value_and_resets_timestamps() {
        let created = Instant::now();
        let mut entry = CacheEntry::new("v1", 60, created);

        let later = created + Duration::from_secs(5);
        entry.refresh("v2", 120, later);

        assert_eq!(entry.value, "v2");
        assert_eq!(entry.hit_count, 2);
        assert_eq!(entry.write_time, later);
        assert_eq!(entry.access_time, later);
        assert_eq!(entry.expire_time, 120);
    }

    #[test]
    fn test_not_expired_within_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("v", 10, now);

        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("v", 10, now);

        // Exactly at the TTL boundary the entry is still live; it expires
        // only once strictly more than `expire_time` seconds have passed.
        assert!(!entry.is_expired(now + Duration::from_secs(10)));
        assert!(entry.is_expired(now + Duration::from_secs(11)));
    }

    #[test]
    fn test_zero_ttl_expires_after_one_second() {
        let now = Instant::now();
        let entry = CacheEntry::new("v", 0, now);

        assert!(!entry.is_expired(now));
        assert!(entry.is_expired(now + Duration::from_secs(1) + Duration::from_millis(1)));
    }

    #[test]
    fn test_refresh_extends_lifetime() {
        let created = Instant::now();
        let mut entry = CacheEntry::new("v", 10, created);

        let later = created + Duration::from_secs(8);
        entry.refresh("v", 10, later);

        // TTL is now relative to the refreshed write time
        assert!(!entry.is_expired(created + Duration::from_secs(15)));
        assert!(entry.is_expired(later + Duration::from_secs(11)));
    }
}
