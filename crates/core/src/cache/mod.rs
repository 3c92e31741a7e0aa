//! In-memory cache for aggregated news.
//!
//! Entries live for the lifetime of the process and expire after a single
//! fixed TTL. There is no capacity bound and no LRU: an entry disappears only
//! when it is overwritten, when a read finds it stale, or on [`TtlCache::clear`].
//!
//! The store is shared across concurrent requests. Individual operations are
//! atomic per key, but a read racing a write for the same key may observe
//! either value; the cache is best-effort and never load-bearing for
//! correctness.

pub mod key;

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::model::RankedSummary;

pub use key::news_cache_key;

/// Validity window for every cached entry (30 minutes).
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Cache of formatted news lists keyed by `news_<YYYY-MM-DD>`.
pub type NewsCache = TtlCache<Vec<RankedSummary>>;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Key/value store whose entries expire a fixed time after being written.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache with the standard 30 minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    /// Create an empty cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entries: DashMap::new(), ttl }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: &str, value: V) {
        self.set_at(key, value, Instant::now());
    }

    /// Return the value for `key` if it is still fresh.
    ///
    /// A stale entry is removed as a side effect and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Remove every entry unconditionally.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, including stale ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set_at(&self, key: &str, value: V, stored_at: Instant) {
        self.entries.insert(key.to_string(), CacheEntry { value, stored_at });
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let fresh = {
            let entry = self.entries.get(key)?;
            if now.saturating_duration_since(entry.stored_at) < self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        };

        if fresh.is_none() {
            // Only drop the entry if it is still the stale one we looked at.
            let ttl = self.ttl;
            self.entries
                .remove_if(key, |_, entry| now.saturating_duration_since(entry.stored_at) >= ttl);
            tracing::debug!(key, "evicted expired cache entry");
        }

        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let cache: TtlCache<Vec<u32>> = TtlCache::new();
        cache.set("news_2024-01-15", vec![1, 2, 3]);
        assert_eq!(cache.get("news_2024-01-15"), Some(vec![1, 2, 3]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let cache: TtlCache<String> = TtlCache::new();
        assert!(cache.get("news_2024-01-15").is_none());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let cache: TtlCache<&str> = TtlCache::new();
        cache.set("k", "first");
        cache.set("k", "second");
        assert_eq!(cache.get("k"), Some("second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_fresh_just_before_ttl() {
        let cache: TtlCache<u8> = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("k", 7, t0);
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(1799)), Some(7));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_at_exactly_ttl() {
        let cache: TtlCache<u8> = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("k", 7, t0);
        assert_eq!(cache.get_at("k", t0 + CACHE_TTL), None);
        assert!(cache.is_empty(), "stale entry must be removed on read");
    }

    #[test]
    fn test_expired_after_ttl() {
        let cache: TtlCache<u8> = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("k", 7, t0);
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(3600)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_rewrite_refreshes_timestamp() {
        let cache: TtlCache<u8> = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("k", 1, t0);
        cache.set_at("k", 2, t0 + Duration::from_secs(1700));
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(1900)), Some(2));
    }

    #[test]
    fn test_expiry_is_per_key() {
        let cache: TtlCache<u8> = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("old", 1, t0);
        cache.set_at("new", 2, t0 + Duration::from_secs(1000));

        let later = t0 + Duration::from_secs(2000);
        assert_eq!(cache.get_at("old", later), None);
        assert_eq!(cache.get_at("new", later), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache: TtlCache<u8> = TtlCache::new();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_custom_ttl() {
        let cache: TtlCache<u8> = TtlCache::with_ttl(Duration::from_secs(5));
        let t0 = Instant::now();
        cache.set_at("k", 1, t0);
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(4)), Some(1));
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(5)), None);
    }
}
