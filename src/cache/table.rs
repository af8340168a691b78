//! Cache Table Module
//!
//! Bounded key/entry map combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Table ==
/// Bounded cache storage with LRU eviction and lazy TTL expiration.
///
/// Not synchronized on its own; `CacheAsideStore` owns it behind a lock.
#[derive(Debug)]
pub struct CacheTable<V> {
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
    ttl: Duration,
}

impl<V: Clone> CacheTable<V> {
    // == Constructor ==
    /// Creates a new CacheTable with the given capacity and TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the table can hold
    /// * `ttl` - Lifetime of every entry, measured from its write
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(max_entries, ttl.as_secs()),
            max_entries,
            ttl,
        }
    }

    // == Lookup ==
    /// Returns the value for `key` if a live entry exists.
    ///
    /// Records exactly one hit or one miss. An expired entry is removed on the
    /// spot and counts as a miss.
    pub fn lookup(&mut self, key: &str) -> Option<V> {
        let live = match self.entries.get(key) {
            Some(entry) if entry.is_live(self.ttl) => Some(entry.value.clone()),
            _ => None,
        };

        match live {
            Some(value) => {
                self.lru.touch(key);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                // Drops an expired entry, no-op when absent
                self.remove(key);
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a value under `key` with a fresh timestamp.
    ///
    /// Overwrites an existing entry. A new key that would push the table past
    /// capacity evicts least recently used entries first. Returns the number of
    /// entries evicted. A table with zero capacity stores nothing.
    pub fn insert(&mut self, key: String, value: V) -> usize {
        // A zero-capacity table admits nothing
        if self.capacity() == 0 {
            return 0;
        }

        let mut evicted = 0;

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                match self.lru.evict_oldest() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                        self.stats.record_eviction();
                        evicted += 1;
                    }
                    None => break,
                }
            }
        }

        let entry = CacheEntry::new(key.clone(), value);
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    // == Clear ==
    /// Removes every entry. Counters are left untouched.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Purge Expired ==
    /// Removes all expired entries without touching the counters.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl();
        let expired: Vec<String> = self
            .entries
            .values()
            .filter(|entry| !entry.is_live(ttl))
            .map(|entry| entry.key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }

        expired.len()
    }

    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether a live entry exists, without touching LRU order or counters.
    pub fn contains_live(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_live(self.ttl))
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    fn table(max_entries: usize) -> CacheTable<String> {
        CacheTable::new(max_entries, TTL)
    }

    #[test]
    fn test_table_new() {
        let table = table(100);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 100);
        assert_eq!(table.ttl(), TTL);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = table(100);

        table.insert("2643743".to_string(), "London".to_string());

        assert_eq!(table.lookup("2643743"), Some("London".to_string()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_missing_records_miss() {
        let mut table = table(100);

        assert_eq!(table.lookup("nonexistent"), None);

        let stats = table.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_empty_key_is_a_distinct_key() {
        let mut table = table(100);

        table.insert(String::new(), "blank".to_string());
        table.insert(" ".to_string(), "space".to_string());

        assert_eq!(table.lookup(""), Some("blank".to_string()));
        assert_eq!(table.lookup(" "), Some("space".to_string()));
    }

    #[test]
    fn test_zero_capacity_admits_nothing() {
        let mut table = table(0);

        assert_eq!(table.insert("a".to_string(), "1".to_string()), 0);

        assert!(table.is_empty());
        assert_eq!(table.lookup("a"), None);
        let stats = table.stats();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let mut table = table(2);

        table.insert("a".to_string(), "1".to_string());
        table.insert("b".to_string(), "2".to_string());
        let evicted = table.insert("a".to_string(), "3".to_string());

        assert_eq!(evicted, 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("a"), Some("3".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_a_miss_and_removed() {
        let mut table = table(100);

        table.insert("a".to_string(), "1".to_string());
        assert!(table.lookup("a").is_some());

        tokio::time::advance(TTL).await;

        assert_eq!(table.lookup("a"), None);
        assert!(table.is_empty());

        let stats = table.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_lru_eviction() {
        let mut table = table(3);

        table.insert("key1".to_string(), "value1".to_string());
        table.insert("key2".to_string(), "value2".to_string());
        table.insert("key3".to_string(), "value3".to_string());
        let evicted = table.insert("key4".to_string(), "value4".to_string());

        assert_eq!(evicted, 1);
        assert_eq!(table.len(), 3);
        assert!(!table.contains_live("key1"));
        assert!(table.contains_live("key2"));
        assert!(table.contains_live("key4"));
        assert_eq!(table.stats().evictions, 1);
    }

    #[test]
    fn test_lookup_refreshes_lru_position() {
        let mut table = table(3);

        table.insert("key1".to_string(), "value1".to_string());
        table.insert("key2".to_string(), "value2".to_string());
        table.insert("key3".to_string(), "value3".to_string());

        // Access order, not write order, decides the victim
        table.lookup("key1");
        table.insert("key4".to_string(), "value4".to_string());

        assert!(table.contains_live("key1"));
        assert!(!table.contains_live("key2"));
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut table = table(100);

        table.insert("a".to_string(), "1".to_string());
        table.lookup("a");
        table.lookup("b");

        assert_eq!(table.clear(), 1);
        assert_eq!(table.clear(), 0);
        assert!(table.is_empty());

        let stats = table.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(table.lookup("a"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let mut table = table(100);

        table.insert("old".to_string(), "1".to_string());
        tokio::time::advance(Duration::from_secs(200)).await;
        table.insert("new".to_string(), "2".to_string());
        tokio::time::advance(Duration::from_secs(150)).await;

        assert_eq!(table.purge_expired(), 1);
        assert_eq!(table.len(), 1);
        assert!(table.contains_live("new"));

        let stats = table.stats();
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
    }
}
