//! TTL Cache Module
//!
//! Bounded key/value map with per-entry TTL and FIFO capacity eviction.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == TTL Cache ==
/// In-memory cache with per-entry TTL and a fixed capacity.
///
/// Capacity eviction is FIFO by insertion order, not LRU: reading a key does
/// not protect it from eviction. Every write prunes expired entries first and
/// only then evicts the oldest writes until the cache fits its capacity.
///
/// Misses are not errors; callers treat `None` as the cue to fetch.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Write order used for eviction
    order: InsertionOrder,
    /// Usage counters
    stats: CacheStats,
    /// Maximum number of entries kept after any write
    capacity: usize,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`.
    ///
    /// An existing entry is replaced wholesale but keeps its insertion slot,
    /// so a rewritten key is still evicted in its original turn.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.order.record_insert(&key);
        }
        self.entries.insert(key, CacheEntry::new(value, ttl));

        self.prune_expired();

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_oldest() else {
                break;
            };
            if self.entries.remove(&oldest).is_some() {
                self.stats.record_eviction();
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` if it is present and unexpired.
    ///
    /// An expired entry is removed as a side effect and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.order.remove(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Removes an entry, returning its value if it was present (even if expired).
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.remove(key).map(|entry| entry.value);
        if removed.is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    /// Drops every entry. Counters other than `total_entries` are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Prune Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn prune_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.order.remove(key);
        }

        self.stats.record_expirations(expired.len());
        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    /// Keys in write order, oldest first. Expired entries not yet pruned are included.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
