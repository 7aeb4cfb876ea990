//! Cache Statistics Module
//!
//! Tracks lookup outcomes for a shared cache and produces point-in-time
//! snapshots of them.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::CacheStore;

// == Cache Counters ==
/// Lock-free hit/miss counters shared by every request handler.
///
/// Evictions are not counted here: only the cache knows when it evicts.
#[derive(Debug, Default)]
pub struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheCounters {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Combines the counters with the cache's own size and eviction count.
    pub fn snapshot<K, V, C>(&self, cache: &C) -> CacheStats
    where
        C: CacheStore<K, V> + ?Sized,
    {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: cache.evictions(),
            total_entries: cache.len(),
        }
    }
}

// == Cache Stats ==
/// Point-in-time cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from the cache
    pub hits: u64,
    /// Number of lookups that had to go to the backing store
    pub misses: u64,
    /// Number of entries evicted due to the LRU policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
