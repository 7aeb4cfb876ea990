//! Cache Module
//!
//! Thread-safe in-memory key/value caches with interchangeable locking
//! strategies, used to memoize expensive lookups across concurrent callers.
//!
//! # Variants
//! - [`ExclusiveLockCache`] - one mutex around the whole map (baseline)
//! - [`ReadersWriterCache`] - concurrent lookups, check-then-upgrade inserts
//! - [`ReadersWriterLruCache`] - bounded, least-recently-used eviction
//!
//! # Insert semantics
//! Every variant treats `insert` as **insert-if-absent**: the first value
//! stored for a key wins and later inserts for the same key never replace it.
//! There is no single-flight coalescing, so concurrent misses on the same key
//! may each compute a value before racing on `insert`.

mod exclusive;
mod recency;
mod rw;
mod rw_lru;
mod stats;


use std::hash::Hash;
use std::sync::Arc;

// Re-export public types
pub use exclusive::ExclusiveLockCache;
pub use rw::ReadersWriterCache;
pub use rw_lru::{ReadersWriterLruCache, DEFAULT_LRU_CAPACITY};
pub use stats::{CacheCounters, CacheStats};

use crate::config::CacheStrategy;
use crate::error::Result;

// == Cache Store Contract ==
/// Capability set shared by every cache variant.
///
/// None of these operations fail; absence is a normal return value.
pub trait CacheStore<K, V>: Send + Sync {
    /// Returns a copy of the value stored under `key`, if any.
    ///
    /// Side-effect free for the unbounded variants. The LRU variant also
    /// promotes a hit to most-recently-used as part of the same operation.
    fn lookup(&self, key: &K) -> Option<V>;

    /// Stores `value` under `key` unless the key is already present.
    ///
    /// This is not an upsert: an existing value is never overwritten.
    fn insert(&self, key: K, value: V);

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries, `None` when unbounded.
    fn capacity(&self) -> Option<usize> {
        None
    }

    /// Entries dropped by the cache's own capacity policy.
    fn evictions(&self) -> u64 {
        0
    }
}

// == Removable Store ==
/// Explicit removal, offered by the unbounded variants only.
///
/// The LRU variant removes entries solely through eviction.
pub trait RemovableStore<K, V>: CacheStore<K, V> {
    /// Deletes the entry for `key`; returns whether anything was removed.
    fn remove(&self, key: &K) -> bool;
}

// == Factory ==
/// Builds a shared cache for the given strategy.
///
/// `capacity` only applies to [`CacheStrategy::Lru`]; a zero capacity is
/// rejected here rather than on first insert.
pub fn build_store<K, V>(
    strategy: CacheStrategy,
    capacity: usize,
) -> Result<Arc<dyn CacheStore<K, V>>>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let store: Arc<dyn CacheStore<K, V>> = match strategy {
        CacheStrategy::Exclusive => Arc::new(ExclusiveLockCache::<K, V>::new()),
        CacheStrategy::ReadersWriter => Arc::new(ReadersWriterCache::<K, V>::new()),
        CacheStrategy::Lru => Arc::new(ReadersWriterLruCache::<K, V>::new(capacity)?),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;

    #[test]
    fn test_build_store_each_strategy() {
        for strategy in [
            CacheStrategy::Exclusive,
            CacheStrategy::ReadersWriter,
            CacheStrategy::Lru,
        ] {
            let store = build_store::<String, u32>(strategy, 4).unwrap();
            store.insert("a".to_string(), 1);
            assert_eq!(store.lookup(&"a".to_string()), Some(1));
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn test_build_store_capacity_only_bounds_lru() {
        let rw = build_store::<u32, u32>(CacheStrategy::ReadersWriter, 4).unwrap();
        assert_eq!(rw.capacity(), None);

        let lru = build_store::<u32, u32>(CacheStrategy::Lru, 4).unwrap();
        assert_eq!(lru.capacity(), Some(4));
    }

    #[test]
    fn test_build_store_rejects_zero_lru_capacity() {
        let result = build_store::<u32, u32>(CacheStrategy::Lru, 0);
        assert!(matches!(result, Err(ServerError::InvalidCapacity(0))));

        // Unbounded variants ignore the capacity entirely
        assert!(build_store::<u32, u32>(CacheStrategy::Exclusive, 0).is_ok());
    }
}
