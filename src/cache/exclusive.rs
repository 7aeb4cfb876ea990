//! Exclusive Lock Cache
//!
//! Baseline variant: a single mutex guards the whole map.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;

use super::{CacheStore, RemovableStore};

// == Exclusive Lock Cache ==
/// Cache where every operation takes the same mutex for its whole duration.
///
/// Trivially race-free but offers no read parallelism: readers queue behind
/// writers and behind each other. The other variants are checked against it.
#[derive(Debug)]
pub struct ExclusiveLockCache<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> ExclusiveLockCache<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for ExclusiveLockCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CacheStore<K, V> for ExclusiveLockCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn lookup(&self, key: &K) -> Option<V> {
        self.entries.lock().get(key).cloned()
    }

    fn insert(&self, key: K, value: V) {
        // First writer wins; an occupied slot is left untouched
        self.entries.lock().entry(key).or_insert(value);
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

impl<K, V> RemovableStore<K, V> for ExclusiveLockCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn remove(&self, key: &K) -> bool {
        self.entries.lock().remove(key).is_some()
    }
}
