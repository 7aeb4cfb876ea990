//! Readers/Writer Cache
//!
//! Concurrent lookups under a shared lock; inserts check under the
//! upgradable mode and only escalate to exclusive when the key is absent.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use super::{CacheStore, RemovableStore};

// == Readers/Writer Cache ==
/// Unbounded cache allowing any number of simultaneous lookups.
///
/// # Locking
/// - `lookup`: shared read lock
/// - `insert`: upgradable read for the presence check, upgraded to the
///   write lock only when the key is absent. Only one upgradable guard can
///   exist at a time, so two inserts can't both pass the check, while plain
///   readers keep running until the actual upgrade.
/// - `remove`: write lock directly
#[derive(Debug)]
pub struct ReadersWriterCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> ReadersWriterCache<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for ReadersWriterCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CacheStore<K, V> for ReadersWriterCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn lookup(&self, key: &K) -> Option<V> {
        self.entries.read().get(key).cloned()
    }

    fn insert(&self, key: K, value: V) {
        let entries = self.entries.upgradable_read();
        if entries.contains_key(&key) {
            return;
        }

        let mut entries = RwLockUpgradableReadGuard::upgrade(entries);
        entries.insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

impl<K, V> RemovableStore<K, V> for ReadersWriterCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn remove(&self, key: &K) -> bool {
        self.entries.write().remove(key).is_some()
    }
}
