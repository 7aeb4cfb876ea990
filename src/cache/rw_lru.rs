//! Readers/Writer LRU Cache
//!
//! Bounded cache combining the readers/writer discipline with
//! least-recently-used eviction.

use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::trace;

use super::recency::{Handle, RecencyList};
use super::CacheStore;
use crate::error::{Result, ServerError};

// == Public Constants ==
/// Capacity used by [`ReadersWriterLruCache::default`].
pub const DEFAULT_LRU_CAPACITY: usize = 10;

#[derive(Debug)]
struct Slot<V> {
    value: V,
    /// Position of this entry's key in the recency list
    handle: Handle,
}

/// Map and recency list, only ever mutated together under the write guard.
#[derive(Debug)]
struct LruState<K, V> {
    entries: HashMap<K, Slot<V>>,
    recency: RecencyList<K>,
    evictions: u64,
}

// == Readers/Writer LRU Cache ==
/// Capacity-bounded cache evicting the least recently used entry.
///
/// # Locking
/// Both `lookup` and `insert` take the upgradable mode for the presence
/// check and upgrade to exclusive when they need to touch the recency list.
/// A hit is therefore a write: there is no shared-read fast path, since
/// skipping the promotion would corrupt the eviction order.
///
/// # Re-inserting a present key
/// `insert` on a key that is already cached only refreshes its recency.
/// **The stored value is kept**, exactly as in the unbounded variants; the
/// new value is dropped.
///
/// Entries leave this cache only through eviction; it deliberately does not
/// implement [`RemovableStore`](super::RemovableStore).
#[derive(Debug)]
pub struct ReadersWriterLruCache<K, V> {
    state: RwLock<LruState<K, V>>,
    capacity: NonZeroUsize,
}

impl<K, V> ReadersWriterLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// [`ServerError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(ServerError::InvalidCapacity(capacity))
    }

    /// Creates a cache from an already validated capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            state: RwLock::new(LruState {
                entries: HashMap::with_capacity(capacity.get()),
                recency: RecencyList::with_capacity(capacity.get()),
                evictions: 0,
            }),
            capacity,
        }
    }

    // == Contains ==
    /// Checks presence without promoting the key.
    pub fn contains(&self, key: &K) -> bool {
        self.state.read().entries.contains_key(key)
    }

    // == Keys By Recency ==
    /// Snapshot of resident keys, most recently used first.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.state.read().recency.iter().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let state = self.state.read();
        assert_eq!(state.entries.len(), state.recency.len());
        assert!(state.entries.len() <= self.capacity.get());
        for key in state.recency.iter() {
            assert!(state.entries.contains_key(key), "list key missing from map");
        }
    }
}

impl<K, V> Default for ReadersWriterLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_LRU_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl<K, V> CacheStore<K, V> for ReadersWriterLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn lookup(&self, key: &K) -> Option<V> {
        let state = self.state.upgradable_read();
        let handle = state.entries.get(key)?.handle;

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        state.recency.move_to_front(handle);
        state.entries.get(key).map(|slot| slot.value.clone())
    }

    fn insert(&self, key: K, value: V) {
        let state = self.state.upgradable_read();
        let existing = state.entries.get(&key).map(|slot| slot.handle);

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        let state = &mut *state;

        if let Some(handle) = existing {
            // Touch only; the first value stays
            state.recency.move_to_front(handle);
            return;
        }

        if state.entries.len() >= self.capacity.get() {
            if let Some(evicted) = state.recency.pop_back() {
                state.entries.remove(&evicted);
                state.evictions += 1;
                trace!(capacity = self.capacity.get(), "Evicted least recently used entry");
            }
        }

        let handle = state.recency.push_front(key.clone());
        state.entries.insert(key, Slot { value, handle });
        debug_assert_eq!(state.entries.len(), state.recency.len());
    }

    fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity.get())
    }

    fn evictions(&self) -> u64 {
        self.state.read().evictions
    }
}
