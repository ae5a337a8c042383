//! Expiring Cache Module
//!
//! HashMap storage paired with an insertion-ordered timeline. Eviction pops
//! stamps from the old end of the timeline and stops at the first one that
//! has not expired, so its cost is proportional to the number of expired
//! stamps rather than the size of the cache.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::cache::{CacheEntry, Stamp};

// == Expiring Cache ==
/// Key-value cache that expires entries by insertion age.
///
/// Invariant: `timeline` is non-decreasing in `inserted_at`, and every live
/// key in `entries` has exactly one stamp in `timeline` with a matching
/// generation.
#[derive(Debug)]
pub struct ExpiringCache<K, V> {
    /// Live values by key
    entries: HashMap<K, CacheEntry<V>>,
    /// Insert stamps, oldest at the front
    timeline: VecDeque<Stamp<K>>,
    /// Generation handed to the next insert
    next_generation: u64,
}

impl<K, V> Default for ExpiringCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            timeline: VecDeque::new(),
            next_generation: 0,
        }
    }
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores `value` under `key`, stamped with the current time.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Stores `value` under `key`, stamped with `at`.
    ///
    /// Callers must insert in non-decreasing time order. Any previous value for
    /// the key is replaced; its old stamp stays in the timeline and is skipped
    /// when the eviction walk reaches it.
    pub fn insert_at(&mut self, key: K, value: V, at: Instant) {
        let generation = self.next_generation;
        self.next_generation += 1;

        self.timeline.push_back(Stamp {
            inserted_at: at,
            key: key.clone(),
            generation,
        });
        self.entries.insert(key, CacheEntry::new(value, at, generation));
    }

    // == Lookup ==
    /// Returns a clone of the value for `key`, or `default` when absent.
    ///
    /// Does not check age; expiry only happens through `evict_older_than`.
    pub fn lookup(&self, key: &K, default: V) -> V {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns a reference to the value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Evict Older Than ==
    /// Removes every entry older than `max_age`, measured from now.
    ///
    /// Returns the number of entries removed.
    pub fn evict_older_than(&mut self, max_age: Duration) -> usize {
        self.evict_older_than_at(max_age, Instant::now())
    }

    /// Removes every entry older than `max_age`, measured from `now`.
    ///
    /// Walks the timeline from the oldest stamp and stops at the first stamp
    /// that is not older than `max_age`. Every visited stamp is dropped; its
    /// key is removed from the map only if the stamp belongs to the live
    /// entry, so a key inserted again keeps its newer value.
    pub fn evict_older_than_at(&mut self, max_age: Duration, now: Instant) -> usize {
        let mut evicted = 0;
        let mut visited = 0;

        while let Some(stamp) = self.timeline.pop_front() {
            if !stamp.is_expired_at(max_age, now) {
                self.timeline.push_front(stamp);
                break;
            }
            visited += 1;

            let is_live = self
                .entries
                .get(&stamp.key)
                .is_some_and(|entry| stamp.matches(entry));
            if is_live {
                self.entries.remove(&stamp.key);
                evicted += 1;
            }
        }

        if visited > 0 {
            trace!(visited, evicted, "Eviction walk finished");
        }
        evicted
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Pending Stamps ==
    /// Returns the number of stamps still in the timeline, including stamps of
    /// superseded entries.
    pub fn pending_stamps(&self) -> usize {
        self.timeline.len()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.timeline.clear();
    }
}
