//! Cache Entry Module
//!
//! Defines the stored value slot and the timeline stamp that records when it
//! was inserted.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// The live value for a key together with its insertion metadata.
///
/// Entries are never mutated; a later insert for the same key replaces the
/// whole entry and carries a newer generation.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the value was inserted
    pub inserted_at: Instant,
    /// Insert counter value at the time of insertion
    pub generation: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: V, inserted_at: Instant, generation: u64) -> Self {
        Self {
            value,
            inserted_at,
            generation,
        }
    }
}

// == Timeline Stamp ==
/// One position in the insertion-ordered timeline.
///
/// A stamp outlives the entry it was created for when the key is inserted
/// again; the generation tells the eviction walk whether the stamp still
/// refers to the live entry.
#[derive(Debug, Clone)]
pub struct Stamp<K> {
    pub inserted_at: Instant,
    pub key: K,
    pub generation: u64,
}

impl<K> Stamp<K> {
    /// Returns true when the stamp is strictly older than `max_age` at `now`.
    pub fn is_expired_at(&self, max_age: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) > max_age
    }

    /// Returns true when `entry` is the value this stamp was created for.
    pub fn matches<V>(&self, entry: &CacheEntry<V>) -> bool {
        self.generation == entry.generation
    }
}
