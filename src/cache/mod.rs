//! Cache Module
//!
//! Provides an insertion-age cache whose eviction walks only the expired
//! prefix of an insertion-ordered timeline.

mod entry;
mod expiring;
mod stats;


// Re-export public types
pub use entry::{CacheEntry, Stamp};
pub use expiring::ExpiringCache;
pub use stats::CacheStats;
