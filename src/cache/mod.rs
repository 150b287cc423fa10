//! Cache Module
//!
//! Provides an in-memory key-value cache with per-entry TTL and a shorter
//! staleness threshold for stale-while-revalidate reads. Expiry is lazy:
//! accessors delete expired entries when they observe them.

mod clock;
mod config;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use entry::{CacheEntry, Freshness};
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup};

// == Public Constants ==
/// Milliseconds per second, the only unit conversion the cache performs
pub const MS_PER_SEC: u64 = 1000;
