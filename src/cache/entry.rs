//! Cache Entry Module
//!
//! Defines individual cache entries and the expiry/staleness arithmetic.

use crate::cache::CacheConfig;

// == Freshness ==
/// Where an entry sits in its lifecycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Within `stale_after`
    Fresh,
    /// Past `stale_after` but within `ttl`; still served
    Stale,
    /// Past `ttl`; treated as absent
    Expired,
}

// == Cache Entry ==
/// Represents a single cache entry with value and lifetime metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value, never inspected by the cache
    pub data: T,
    /// Write timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Milliseconds after `created_at` until the entry expires
    pub ttl_ms: u64,
    /// Milliseconds after `created_at` until the entry is flagged stale
    pub stale_after_ms: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry written at `now_ms`.
    ///
    /// # Arguments
    /// * `data` - The value to store
    /// * `now_ms` - Write time in Unix milliseconds
    /// * `config` - TTL and stale time in seconds
    pub fn new(data: T, now_ms: u64, config: &CacheConfig) -> Self {
        Self {
            data,
            created_at: now_ms,
            ttl_ms: config.ttl_ms(),
            stale_after_ms: config.stale_time_ms(),
        }
    }

    // == Age ==
    /// Milliseconds since the entry was written. A clock that moved
    /// backwards yields 0.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived its TTL.
    ///
    /// Boundary condition: an entry whose age equals its TTL is still live;
    /// it expires on the first millisecond past that.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) > self.ttl_ms
    }

    // == Is Stale ==
    /// Checks if the entry is live but past its staleness threshold.
    pub fn is_stale(&self, now_ms: u64) -> bool {
        self.freshness(now_ms) == Freshness::Stale
    }

    // == Freshness ==
    /// Classifies the entry at `now_ms`.
    pub fn freshness(&self, now_ms: u64) -> Freshness {
        let age = self.age_ms(now_ms);
        if age > self.ttl_ms {
            Freshness::Expired
        } else if age > self.stale_after_ms {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }
}
