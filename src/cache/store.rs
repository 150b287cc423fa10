//! Cache Store Module
//!
//! Main cache engine: HashMap storage with per-entry TTL and staleness,
//! expired lazily by whichever accessor observes them.
//!
//! The store is an ordinary owned value. It is constructed once and shared
//! by the caller (the HTTP layer wraps it in `Arc<RwLock<_>>`); there is no
//! process-wide singleton. Coherency is per instance: two processes each
//! hold their own store.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cache::{CacheConfig, CacheEntry, CacheStats, Clock, Freshness, SystemClock};

// == Lookup ==
/// Result of a staleness-aware read.
///
/// `data` is `None` when the key was never set or has expired; in that case
/// `is_stale` is always `false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup<T> {
    /// The cached value, if live
    pub data: Option<T>,
    /// True when the value is live but past its stale time
    pub is_stale: bool,
}

impl<T> Lookup<T> {
    /// A lookup that found nothing.
    pub fn absent() -> Self {
        Self {
            data: None,
            is_stale: false,
        }
    }
}

// == Cache Store ==
/// In-memory cache with TTL expiry and stale-while-revalidate flags.
///
/// Values are handed back by `Clone`. Store `Arc<_>` values to share one
/// allocation between the cache and its readers; the `Arc` keeps the shared
/// value immutable.
#[derive(Debug)]
pub struct CacheStore<T, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Performance statistics
    stats: CacheStats,
    /// Time source for entry ages
    clock: C,
}

impl<T: Clone> CacheStore<T, SystemClock> {
    // == Constructor ==
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T: Clone> Default for CacheStore<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: Clock> CacheStore<T, C> {
    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key`, replacing any previous entry.
    ///
    /// The replacement is total: new value, new durations, and the freshness
    /// clock restarts at the time of this write. Keys must be non-empty;
    /// debug builds assert it.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `data` - The value to store
    /// * `config` - TTL and stale time in seconds
    pub fn set(&mut self, key: impl Into<String>, data: T, config: &CacheConfig) {
        let key = key.into();
        debug_assert!(!key.is_empty(), "cache key must not be empty");
        let entry = CacheEntry::new(data, self.clock.now_ms(), config);
        trace!(key = %key, ttl = config.ttl, stale_time = config.stale_time, "cache set");

        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Stale values are returned like fresh ones; use `get_with_stale` to
    /// tell them apart. An expired entry is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<T> {
        self.get_with_stale(key).data
    }

    // == Get With Stale ==
    /// Retrieves a live value by key along with its staleness flag.
    ///
    /// Callers serve `data` regardless of `is_stale`; a stale result is the
    /// signal to refresh the key out of band.
    pub fn get_with_stale(&mut self, key: &str) -> Lookup<T> {
        let found = self
            .live_entry(key)
            .map(|(entry, freshness)| (entry.data.clone(), freshness == Freshness::Stale));

        match found {
            Some((data, is_stale)) => {
                self.stats.record_hit(is_stale);
                Lookup {
                    data: Some(data),
                    is_stale,
                }
            }
            None => {
                self.stats.record_miss();
                Lookup::absent()
            }
        }
    }

    // == Has Cache ==
    /// Returns true if `key` holds a live entry. Removes it if expired.
    pub fn has_cache(&mut self, key: &str) -> bool {
        self.live_entry(key).is_some()
    }

    // == Clear ==
    /// Removes the entry at `key`. Absent keys are a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn clear_cache(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            trace!(key = %key, "cache cleared");
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear All ==
    /// Empties the store. Statistics counters are kept.
    pub fn clear_all_cache(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        debug!(count, "cache emptied");
    }

    // == Sweep Expired ==
    /// Removes every expired entry in one pass.
    ///
    /// Accessors never need this; it only bounds memory held by keys nobody
    /// reads anymore. Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));

        let count = before - self.entries.len();
        self.stats.record_expirations(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet
    /// observed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `key`, deleting it first if it has expired.
    fn live_entry(&mut self, key: &str) -> Option<(&CacheEntry<T>, Freshness)> {
        let now = self.clock.now_ms();
        let freshness = self.entries.get(key)?.freshness(now);

        if freshness == Freshness::Expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            trace!(key = %key, "cache entry expired");
            return None;
        }

        self.entries.get(key).map(|entry| (entry, freshness))
    }
}
