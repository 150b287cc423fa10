//! Cache Config Module
//!
//! Per-write durations. Callers speak seconds; entries compare milliseconds.

use serde::Deserialize;

use crate::cache::MS_PER_SEC;
use crate::error::{CacheError, Result};

// == Cache Config ==
/// Lifetime settings supplied with every `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Seconds before the entry is treated as absent
    pub ttl: u64,
    /// Seconds before a live entry is flagged stale
    pub stale_time: u64,
}

impl CacheConfig {
    // == Constructor ==
    /// Creates a config from unsigned seconds.
    ///
    /// A zero `ttl` expires the entry as soon as any time passes; a zero
    /// `stale_time` flags it stale as soon as any time passes.
    pub fn new(ttl: u64, stale_time: u64) -> Self {
        if stale_time > ttl {
            tracing::debug!(
                ttl,
                stale_time,
                "stale_time exceeds ttl; entries will expire before turning stale"
            );
        }
        Self { ttl, stale_time }
    }

    /// Creates a config from signed seconds, rejecting negative values.
    ///
    /// # Arguments
    /// * `ttl` - Lifetime in seconds
    /// * `stale_time` - Freshness window in seconds
    pub fn from_secs(ttl: i64, stale_time: i64) -> Result<Self> {
        if ttl < 0 {
            return Err(CacheError::InvalidConfig(format!(
                "ttl must not be negative, got {}",
                ttl
            )));
        }
        if stale_time < 0 {
            return Err(CacheError::InvalidConfig(format!(
                "stale_time must not be negative, got {}",
                stale_time
            )));
        }
        Ok(Self::new(ttl as u64, stale_time as u64))
    }

    // == Unit Conversion ==
    /// TTL in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl.saturating_mul(MS_PER_SEC)
    }

    /// Staleness threshold in milliseconds.
    pub fn stale_time_ms(&self) -> u64 {
        self.stale_time.saturating_mul(MS_PER_SEC)
    }
}
