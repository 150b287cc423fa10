//! Response DTOs for the transaction API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::sync::Arc;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::transactions::Transaction;

/// Response body for the list operation (GET /transactions)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListResponse {
    /// The transactions, newest first
    pub data: Arc<Vec<Transaction>>,
    /// Whether the list was served from the cache
    pub from_cache: bool,
    /// Whether the cached list was past its stale time
    pub is_stale: bool,
}

/// Response body for the DELETE operation (DELETE /transactions/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Transaction '{}' deleted successfully", id),
            id,
        }
    }
}

/// Response body for the cache reset (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped
    pub cleared: usize,
}

impl ClearCacheResponse {
    /// Creates a new ClearCacheResponse
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cache entries", cleared),
            cleared,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups that returned data
    pub hits: u64,
    /// Hits that were past their stale time
    pub stale_hits: u64,
    /// Lookups that found nothing live
    pub misses: u64,
    /// Entries dropped for outliving their TTL
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Stale-list refreshes started in the background
    pub background_refreshes: u64,
}

impl StatsResponse {
    /// Creates a stats response from store counters and the refresh count
    pub fn new(stats: CacheStats, background_refreshes: u64) -> Self {
        Self {
            background_refreshes,
            ..Self::from(stats)
        }
    }
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            background_refreshes: 0,
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            stale_hits: stats.stale_hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
