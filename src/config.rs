//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.
//! The cache itself has no global settings; these only choose what the
//! transaction list handler passes to each `set`.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::cache::CacheConfig;

/// Default TTL in seconds for the cached transaction list
pub const DEFAULT_CACHE_TTL: u64 = 300;

/// Default stale time in seconds for the cached transaction list
pub const DEFAULT_CACHE_STALE_TIME: u64 = 60;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Durations used when caching the transaction list
    pub transactions_cache: CacheConfig,
    /// Expiry sweep interval in seconds; 0 disables the sweep
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Transaction list TTL in seconds (default: 300)
    /// - `CACHE_STALE_TIME` - Transaction list stale time in seconds (default: 60)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds, 0 = off (default: 0)
    ///
    /// A negative or unparsable cache duration falls back to the defaults
    /// with a warning.
    pub fn from_env() -> Self {
        let ttl: i64 = env_or("CACHE_TTL", DEFAULT_CACHE_TTL as i64);
        let stale_time: i64 = env_or("CACHE_STALE_TIME", DEFAULT_CACHE_STALE_TIME as i64);

        let transactions_cache = CacheConfig::from_secs(ttl, stale_time).unwrap_or_else(|err| {
            warn!(error = %err, "Ignoring cache durations from environment");
            default_cache_config()
        });

        Self {
            server_port: env_or("SERVER_PORT", 3000),
            transactions_cache,
            sweep_interval: env_or("SWEEP_INTERVAL", 0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            transactions_cache: default_cache_config(),
            sweep_interval: 0,
        }
    }
}

fn default_cache_config() -> CacheConfig {
    CacheConfig::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_STALE_TIME)
}

/// Reads and parses `name`, falling back to `default` if unset or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "Unparsable environment variable, using default");
            default
        }),
        Err(_) => default,
    }
}
