//! Expiry Sweep Task
//!
//! Optional background task that periodically removes expired entries.
//! Reads already expire entries lazily; this only reclaims memory held by
//! keys that are never read again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStore, Clock};

/// Spawns a background task that sweeps expired entries every
/// `interval_secs` seconds.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval_secs` - Seconds between sweeps; must be non-zero
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::<String>::new()));
/// let sweep_handle = spawn_sweep_task(cache.clone(), 30);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<T, C>(
    cache: Arc<RwLock<CacheStore<T, C>>>,
    interval_secs: u64,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
    C: Clock + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "Starting cache expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if removed > 0 {
                info!(removed, "Expiry sweep removed entries");
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, ManualClock};

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_removes_expired_entries() {
        let clock = ManualClock::new(0);
        let cache = Arc::new(RwLock::new(CacheStore::with_clock(clock.clone())));

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("expire_soon", "value", &CacheConfig::new(1, 0));
            cache_guard.set("long_lived", "value", &CacheConfig::new(3600, 60));
        }
        clock.advance_secs(2);

        let handle = spawn_sweep_task(cache.clone(), 1);

        // Paused runtime: sleeping auto-advances tokio time past one interval
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let cache_guard = cache.read().await;
            assert_eq!(cache_guard.len(), 1, "Expired entry should have been swept");
            assert_eq!(cache_guard.stats().expirations, 1);
        }
        {
            let mut cache_guard = cache.write().await;
            assert!(cache_guard.has_cache("long_lived"));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(CacheStore::<String>::new()));

        let handle = spawn_sweep_task(cache, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
