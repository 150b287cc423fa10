//! API Handlers
//!
//! HTTP request handlers for the transaction API. The list endpoint reads
//! through the cache with stale-while-revalidate; every write invalidates
//! the cached list.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheConfig, CacheStore, Clock, SystemClock};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearCacheResponse, DeleteResponse, HealthResponse, NewTransaction, StatsResponse,
    TransactionListResponse,
};
use crate::transactions::{Transaction, TransactionRepository};

/// Cache key under which the full transaction list is memoized
pub const TRANSACTIONS_CACHE_KEY: &str = "transactions_list";

/// `Cache-Control` for a fresh list (cached or just computed)
pub const CACHE_CONTROL_FRESH: &str = "public, max-age=60, s-maxage=120";

/// `Cache-Control` for a stale list served while it is being refreshed
pub const CACHE_CONTROL_STALE: &str = "public, max-age=1, stale-while-revalidate=300";

/// Cache of shared, immutable transaction lists.
pub type TransactionCache = CacheStore<Arc<Vec<Transaction>>, Arc<dyn Clock>>;

/// Application state shared across all handlers.
///
/// Lock order is repository then cache wherever both are held, so a
/// refresh can never re-cache a list that a concurrent write already
/// invalidated.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<TransactionCache>>,
    /// Backing data for the cached list
    pub transactions: Arc<RwLock<TransactionRepository>>,
    /// Durations used when caching the list
    pub cache_config: CacheConfig,
    /// Set while a background refresh is in flight
    refreshing: Arc<AtomicBool>,
    /// Number of background refreshes started
    refreshes: Arc<AtomicU64>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(
        cache: TransactionCache,
        transactions: TransactionRepository,
        cache_config: CacheConfig,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            transactions: Arc::new(RwLock::new(transactions)),
            cache_config,
            refreshing: Arc::new(AtomicBool::new(false)),
            refreshes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses the system clock and the seeded demo transactions.
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new AppState from configuration reading time from `clock`.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            CacheStore::with_clock(clock),
            TransactionRepository::seeded(),
            config.transactions_cache,
        )
    }

    /// Recomputes the list from the repository and caches it.
    async fn reload_transactions(&self) -> Arc<Vec<Transaction>> {
        let repo = self.transactions.read().await;
        let data = Arc::new(repo.list());
        self.cache
            .write()
            .await
            .set(TRANSACTIONS_CACHE_KEY, Arc::clone(&data), &self.cache_config);
        data
    }

    /// Drops the cached list. Call while still holding the repository
    /// write guard.
    async fn invalidate_transactions(&self) {
        self.cache.write().await.clear_cache(TRANSACTIONS_CACHE_KEY);
    }

    /// Returns how many background refreshes have been started.
    pub fn background_refreshes(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }

    /// Refreshes the cached list in the background, unless a refresh is
    /// already running.
    fn spawn_refresh(&self) {
        if self.refreshing.swap(true, Ordering::AcqRel) {
            return;
        }
        self.refreshes.fetch_add(1, Ordering::Relaxed);

        let state = self.clone();
        tokio::spawn(async move {
            let _guard = RefreshGuard(Arc::clone(&state.refreshing));
            let data = state.reload_transactions().await;
            debug!(count = data.len(), "Refreshed stale transaction list");
        });
    }
}

/// Clears the in-flight refresh flag when dropped, even if the refresh
/// task panics.
struct RefreshGuard(Arc<AtomicBool>);

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Unwraps a transaction body, turning extractor rejections into
/// `CacheError`s: ill-shaped JSON is a validation error, anything
/// unreadable (bad syntax, wrong content type) fails the request.
fn transaction_body(
    payload: std::result::Result<Json<NewTransaction>, JsonRejection>,
    action: &str,
) -> Result<NewTransaction> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(JsonRejection::JsonDataError(err)) => {
            Err(CacheError::Validation(vec![err.body_text()]))
        }
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Unreadable transaction body");
            Err(CacheError::Internal(format!(
                "Failed to {} transaction",
                action
            )))
        }
    }
}

/// Handler for GET /transactions
///
/// Serves the cached list when live, flagging and refreshing it when stale.
/// On a miss the list is computed, cached and returned.
pub async fn list_transactions_handler(State(state): State<AppState>) -> Response {
    let lookup = state
        .cache
        .write()
        .await
        .get_with_stale(TRANSACTIONS_CACHE_KEY);

    if let Some(data) = lookup.data {
        let cache_control = if lookup.is_stale {
            state.spawn_refresh();
            CACHE_CONTROL_STALE
        } else {
            CACHE_CONTROL_FRESH
        };

        let body = TransactionListResponse {
            data,
            from_cache: true,
            is_stale: lookup.is_stale,
        };
        return ([(header::CACHE_CONTROL, cache_control)], Json(body)).into_response();
    }

    debug!("Transaction list cache miss");
    let data = state.reload_transactions().await;
    let body = TransactionListResponse {
        data,
        from_cache: false,
        is_stale: false,
    };
    ([(header::CACHE_CONTROL, CACHE_CONTROL_FRESH)], Json(body)).into_response()
}

/// Handler for POST /transactions
///
/// Validates and stores a new transaction, then invalidates the cached list.
pub async fn create_transaction_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>)> {
    let draft = transaction_body(payload, "create")?.into_draft()?;

    let mut repo = state.transactions.write().await;
    let created = repo.create(draft, chrono::Utc::now());
    state.invalidate_transactions().await;
    drop(repo);

    info!(id = %created.id, "Transaction created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for PUT /transactions/:id
///
/// Replaces a transaction, then invalidates the cached list.
pub async fn update_transaction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<NewTransaction>, JsonRejection>,
) -> Result<Json<Transaction>> {
    let draft = transaction_body(payload, "update")?.into_draft()?;

    let mut repo = state.transactions.write().await;
    let updated = repo.update(&id, draft)?;
    state.invalidate_transactions().await;
    drop(repo);

    info!(id = %id, "Transaction updated");
    Ok(Json(updated))
}

/// Handler for DELETE /transactions/:id
///
/// Deletes a transaction, then invalidates the cached list.
pub async fn delete_transaction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut repo = state.transactions.write().await;
    repo.delete(&id)?;
    state.invalidate_transactions().await;
    drop(repo);

    info!(id = %id, "Transaction deleted");
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for DELETE /cache
///
/// Empties the whole cache.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let mut cache = state.cache.write().await;
    let cleared = cache.len();
    cache.clear_all_cache();

    info!(cleared, "Cache cleared");
    Json(ClearCacheResponse::new(cleared))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(cache.stats(), state.background_refreshes()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
