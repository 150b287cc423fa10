//! API Routes
//!
//! Configures the Axum router with all transaction API endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, create_transaction_handler, delete_transaction_handler, health_handler,
    list_transactions_handler, stats_handler, update_transaction_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /transactions` - List transactions (cached, stale-while-revalidate)
/// - `POST /transactions` - Create a transaction
/// - `PUT /transactions/:id` - Replace a transaction
/// - `DELETE /transactions/:id` - Delete a transaction
/// - `DELETE /cache` - Empty the cache
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/transactions",
            get(list_transactions_handler).post(create_transaction_handler),
        )
        .route(
            "/transactions/:id",
            put(update_transaction_handler).delete(delete_transaction_handler),
        )
        .route("/cache", delete(clear_cache_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
