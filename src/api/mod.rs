//! API Module
//!
//! HTTP handlers and routing for the transaction REST API, the consumer of
//! the cache.
//!
//! # Endpoints
//! - `GET /transactions` - List transactions through the cache
//! - `POST /transactions` - Create a transaction
//! - `PUT /transactions/:id` - Replace a transaction
//! - `DELETE /transactions/:id` - Delete a transaction
//! - `DELETE /cache` - Empty the cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
