//! SWR Cache - An in-memory TTL cache with stale-while-revalidate tracking
//!
//! Provides a key-value store whose entries expire after a TTL and are
//! flagged stale after a shorter threshold, plus the transaction API that
//! reads through it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod transactions;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
