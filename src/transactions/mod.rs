//! Transactions Module
//!
//! The data behind the cached list: transaction records and an in-memory
//! repository seeded with demo data. Nothing here touches the cache; the
//! API layer reads through and invalidates it.

mod model;
mod repository;

pub use model::{Transaction, TransactionDraft, TransactionKind};
pub use repository::TransactionRepository;
