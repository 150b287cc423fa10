//! In-memory transaction repository.
//!
//! Stands in for a database: a newest-first `Vec` that lives as long as
//! the process.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{CacheError, Result};
use crate::transactions::{Transaction, TransactionDraft, TransactionKind};

/// Owner assigned to every transaction; there is no auth layer.
const DEFAULT_USER_ID: &str = "user-123";

// == Transaction Repository ==
#[derive(Debug)]
pub struct TransactionRepository {
    /// Newest first
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl TransactionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a repository holding a handful of demo transactions.
    pub fn seeded() -> Self {
        let mut repo = Self::new();
        let seed = [
            ("Monthly salary", 2500.0, TransactionKind::Income, "Work", (2024, 1, 1)),
            ("Rent", 850.0, TransactionKind::Expense, "Housing", (2024, 1, 2)),
            ("Groceries", 120.5, TransactionKind::Expense, "Food", (2024, 1, 5)),
            ("Freelance project", 600.0, TransactionKind::Income, "Work", (2024, 1, 10)),
            ("Electricity bill", 75.3, TransactionKind::Expense, "Utilities", (2024, 1, 12)),
        ];

        for (title, amount, kind, category, (y, m, d)) in seed {
            let date = Utc
                .with_ymd_and_hms(y, m, d, 0, 0, 0)
                .single()
                .unwrap_or_default();
            repo.insert(TransactionDraft {
                title: title.to_string(),
                amount,
                kind,
                category: category.to_string(),
                date,
            });
        }
        repo
    }

    // == List ==
    /// Returns all transactions, newest first.
    pub fn list(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    // == Create ==
    /// Stores a new transaction dated `now`, ignoring the draft's date.
    pub fn create(&mut self, draft: TransactionDraft, now: DateTime<Utc>) -> Transaction {
        self.insert(TransactionDraft { date: now, ..draft })
    }

    // == Update ==
    /// Replaces every user-editable field of transaction `id`.
    pub fn update(&mut self, id: &str, draft: TransactionDraft) -> Result<Transaction> {
        let tx = self
            .transactions
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| CacheError::NotFound(format!("Transaction '{}'", id)))?;

        tx.title = draft.title;
        tx.amount = draft.amount;
        tx.kind = draft.kind;
        tx.category = draft.category;
        tx.date = draft.date;
        Ok(tx.clone())
    }

    // == Delete ==
    /// Removes transaction `id` and returns it.
    pub fn delete(&mut self, id: &str) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or_else(|| CacheError::NotFound(format!("Transaction '{}'", id)))?;
        Ok(self.transactions.remove(index))
    }

    /// Returns the number of stored transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true if no transactions are stored.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn insert(&mut self, draft: TransactionDraft) -> Transaction {
        let tx = Transaction {
            id: self.next_id.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            title: draft.title,
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category,
            date: draft.date,
        };
        self.next_id += 1;
        self.transactions.insert(0, tx.clone());
        tx
    }
}

impl Default for TransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}
