//! Transaction records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Transaction Kind ==
/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parses the wire name (`income` / `expense`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

// == Transaction ==
/// A stored financial transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: DateTime<Utc>,
}

// == Transaction Draft ==
/// Validated user input for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: DateTime<Utc>,
}
