//! Request DTOs for the transaction API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CacheError, Result};
use crate::transactions::{TransactionDraft, TransactionKind};

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum category length in characters
pub const MAX_CATEGORY_LENGTH: usize = 50;

/// Request body for creating (POST /transactions) or replacing
/// (PUT /transactions/:id) a transaction.
///
/// Fields are kept as raw JSON so that a missing field and a field of the
/// wrong type both surface as validation errors, all reported at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTransaction {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    /// `income` or `expense`
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    /// RFC 3339 timestamp, offset-less `YYYY-MM-DDTHH:MM:SS` (UTC) or `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<Value>,
}

impl NewTransaction {
    /// Validates the request data
    ///
    /// Returns every failed rule; an empty list means the request is valid.
    /// Blank text counts as missing; length limits apply to the text as sent.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        match text(&self.title) {
            None => errors.push("Title is required".to_string()),
            Some(title) if title.chars().count() > MAX_TITLE_LENGTH => errors.push(format!(
                "Title cannot exceed {} characters",
                MAX_TITLE_LENGTH
            )),
            Some(_) => {}
        }

        match self.amount.as_ref().and_then(Value::as_f64) {
            Some(amount) if amount > 0.0 => {}
            Some(_) => errors.push("Amount must be greater than 0".to_string()),
            None => errors.push("Amount is required and must be a number".to_string()),
        }

        if self.kind().is_none() {
            errors.push("Type must be 'income' or 'expense'".to_string());
        }

        match text(&self.category) {
            None => errors.push("Category is required".to_string()),
            Some(category) if category.chars().count() > MAX_CATEGORY_LENGTH => {
                errors.push(format!(
                    "Category cannot exceed {} characters",
                    MAX_CATEGORY_LENGTH
                ))
            }
            Some(_) => {}
        }

        match &self.date {
            None | Some(Value::Null) => errors.push("Date is required".to_string()),
            Some(Value::String(s)) if s.is_empty() => {
                errors.push("Date is required".to_string())
            }
            Some(_) if self.date().is_none() => {
                errors.push("Date has an invalid format".to_string())
            }
            Some(_) => {}
        }

        errors
    }

    /// Validates and converts into a typed draft. Text is stored as sent.
    pub fn into_draft(self) -> Result<TransactionDraft> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(CacheError::Validation(errors));
        }

        // validate() guarantees every field below is present and well-typed
        let invalid = || CacheError::Validation(vec!["Invalid transaction".to_string()]);
        Ok(TransactionDraft {
            title: text(&self.title).ok_or_else(invalid)?.to_string(),
            amount: self
                .amount
                .as_ref()
                .and_then(Value::as_f64)
                .ok_or_else(invalid)?,
            kind: self.kind().ok_or_else(invalid)?,
            category: text(&self.category).ok_or_else(invalid)?.to_string(),
            date: self.date().ok_or_else(invalid)?,
        })
    }

    fn kind(&self) -> Option<TransactionKind> {
        self.kind
            .as_ref()
            .and_then(Value::as_str)
            .and_then(TransactionKind::parse)
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        self.date.as_ref().and_then(Value::as_str).and_then(parse_date)
    }
}

/// Returns the field as a string when it is one and is not blank.
fn text(field: &Option<Value>) -> Option<&str> {
    field
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Parses an RFC 3339 timestamp, an offset-less date-time (taken as UTC),
/// or a bare `YYYY-MM-DD` date (midnight UTC).
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
