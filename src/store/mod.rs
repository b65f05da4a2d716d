//! Transaction Log Store Module
//! 
//! This module defines the single capability the resolver needs from the
//! switch transaction log: an exact-match lookup on five normalized keys.
//! 
//! # Storage
//! The production adapter is a pooled sqlx database (`SqlTransactionLog`).
//! Lookups are read-only; nothing in this crate writes to the log at request time.

mod database;

#[cfg(test)]
mod tests;

pub use database::SqlTransactionLog;

use crate::TransactionRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Marker the upstream driver puts in its text when the destination host is unreachable
pub const DESTINATION_UNREACHABLE_MARKER: &str = "ORA-12543";

/// Normalized lookup key, already in the store's native encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub reference_number: String,
    /// Left-padded to 6 digits
    pub sequence_number: String,
    /// 12 digits, rescaled to the store's minor unit
    pub amount: String,
    pub terminal_id: String,
    /// `YYMMDD`
    pub settlement_date: String,
}

/// Failures of the store round-trip
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transaction log destination unreachable: {0}")]
    Unreachable(String),
    #[error("timed out waiting for a transaction log connection")]
    PoolTimedOut,
    #[error("transaction log query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Classify a driver failure by its text
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(DESTINATION_UNREACHABLE_MARKER) {
            StoreError::Unreachable(message)
        } else {
            StoreError::Query(message)
        }
    }
}

/// Read-only access to the switch transaction log
///
/// Implementations acquire whatever connection they need for one call and
/// release it before returning, on every path.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// All rows matching every field of `key`; zero or more
    async fn find(&self, key: &LookupKey) -> Result<Vec<TransactionRecord>, StoreError>;
}
