//! Transaction Resolution Module
//! 
//! This module turns validated inquiry fields into a coded outcome:
//! 1. Normalize the fields into the transaction log's key encoding
//! 2. Look the key up through the injected `TransactionLog`
//! 3. Classify the returned rows (not found, failed, reversed, processed)
//! 
//! Store and internal failures never escape as errors; they are mapped to
//! E8 or E9 at the `Resolver` boundary.

pub mod normalize;
mod classify;
mod resolver;


pub use classify::classify;
pub use normalize::NormalizeError;
pub use resolver::Resolver;

use crate::{store::StoreError, ResultCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no outcome defined for MSG_TYPE {message_type:?} with WORK_PROGRESS {work_progress:?}")]
    Unclassified {
        message_type: String,
        work_progress: String,
    },
}

impl ResolveError {
    /// Code reported to the caller; detail stays in the logs
    pub fn result_code(&self) -> ResultCode {
        match self {
            ResolveError::Store(StoreError::Unreachable(_)) => ResultCode::DestinationUnreachable,
            ResolveError::Store(_) | ResolveError::Normalize(_) | ResolveError::Unclassified { .. } => {
                ResultCode::SystemError
            }
        }
    }
}
