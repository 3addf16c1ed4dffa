//! Error types for the ledger actor.

use collection_actor::{FrameworkError, StorageError};
use std::convert::Infallible;
use thiserror::Error;

/// Errors from recording or reading transactions.
///
/// The ledger has no domain rules, so every failure is either storage or
/// communication.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<Infallible>> for LedgerError {
    fn from(e: FrameworkError<Infallible>) -> Self {
        match e {
            FrameworkError::Storage(s) => LedgerError::Storage(s),
            FrameworkError::Rejected(never) => match never {},
            other => LedgerError::ActorCommunicationError(other.to_string()),
        }
    }
}
