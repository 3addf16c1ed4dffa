//! Error types for the Product actor.

use crate::model::ValidationError;
use collection_actor::{FrameworkError, StorageError};
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The form input was rejected; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing `@products` failed.
    #[error("Product storage error: {0}")]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CatalogError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            CatalogError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<FrameworkError<ValidationError>> for CatalogError {
    fn from(e: FrameworkError<ValidationError>) -> Self {
        match e {
            FrameworkError::Rejected(v) => CatalogError::Validation(v),
            FrameworkError::NotFound(id) => CatalogError::Validation(ValidationError::NotFound(id)),
            FrameworkError::Storage(s) => CatalogError::Storage(s),
            other @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                CatalogError::ActorCommunicationError(other.to_string())
            }
        }
    }
}
