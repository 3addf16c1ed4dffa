//! Error types for the User actor.

use crate::model::ValidationError;
use collection_actor::{FrameworkError, StorageError};
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User storage error: {0}")]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl UserError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            UserError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<FrameworkError<ValidationError>> for UserError {
    fn from(e: FrameworkError<ValidationError>) -> Self {
        match e {
            FrameworkError::Rejected(v) => UserError::Validation(v),
            FrameworkError::Storage(s) => UserError::Storage(s),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
