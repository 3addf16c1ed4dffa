//! # Framework Errors
//!
//! This module defines the error type every [`ResourceClient`](crate::ResourceClient)
//! call resolves to. It is generic over the entity's own rejection type so that
//! domain errors travel through the actor unchanged instead of being flattened
//! into strings.

use crate::storage::StorageError;

/// Errors that can occur within the actor framework itself.
///
/// `E` is the entity's [`ActorEntity::Error`](crate::ActorEntity::Error). Entities
/// that can never reject a request use [`std::convert::Infallible`].
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Rejected: {0}")]
    Rejected(E),
}
