//! # User Actor
//!
//! The user directory: one actor owning `@users`. The simplest collection in
//! the system, with no updates and no custom actions.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](collection_actor::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserDirectory;
use crate::model::User;
use collection_actor::{DocumentRepository, KeyValueStore, MonotonicIds, ResourceActor};
use std::sync::Arc;

/// Storage key of the user collection.
pub const USERS_KEY: &str = "@users";

/// Creates a new User actor and its client.
pub fn new(
    store: Arc<dyn KeyValueStore>,
    ids: Arc<MonotonicIds>,
    capacity: usize,
) -> (ResourceActor<User>, UserDirectory) {
    let repository = DocumentRepository::<User>::new(store, USERS_KEY);
    let (actor, client) = ResourceActor::new(capacity, Arc::new(repository), ids);
    (actor, UserDirectory::new(client))
}
