//! # Collection Actor
//!
//! Building blocks for services that each own one persisted collection of
//! records. Every collection is served by a single Tokio task (a
//! [`ResourceActor`]) that receives typed requests over a channel, so requests
//! against the same collection are applied strictly one after another without
//! locks.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into four layers:
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - record type, validation and actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing, one request at a time
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//! 4. **Persistence Layer** ([`Repository`], [`KeyValueStore`]) - whole-collection load and save
//!
//! The actor holds no records between requests. Each request runs the cycle
//! *load full collection → apply hook → save full collection*, which keeps the
//! store the single source of truth and makes a restart lossless.
//!
//! ## Errors
//!
//! [`FrameworkError`] is generic over the entity's own rejection type, so a
//! validation failure raised inside an entity hook reaches the caller as the
//! same typed value, wrapped in [`FrameworkError::Rejected`]. Storage failures
//! and a closed actor get their own variants.
//!
//! ## Ids
//!
//! One [`MonotonicIds`] is shared by all actors of an application. It hands out
//! millisecond-timestamp ids that are unique and creation-ordered across every
//! collection.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockClient`](mock::MockClient) for scripting
//! actor responses and [`FlakyStore`](mock::FlakyStore) for failing writes to
//! chosen keys. [`MemoryStore`] is a drop-in backend for tests.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod ids;
pub mod message;
pub mod mock;
pub mod repository;
pub mod storage;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, Placement};
pub use error::FrameworkError;
pub use ids::{MonotonicIds, Stamp};
pub use message::{ResourceRequest, Response};
pub use repository::{DocumentRepository, Repository};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
