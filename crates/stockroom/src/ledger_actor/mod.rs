//! # Ledger Actor
//!
//! Append-only transaction history under `@transactions`, newest first.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](collection_actor::ActorEntity) implementation for [`Transaction`]
//! - [`error`] - [`LedgerError`] type
//! - [`new()`] - Factory function that creates the actor and client
//!
//! The ledger is written after the catalog, as a separate step. A failed
//! ledger write does not undo the catalog change that preceded it.

pub mod entity;
pub mod error;

pub use entity::LedgerEntry;
pub use error::*;

use crate::clients::TransactionLedger;
use crate::model::Transaction;
use collection_actor::{DocumentRepository, KeyValueStore, MonotonicIds, ResourceActor};
use std::sync::Arc;

/// Storage key of the transaction collection.
pub const TRANSACTIONS_KEY: &str = "@transactions";

/// Creates a new ledger actor and its client.
pub fn new(
    store: Arc<dyn KeyValueStore>,
    ids: Arc<MonotonicIds>,
    capacity: usize,
) -> (ResourceActor<Transaction>, TransactionLedger) {
    let repository = DocumentRepository::<Transaction>::new(store, TRANSACTIONS_KEY);
    let (actor, client) = ResourceActor::new(capacity, Arc::new(repository), ids);
    (actor, TransactionLedger::new(client))
}
