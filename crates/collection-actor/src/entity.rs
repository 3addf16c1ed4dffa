//! # ActorEntity Trait
//!
//! The contract a record type signs to be managed by a [`ResourceActor`](crate::ResourceActor).
//! Hooks receive the whole stored collection, so rules that span records (unique
//! keys, lookups by a secondary field) live next to the entity they protect.

use crate::ids::Stamp;
use std::fmt::{Debug, Display};

/// Where newly created records go in the stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Oldest first.
    Append,
    /// Newest first, as a log reads.
    Prepend,
}

/// Trait that any stored record type must implement to be managed by a `ResourceActor`.
///
/// # Design Note: Error Granularity
///
/// One error type per entity, not one per request. A catalog's create, update and
/// actions all reject with the same enum, so clients match on a single type.
/// Entities that can never reject use [`std::convert::Infallible`].
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier of a record.
    type Id: Eq + Clone + Send + Sync + Display + Debug + 'static;

    /// The data required to create a new record.
    type Create: Send + Debug + 'static;

    /// The data required to update an existing record.
    type Update: Send + Debug + 'static;

    /// Collection-level operations that are neither create nor update.
    type Action: Send + Debug + 'static;

    /// The result type returned by actions.
    type ActionResult: Send + Debug + 'static;

    /// The rejection type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Where [`ResourceActor`](crate::ResourceActor) puts created records.
    const PLACEMENT: Placement = Placement::Append;

    fn id(&self) -> &Self::Id;

    /// Builds a record from a fresh stamp and the creation payload.
    ///
    /// `existing` is the collection as currently stored, before the new record
    /// is added. Returning an error leaves storage untouched.
    fn from_create_params(
        stamp: Stamp,
        params: Self::Create,
        existing: &[Self],
    ) -> Result<Self, Self::Error>;

    /// Applies an update in place.
    ///
    /// `existing` still contains the record's pre-update state. The actor works
    /// on a copy, so an error discards any partial change.
    fn on_update(&mut self, update: Self::Update, existing: &[Self]) -> Result<(), Self::Error>;

    /// Runs an action against the whole collection.
    ///
    /// The collection is only written back when this returns `Ok`.
    fn handle_action(
        items: &mut Vec<Self>,
        action: Self::Action,
    ) -> Result<Self::ActionResult, Self::Error>;
}
