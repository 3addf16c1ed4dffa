//! # Product Actor
//!
//! The product catalog: one actor owning the `@products` collection.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](collection_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`CatalogError`] returned by [`ProductCatalog`]
//! - [`actions`] - [`ProductAction`] for stock adjustment
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use collection_actor::{MemoryStore, MonotonicIds};
//! use stockroom::model::{AdjustmentRequest, Direction, ProductDraft};
//! use stockroom::product_actor;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, catalog) = product_actor::new(Arc::new(MemoryStore::new()), Arc::new(MonotonicIds::new()), 32);
//!     tokio::spawn(actor.run());
//!
//!     catalog.add(ProductDraft::new("Widget", "9.99", "W-1", "10")).await?;
//!     let outcome = catalog
//!         .adjust_quantity(AdjustmentRequest::new("w-1", "3", Direction::Decrease))
//!         .await?;
//!     assert_eq!(outcome.new_quantity, 7);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductCatalog;
use crate::model::Product;
use collection_actor::{DocumentRepository, KeyValueStore, MonotonicIds, ResourceActor};
use std::sync::Arc;

/// Storage key of the product collection.
pub const PRODUCTS_KEY: &str = "@products";

/// Creates a new Product actor and its client.
pub fn new(
    store: Arc<dyn KeyValueStore>,
    ids: Arc<MonotonicIds>,
    capacity: usize,
) -> (ResourceActor<Product>, ProductCatalog) {
    let repository = DocumentRepository::<Product>::new(store, PRODUCTS_KEY);
    let (actor, client) = ResourceActor::new(capacity, Arc::new(repository), ids);
    (actor, ProductCatalog::new(client))
}
