//! Custom actions for the Product actor.
//!
//! Operations that act on the catalog as a whole rather than on one record
//! picked by id. They are handled by
//! [`ActorEntity::handle_action`](collection_actor::ActorEntity::handle_action).

use crate::model::{AdjustmentOutcome, AdjustmentRequest};

/// Catalog-level operations beyond create and update.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Raises or lowers the stock of the product selected by SKU.
    ///
    /// # Errors
    /// Fails without touching the catalog when no product is selected, the
    /// amount is not a positive whole number, the SKU is unknown, or the
    /// result would fall below zero.
    Adjust(AdjustmentRequest),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    Adjusted(AdjustmentOutcome),
}
