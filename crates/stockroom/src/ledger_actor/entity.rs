//! [`ActorEntity`] implementation for [`Transaction`].
//!
//! The ledger only ever creates records. Updates and actions are uninhabited
//! types, so no request can alter or remove a stored record, and a create can
//! only fail on I/O.

use crate::model::{AdjustmentOutcome, Product, Transaction, TransactionId, TransactionKind};
use collection_actor::{ActorEntity, Placement, Stamp};
use std::convert::Infallible;

/// What the ledger is asked to record.
#[derive(Debug, Clone)]
pub enum LedgerEntry {
    ProductAdded(Product),
    QuantityAdjusted(AdjustmentOutcome),
}

impl ActorEntity for Transaction {
    type Id = TransactionId;
    type Create = LedgerEntry;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Error = Infallible;

    const PLACEMENT: Placement = Placement::Prepend;

    fn id(&self) -> &TransactionId {
        &self.id
    }

    fn from_create_params(stamp: Stamp, entry: LedgerEntry, _: &[Self]) -> Result<Self, Infallible> {
        let (product, kind) = match entry {
            LedgerEntry::ProductAdded(product) => {
                let kind = TransactionKind::ProductAdded {
                    price: product.price,
                    quantity: product.quantity,
                };
                (product, kind)
            }
            LedgerEntry::QuantityAdjusted(outcome) => {
                let kind = TransactionKind::QuantityAdjusted {
                    adjustment_type: outcome.direction,
                    adjustment_amount: outcome.amount,
                    old_quantity: outcome.old_quantity,
                    new_quantity: outcome.new_quantity,
                };
                (outcome.product, kind)
            }
        };

        Ok(Self {
            id: TransactionId(stamp.id),
            kind,
            product_id: product.id,
            product_name: product.name,
            sku: product.sku,
            timestamp: stamp.at,
        })
    }

    fn on_update(&mut self, update: Infallible, _: &[Self]) -> Result<(), Infallible> {
        match update {}
    }

    fn handle_action(_: &mut Vec<Self>, action: Infallible) -> Result<(), Infallible> {
        match action {}
    }
}
