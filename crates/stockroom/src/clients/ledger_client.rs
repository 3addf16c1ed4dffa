//! # Ledger Client
//!
//! Records catalog events. Reading the history is [`ActorClient::list`].
use crate::ledger_actor::{LedgerEntry, LedgerError};
use crate::model::{AdjustmentOutcome, Product, Transaction};
use collection_actor::{ActorClient, ResourceClient};
use tracing::{debug, instrument};

/// Client for the transaction ledger.
#[derive(Clone)]
pub struct TransactionLedger {
    inner: ResourceClient<Transaction>,
}

impl TransactionLedger {
    pub fn new(inner: ResourceClient<Transaction>) -> Self {
        Self { inner }
    }

    /// Prepends a `quantity_adjusted` record for an accepted adjustment.
    #[instrument(skip(self, outcome), fields(sku = %outcome.product.sku))]
    pub async fn record_adjustment(
        &self,
        outcome: &AdjustmentOutcome,
    ) -> Result<Transaction, LedgerError> {
        debug!("Sending request");
        Ok(self
            .inner
            .create(LedgerEntry::QuantityAdjusted(outcome.clone()))
            .await?)
    }

    /// Prepends a `product_added` record for a newly created product.
    #[instrument(skip(self, product), fields(sku = %product.sku))]
    pub async fn record_product_added(&self, product: &Product) -> Result<Transaction, LedgerError> {
        debug!("Sending request");
        Ok(self
            .inner
            .create(LedgerEntry::ProductAdded(product.clone()))
            .await?)
    }
}

impl ActorClient<Transaction> for TransactionLedger {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<Transaction> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_actor::mock::MockClient;
    use collection_actor::FrameworkError;

    #[tokio::test]
    async fn test_closed_ledger_maps_to_communication_error() {
        let mut mock = MockClient::<Transaction>::new();
        mock.expect_list().return_err(FrameworkError::ActorClosed);

        let ledger = TransactionLedger::new(mock.client());
        let err = ledger.list().await.unwrap_err();

        assert!(matches!(err, LedgerError::ActorCommunicationError(_)));
        mock.verify();
    }
}
