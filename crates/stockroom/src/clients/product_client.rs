//! # Product Client
//!
//! High-level API over the Product actor: add, edit and stock adjustment.
//! Listing and lookup by id come from [`ActorClient`].
use crate::model::{AdjustmentOutcome, AdjustmentRequest, Product, ProductDraft, ProductId};
use crate::product_actor::{CatalogError, ProductAction, ProductActionResult};
use collection_actor::{ActorClient, ResourceClient};
use tracing::{debug, instrument};

/// Client for the product catalog.
#[derive(Clone)]
pub struct ProductCatalog {
    inner: ResourceClient<Product>,
}

impl ProductCatalog {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    /// Validates and stores a new product.
    #[instrument(skip(self))]
    pub async fn add(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.create(draft).await?)
    }

    /// Replaces the editable fields of an existing product.
    #[instrument(skip(self))]
    pub async fn edit(&self, id: ProductId, draft: ProductDraft) -> Result<Product, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.update(id, draft).await?)
    }

    /// Raises or lowers stock for the product selected by SKU.
    #[instrument(skip(self))]
    pub async fn adjust_quantity(
        &self,
        request: AdjustmentRequest,
    ) -> Result<AdjustmentOutcome, CatalogError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(ProductAction::Adjust(request))
            .await?
        {
            ProductActionResult::Adjusted(outcome) => Ok(outcome),
        }
    }
}

impl ActorClient<Product> for ProductCatalog {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, ValidationError};
    use chrono::Utc;
    use collection_actor::mock::{create_mock_client, expect_action};
    use collection_actor::FrameworkError;

    fn widget(quantity: u32) -> Product {
        Product {
            id: ProductId("1".into()),
            name: "Widget".into(),
            price: 9.99,
            sku: "W-1".into(),
            quantity,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_adjust_quantity_sends_adjust_action() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let catalog = ProductCatalog::new(client);

        // Spawn task to call adjust_quantity
        let task = tokio::spawn(async move {
            catalog
                .adjust_quantity(AdjustmentRequest::new("W-1", "5", Direction::Increase))
                .await
        });

        // Expect the action request
        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        let ProductAction::Adjust(request) = action;
        assert_eq!(request.sku.as_deref(), Some("W-1"));
        assert_eq!(request.amount, "5");

        responder
            .send(Ok(ProductActionResult::Adjusted(AdjustmentOutcome {
                product: widget(15),
                old_quantity: 10,
                new_quantity: 15,
                direction: Direction::Increase,
                amount: 5,
            })))
            .unwrap();

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome.new_quantity, 15);
    }

    #[tokio::test]
    async fn test_rejection_surfaces_as_validation_error() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let catalog = ProductCatalog::new(client);

        let task = tokio::spawn(async move {
            catalog
                .adjust_quantity(AdjustmentRequest::new("W-1", "20", Direction::Decrease))
                .await
        });

        let (_, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::Rejected(ValidationError::NegativeResult {
                current: 7,
                requested: 20,
            })))
            .unwrap();

        match task.await.unwrap() {
            Err(CatalogError::Validation(ValidationError::NegativeResult { current, requested })) => {
                assert_eq!((current, requested), (7, 20));
            }
            other => panic!("Expected NegativeResult, got {other:?}"),
        }
    }
}
