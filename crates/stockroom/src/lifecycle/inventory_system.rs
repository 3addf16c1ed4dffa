use crate::clients::{ActorClient, ProductCatalog, TransactionLedger, UserDirectory};
use crate::config::Settings;
use crate::ledger_actor::LedgerError;
use crate::model::{
    AdjustmentOutcome, AdjustmentRequest, Product, ProductDraft, ProductId, Transaction, User,
    UserDraft, ValidationError,
};
use crate::notifications::{self, Notification, Notifier};
use crate::product_actor::CatalogError;
use crate::user_actor::UserError;
use collection_actor::{KeyValueStore, MonotonicIds};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, instrument, warn};

/// Errors from the user-level workflows.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Users(#[from] UserError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The catalog change was committed but the ledger write after it failed.
    /// The catalog is not rolled back; `product` is what is now stored.
    #[error("{} was saved but its transaction was not recorded: {source}", .product.sku)]
    Unrecorded {
        product: Box<Product>,
        #[source]
        source: LedgerError,
    },

    #[error("actor task failed during shutdown: {0}")]
    Shutdown(#[from] JoinError),
}

/// The running application: three collection actors and a notification dispatcher.
///
/// # Example
///
/// ```rust
/// use collection_actor::MemoryStore;
/// use stockroom::config::Settings;
/// use stockroom::lifecycle::InventorySystem;
/// use stockroom::model::ProductDraft;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = InventorySystem::new(Arc::new(MemoryStore::new()), &Settings::default());
///     system.add_product(ProductDraft::new("Widget", "9.99", "W-1", "10")).await?;
///     assert_eq!(system.products().await?.len(), 1);
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct InventorySystem {
    /// Client for the product catalog
    pub catalog: ProductCatalog,

    /// Client for the transaction ledger
    pub ledger: TransactionLedger,

    /// Client for the user directory
    pub users: UserDirectory,

    notifier: Notifier,
    record_product_additions: bool,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
    dispatcher: JoinHandle<()>,
}

impl InventorySystem {
    /// Starts every actor on `store`. Must be called inside a Tokio runtime.
    pub fn new(store: Arc<dyn KeyValueStore>, settings: &Settings) -> Self {
        let ids = Arc::new(MonotonicIds::new());
        let capacity = settings.channel_capacity;

        // 1. Create actors
        let (product_actor, catalog) =
            crate::product_actor::new(store.clone(), ids.clone(), capacity);
        let (ledger_actor, ledger) = crate::ledger_actor::new(store.clone(), ids.clone(), capacity);
        let (user_actor, users) = crate::user_actor::new(store, ids, capacity);
        let (dispatcher, notifier) = notifications::channel(settings.notification_display());

        // 2. Start them
        let handles = vec![
            tokio::spawn(product_actor.run()),
            tokio::spawn(ledger_actor.run()),
            tokio::spawn(user_actor.run()),
        ];
        let dispatcher = tokio::spawn(dispatcher.run());

        Self {
            catalog,
            ledger,
            users,
            notifier,
            record_product_additions: settings.record_product_additions,
            handles,
            dispatcher,
        }
    }

    /// Observes the notification currently on screen.
    pub fn notifications(&self) -> watch::Receiver<Option<Notification>> {
        self.notifier.subscribe()
    }

    /// Receives every notification queued after this call, even ones already
    /// cleared from the screen.
    pub fn notification_tap(&self) -> broadcast::Receiver<Notification> {
        self.notifier.tap()
    }

    /// Adds a product, optionally records it in the ledger, and notifies.
    #[instrument(skip(self))]
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, InventoryError> {
        let product = self
            .catalog
            .add(draft)
            .await
            .inspect_err(|e| {
                self.notify_failure(e.validation(), "Failed to save product. Please try again.")
            })?;

        if self.record_product_additions {
            if let Err(source) = self.ledger.record_product_added(&product).await {
                warn!(sku = %product.sku, error = %source, "Product saved but not recorded");
                self.notifier
                    .error("Product saved, but the transaction history could not be updated.");
                return Err(InventoryError::Unrecorded {
                    product: Box::new(product),
                    source,
                });
            }
        }

        info!(id = %product.id, sku = %product.sku, "Product added");
        self.notifier.success("Product added successfully!");
        Ok(product)
    }

    /// Edits a product in place. Edits are not written to the ledger.
    #[instrument(skip(self))]
    pub async fn edit_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, InventoryError> {
        let product = self
            .catalog
            .edit(id, draft)
            .await
            .inspect_err(|e| {
                self.notify_failure(e.validation(), "Failed to update product. Please try again.")
            })?;

        self.notifier.success("Product updated successfully!");
        Ok(product)
    }

    /// Adjusts stock, then records the adjustment.
    ///
    /// The two writes are independent. If the ledger write fails the new
    /// quantity stays committed and [`InventoryError::Unrecorded`] is returned.
    #[instrument(skip(self))]
    pub async fn adjust_stock(
        &self,
        request: AdjustmentRequest,
    ) -> Result<AdjustmentOutcome, InventoryError> {
        let outcome = self
            .catalog
            .adjust_quantity(request)
            .await
            .inspect_err(|e| {
                self.notify_failure(e.validation(), "Failed to adjust product. Please try again.")
            })?;

        if let Err(source) = self.ledger.record_adjustment(&outcome).await {
            warn!(sku = %outcome.product.sku, error = %source, "Adjustment committed but not recorded");
            self.notifier.error(format!(
                "Quantity updated to {}, but the transaction could not be recorded.",
                outcome.new_quantity
            ));
            return Err(InventoryError::Unrecorded {
                product: Box::new(outcome.product),
                source,
            });
        }

        self.notifier.success(format!(
            "Quantity {} by {}. New quantity: {}",
            outcome.direction.verb(),
            outcome.amount,
            outcome.new_quantity
        ));
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn add_user(&self, draft: UserDraft) -> Result<User, InventoryError> {
        let user = self
            .users
            .add(draft)
            .await
            .inspect_err(|e| {
                self.notify_failure(e.validation(), "Failed to save user. Please try again.")
            })?;

        self.notifier.success("User added successfully!");
        Ok(user)
    }

    pub async fn products(&self) -> Result<Vec<Product>, InventoryError> {
        Ok(self.catalog.list().await?)
    }

    pub async fn users(&self) -> Result<Vec<User>, InventoryError> {
        Ok(self.users.list().await?)
    }

    /// Ledger records, newest first.
    pub async fn history(&self) -> Result<Vec<Transaction>, InventoryError> {
        Ok(self.ledger.list().await?)
    }

    fn notify_failure(&self, validation: Option<&ValidationError>, fallback: &str) {
        match validation {
            Some(v) => self.notifier.error(v.to_string()),
            None => self.notifier.error(fallback),
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Waits for every actor to finish its queued requests. Notifications not
    /// yet shown are discarded.
    pub async fn shutdown(self) -> Result<(), InventoryError> {
        info!("Shutting down system...");

        // Closing every mailbox lets each actor drain and exit.
        drop(self.catalog);
        drop(self.ledger);
        drop(self.users);

        let mut first_failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Actor task failed");
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }

        self.dispatcher.abort();
        drop(self.notifier);

        match first_failure {
            Some(e) => Err(e.into()),
            None => {
                info!("All actors stopped");
                Ok(())
            }
        }
    }
}
