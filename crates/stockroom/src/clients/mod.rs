//! Typed clients, one per collection. Each wraps a
//! [`ResourceClient`](collection_actor::ResourceClient) and maps framework
//! errors into its own error enum.

pub mod ledger_client;
pub mod product_client;
pub mod user_client;

pub use collection_actor::ActorClient;
pub use ledger_client::TransactionLedger;
pub use product_client::ProductCatalog;
pub use user_client::UserDirectory;
