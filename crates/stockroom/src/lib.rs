//! # Stockroom
//!
//! Inventory tracking for a small shop: a product catalog with SKU-unique,
//! never-negative stock, an append-only ledger of stock movements, and a user
//! directory. Each collection is a JSON array in a flat key-value store,
//! owned by one [`collection_actor::ResourceActor`].
//!
//! ## Layout
//!
//! - **[model]**: stored records, form payloads and validation rules
//! - **[product_actor]**, **[ledger_actor]**, **[user_actor]**: entity logic and actor factories
//! - **[clients]**: typed wrappers ([`ProductCatalog`](clients::ProductCatalog), ...) over the actors
//! - **[lifecycle]**: [`InventorySystem`](lifecycle::InventorySystem), the workflows that span collections
//! - **[notifications]**: the one-at-a-time status message queue
//! - **[config]**: [`Settings`](config::Settings) loaded from TOML and the environment

pub mod clients;
pub mod config;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
pub mod notifications;
pub mod product_actor;
pub mod user_actor;
