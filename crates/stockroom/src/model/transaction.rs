use super::product::{Product, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for ledger records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Which way a stock adjustment goes. Stored as `"+"` or `"-"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "+")]
    Increase,
    #[serde(rename = "-")]
    Decrease,
}

impl Direction {
    pub fn sign(self) -> char {
        match self {
            Direction::Increase => '+',
            Direction::Decrease => '-',
        }
    }

    /// Past-tense verb for messages: "increased" / "decreased".
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Increase => "increased",
            Direction::Decrease => "decreased",
        }
    }
}

/// An immutable ledger record, stored newest-first under `@transactions`.
///
/// The product fields are a snapshot taken when the record was written; later
/// edits to the product do not change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(flatten)]
    pub kind: TransactionKind,
    pub product_id: ProductId,
    pub product_name: String,
    pub sku: String,
    pub timestamp: DateTime<Utc>,
}

/// The event a [`Transaction`] records, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    #[serde(rename_all = "camelCase")]
    QuantityAdjusted {
        adjustment_type: Direction,
        adjustment_amount: u32,
        old_quantity: u32,
        new_quantity: u32,
    },
    #[serde(rename_all = "camelCase")]
    ProductAdded { price: f64, quantity: u32 },
}

/// Raw form input for a stock adjustment.
#[derive(Debug, Clone)]
pub struct AdjustmentRequest {
    /// The selected product's SKU; `None` when nothing was picked.
    pub sku: Option<String>,
    pub amount: String,
    pub direction: Direction,
}

impl AdjustmentRequest {
    pub fn new(sku: impl Into<String>, amount: impl Into<String>, direction: Direction) -> Self {
        Self {
            sku: Some(sku.into()),
            amount: amount.into(),
            direction,
        }
    }
}

/// What an accepted adjustment did to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentOutcome {
    /// The product as stored after the adjustment.
    pub product: Product,
    pub old_quantity: u32,
    pub new_quantity: u32,
    pub direction: Direction,
    pub amount: u32,
}
