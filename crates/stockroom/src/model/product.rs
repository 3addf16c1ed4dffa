use super::validation::{self, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// A catalog entry as stored under `@products`.
///
/// `id` and `created_at` are fixed at creation. `sku` is unique across the
/// catalog ignoring case, and `quantity` can never go below zero.
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for the
/// validation applied on create, edit and adjust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub sku: String,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// Raw form input for adding or editing a product.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub sku: String,
    pub quantity: String,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        sku: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            sku: sku.into(),
            quantity: quantity.into(),
        }
    }

    /// Checks the form in order: every field present, then price, then quantity.
    ///
    /// SKU uniqueness needs the rest of the catalog and is checked by the caller.
    pub fn validate(&self) -> Result<ValidProduct, ValidationError> {
        let name = validation::required("name", &self.name)?;
        let price = validation::required("price", &self.price)?;
        let sku = validation::required("sku", &self.sku)?;
        let quantity = validation::required("quantity", &self.quantity)?;

        Ok(ValidProduct {
            price: validation::parse_price(price)?,
            quantity: validation::parse_quantity(quantity)?,
            name: name.to_string(),
            sku: sku.to_string(),
        })
    }
}

/// A draft that passed every single-record check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub name: String,
    pub price: f64,
    pub sku: String,
    pub quantity: u32,
}
