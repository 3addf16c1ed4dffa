//! Form-level validation shared by every collection.
//!
//! Inputs arrive as raw form strings. Each helper trims, parses and checks one
//! field, returning the first problem found. The `Display` text of
//! [`ValidationError`] is what gets shown to the person filling in the form.

use thiserror::Error;

/// A user-correctable problem, detected before anything is written.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// A required field was empty after trimming.
    #[error("Please fill in all required fields")]
    MissingField(&'static str),

    #[error("Please enter a valid price (numbers only, decimals allowed)")]
    InvalidPrice,

    #[error("Please enter a valid quantity (whole numbers only)")]
    InvalidQuantity,

    #[error("SKU already exists. Please use a unique SKU.")]
    DuplicateSku,

    /// An adjustment was requested without choosing a product.
    #[error("Please select a product")]
    NotSelected,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Quantity cannot be negative")]
    NegativeResult { current: u32, requested: u32 },

    #[error("Quantity is too large")]
    QuantityOverflow { current: u32, requested: u32 },

    /// No product matches the given id or SKU.
    #[error("Product not found")]
    NotFound(String),
}

/// Returns the trimmed value, or `MissingField` when nothing is left.
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    match value.trim() {
        "" => Err(ValidationError::MissingField(field)),
        trimmed => Ok(trimmed),
    }
}

/// A finite decimal strictly greater than zero.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price > 0.0)
        .ok_or(ValidationError::InvalidPrice)
}

/// A whole number strictly greater than zero. `"10.5"` is rejected, not truncated.
pub fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    positive_integer(raw).ok_or(ValidationError::InvalidQuantity)
}

/// An adjustment amount; same rule as [`parse_quantity`], different message.
pub fn parse_amount(raw: &str) -> Result<u32, ValidationError> {
    positive_integer(raw).ok_or(ValidationError::InvalidAmount)
}

fn positive_integer(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// SKUs compare case-insensitively.
pub fn same_sku(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
