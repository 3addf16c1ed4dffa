//! Stored record types and the raw form payloads that create them.

pub mod product;
pub mod transaction;
pub mod user;
pub mod validation;

pub use product::*;
pub use transaction::*;
pub use user::*;
pub use validation::ValidationError;
