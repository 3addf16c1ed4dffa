//! [`ActorEntity`] implementation for [`Product`].
//!
//! Every catalog rule lives here: field validation on create and edit, SKU
//! uniqueness across the catalog, and the non-negative stock check on
//! adjustment. The actor only persists what these hooks accept.

use super::actions::{ProductAction, ProductActionResult};
use crate::model::validation::same_sku;
use crate::model::{
    AdjustmentOutcome, AdjustmentRequest, Direction, Product, ProductDraft, ProductId,
    ValidationError,
};
use collection_actor::{ActorEntity, Stamp};

impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductDraft;
    type Update = ProductDraft;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ValidationError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Validates the draft and checks its SKU against the whole catalog.
    fn from_create_params(
        stamp: Stamp,
        draft: ProductDraft,
        existing: &[Self],
    ) -> Result<Self, ValidationError> {
        let valid = draft.validate()?;
        ensure_unique_sku(&valid.sku, existing, None)?;

        Ok(Self {
            id: ProductId(stamp.id),
            name: valid.name,
            price: valid.price,
            sku: valid.sku,
            quantity: valid.quantity,
            created_at: stamp.at,
        })
    }

    /// Replaces the editable fields. `id` and `created_at` are kept; the SKU
    /// may stay the same as this product's own.
    fn on_update(&mut self, draft: ProductDraft, existing: &[Self]) -> Result<(), ValidationError> {
        let valid = draft.validate()?;
        ensure_unique_sku(&valid.sku, existing, Some(&self.id))?;

        self.name = valid.name;
        self.price = valid.price;
        self.sku = valid.sku;
        self.quantity = valid.quantity;
        Ok(())
    }

    fn handle_action(
        items: &mut Vec<Self>,
        action: ProductAction,
    ) -> Result<ProductActionResult, ValidationError> {
        match action {
            ProductAction::Adjust(request) => adjust(items, request).map(ProductActionResult::Adjusted),
        }
    }
}

fn ensure_unique_sku(
    sku: &str,
    catalog: &[Product],
    except: Option<&ProductId>,
) -> Result<(), ValidationError> {
    let taken = catalog
        .iter()
        .filter(|p| Some(&p.id) != except)
        .any(|p| same_sku(&p.sku, sku));
    if taken {
        Err(ValidationError::DuplicateSku)
    } else {
        Ok(())
    }
}

fn adjust(
    catalog: &mut [Product],
    request: AdjustmentRequest,
) -> Result<AdjustmentOutcome, ValidationError> {
    let sku = request
        .sku
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::NotSelected)?;
    let amount = crate::model::validation::parse_amount(&request.amount)?;

    let product = catalog
        .iter_mut()
        .find(|p| same_sku(&p.sku, sku))
        .ok_or_else(|| ValidationError::NotFound(sku.to_string()))?;

    let current = product.quantity;
    let new_quantity = match request.direction {
        Direction::Increase => current.checked_add(amount).ok_or(ValidationError::QuantityOverflow {
            current,
            requested: amount,
        })?,
        Direction::Decrease => current.checked_sub(amount).ok_or(ValidationError::NegativeResult {
            current,
            requested: amount,
        })?,
    };
    product.quantity = new_quantity;

    Ok(AdjustmentOutcome {
        product: product.clone(),
        old_quantity: current,
        new_quantity,
        direction: request.direction,
        amount,
    })
}
