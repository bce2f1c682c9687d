use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::catalog::Product;
use super::errors::DomainError;
use super::pricing::CartSummary;

/// Upper bound for the quantity held on a single cart line.
pub const MAX_LINE_QUANTITY: i32 = 5;

/// A row of `order_items`. Open while `order_id` is `None`.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub is_ordered: bool,
    pub order_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A cart line together with the product it prices against.
#[derive(Debug, Clone)]
pub struct CartEntry {
    pub line: CartLine,
    pub product: Product,
}

#[derive(Debug, Clone)]
pub struct CartView {
    pub entries: Vec<CartEntry>,
    pub summary: CartSummary,
}

impl CartView {
    pub fn new(entries: Vec<CartEntry>) -> Self {
        let summary = CartSummary::from_entries(&entries);
        CartView { entries, summary }
    }
}

pub fn validate_quantity(quantity: i32) -> Result<i32, DomainError> {
    if quantity < 1 {
        return Err(DomainError::invalid("quantity must be at least 1"));
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(DomainError::QuantityExceeded {
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(quantity)
}

/// Quantity an existing line ends up with after adding `requested` more.
pub fn merged_quantity(existing: i32, requested: i32) -> Result<i32, DomainError> {
    validate_quantity(requested)?;
    validate_quantity(existing.saturating_add(requested))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Remove,
    Set(i32),
}

impl QuantityChange {
    pub fn from_requested(quantity: i32) -> Result<Self, DomainError> {
        if quantity == 0 {
            Ok(QuantityChange::Remove)
        } else {
            validate_quantity(quantity).map(QuantityChange::Set)
        }
    }
}

/// Ensures `line` is an open line owned by `user_id`.
pub fn ensure_open_line_owner(line: &CartLine, user_id: Uuid, action: &str) -> Result<(), DomainError> {
    if line.is_ordered {
        return Err(DomainError::not_found("Item is not present in Cart"));
    }
    if line.user_id != user_id {
        return Err(DomainError::forbidden(format!(
            "You do not have permission to {} this item",
            action
        )));
    }
    Ok(())
}
