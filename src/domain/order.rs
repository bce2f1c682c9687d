use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use super::address::{Address, AddressFields};
use super::cart::CartEntry;
use super::errors::DomainError;
use super::pricing::{round_money, CartSummary};

pub const ORDER_CODE_PREFIX: &str = "ODR";
pub const INSTANT_COUPON: &str = "INSTANT10";
pub const MAX_COUPON_LEN: usize = 50;

/// `ODR` followed by six random digits. Uniqueness is enforced by the store.
pub fn generate_order_code() -> String {
    let n: u32 = rand::rng().random_range(100_000..1_000_000);
    format!("{}{}", ORDER_CODE_PREFIX, n)
}

/// Only `INSTANT10` is recognised: 10% of the cart total. Anything else is worth nothing.
pub fn coupon_amount(coupon: Option<&str>, cart_total: &BigDecimal) -> BigDecimal {
    match coupon {
        Some(INSTANT_COUPON) => round_money(&(cart_total * BigDecimal::new(10.into(), 2))),
        _ => round_money(&BigDecimal::from(0)),
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub address_id: Uuid,
    pub coupon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    /// Gross value of the lines before product discounts.
    pub total_amount: BigDecimal,
    pub total_items: i32,
    pub coupon_amount: BigDecimal,
    pub order_amount: BigDecimal,
    pub savings: BigDecimal,
}

impl OrderTotals {
    pub fn compute(summary: &CartSummary, coupon: Option<&str>) -> Self {
        let coupon_amount = coupon_amount(coupon, &summary.total);
        OrderTotals {
            total_amount: summary.gross(),
            total_items: summary.count,
            order_amount: round_money(&(&summary.total - &coupon_amount)),
            savings: round_money(&(&coupon_amount + &summary.savings)),
            coupon_amount,
        }
    }
}

/// Everything needed to persist an order, computed from locked cart lines.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: Uuid,
    pub coupon: Option<String>,
    pub totals: OrderTotals,
    pub address_id: Uuid,
    pub shipping: AddressFields,
    pub line_ids: Vec<Uuid>,
}

pub fn draft_order(
    user_id: Uuid,
    entries: &[CartEntry],
    address: Option<&Address>,
    request: &CheckoutRequest,
) -> Result<OrderDraft, DomainError> {
    if entries.is_empty() {
        return Err(DomainError::EmptyCart);
    }
    let address = address
        .filter(|a| a.user_id == user_id)
        .ok_or_else(|| DomainError::not_found("Address not found"))?;

    // Matched and stored exactly as entered; only a blank code counts as absent.
    let coupon = request.coupon.as_deref().filter(|c| !c.trim().is_empty());
    if coupon.is_some_and(|c| c.chars().count() > MAX_COUPON_LEN) {
        return Err(DomainError::invalid("coupon is too long"));
    }

    let summary = CartSummary::from_entries(entries);
    Ok(OrderDraft {
        user_id,
        coupon: coupon.map(str::to_string),
        totals: OrderTotals::compute(&summary, coupon),
        address_id: address.id,
        shipping: address.fields.clone(),
        line_ids: entries.iter().map(|e| e.line.id).collect(),
    })
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_code: String,
    pub coupon: Option<String>,
    pub totals: OrderTotals,
    /// Cleared when the source address is deleted; `shipping` is kept.
    pub address_id: Option<Uuid>,
    pub shipping: AddressFields,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: Order,
    pub lines: Vec<CartEntry>,
}
