use bigdecimal::{BigDecimal, RoundingMode};

use super::cart::CartEntry;
use super::catalog::Product;

pub const MONEY_SCALE: i64 = 2;

/// Half-up rounding to two decimal places.
pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

fn line_amount(product: &Product, quantity: i32) -> BigDecimal {
    (&product.price - &product.discount) * BigDecimal::from(quantity)
}

fn line_savings(product: &Product, quantity: i32) -> BigDecimal {
    &product.discount * BigDecimal::from(quantity)
}

/// `round(quantity * (price - discount), 2)`
pub fn line_total(product: &Product, quantity: i32) -> BigDecimal {
    round_money(&line_amount(product, quantity))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub total: BigDecimal,
    pub savings: BigDecimal,
    pub count: i32,
}

impl CartSummary {
    /// Sums are taken over unrounded line amounts and rounded once.
    pub fn from_entries(entries: &[CartEntry]) -> Self {
        let mut total = BigDecimal::from(0);
        let mut savings = BigDecimal::from(0);
        let mut count = 0;
        for entry in entries {
            total += line_amount(&entry.product, entry.line.quantity);
            savings += line_savings(&entry.product, entry.line.quantity);
            count += entry.line.quantity;
        }
        CartSummary {
            total: round_money(&total),
            savings: round_money(&savings),
            count,
        }
    }

    /// Price of the cart before product discounts.
    pub fn gross(&self) -> BigDecimal {
        round_money(&(&self.total + &self.savings))
    }
}
