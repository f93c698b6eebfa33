//! Pricing
//!
//! The totals projection for a cart. Everything here is recomputed from the line items and
//! discount rules on every call; nothing is patched incrementally.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    discounts::{AppliedDiscount, DiscountRules},
    items::LineItem,
};

/// Totals derived from a cart's line items and discount rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of line quantities
    pub total_quantity: i64,

    /// Sum of `mrp * quantity`
    #[serde(rename = "originalMRPTotal")]
    pub original_mrp_total: Decimal,

    /// Sum of `discounted_price * quantity`
    pub subtotal: Decimal,

    /// `original_mrp_total - subtotal`
    pub product_savings: Decimal,

    /// Cart-level discount matched against `subtotal`
    pub cart_discount: AppliedDiscount,

    /// `subtotal - cart_discount.discount_amount`
    pub total_amount: Decimal,

    /// `product_savings + cart_discount.discount_amount`
    pub total_savings: Decimal,
}

impl CartTotals {
    /// Totals for an empty cart.
    pub const EMPTY: Self = Self {
        total_quantity: 0,
        original_mrp_total: Decimal::ZERO,
        subtotal: Decimal::ZERO,
        product_savings: Decimal::ZERO,
        cart_discount: AppliedDiscount::NONE,
        total_amount: Decimal::ZERO,
        total_savings: Decimal::ZERO,
    };
}

/// Compute the full totals projection.
///
/// Malformed prices (negative MRP, discounts outside `0..=100`) are not rejected; they flow
/// through the arithmetic as-is.
pub fn compute_totals(items: &[LineItem], rules: &DiscountRules) -> CartTotals {
    let (total_quantity, original_mrp_total, subtotal) = items.iter().fold(
        (0_i64, Decimal::ZERO, Decimal::ZERO),
        |(quantity, mrp_total, subtotal), item| {
            (
                quantity.saturating_add(item.quantity()),
                mrp_total.saturating_add(item.mrp_total()),
                subtotal.saturating_add(item.line_total()),
            )
        },
    );

    let product_savings = original_mrp_total.saturating_sub(subtotal);
    let cart_discount = rules.applicable(subtotal);

    CartTotals {
        total_quantity,
        original_mrp_total,
        subtotal,
        product_savings,
        cart_discount,
        total_amount: subtotal.saturating_sub(cart_discount.discount_amount),
        total_savings: product_savings.saturating_add(cart_discount.discount_amount),
    }
}
