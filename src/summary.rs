//! Summary
//!
//! Plain-text rendering of a cart: one table row per line, then the totals. Amounts are kept
//! exact everywhere else and only rounded here, when formatted in the display currency.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::CartState, discounts::NextTier};

/// Errors rendering a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The output could not be written.
    #[error("failed to write cart summary: {0}")]
    Io(#[from] io::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a display currency by ISO code.
///
/// # Errors
///
/// Returns [`SummaryError::UnknownCurrency`] for codes other than INR, GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, SummaryError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => Ok(INR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(SummaryError::UnknownCurrency(other.to_string())),
    }
}

/// Write the cart's lines and totals to `out`.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] if writing fails.
pub fn write_summary(
    mut out: impl io::Write,
    state: &CartState,
    next_tier: Option<&NextTier>,
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    if state.items().is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let money = |amount: Decimal| format_money(amount, currency);

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "MRP", "Price", "Line Total"]);

    for item in state.items() {
        builder.push_record([
            item.name().to_string(),
            item.quantity().to_string(),
            money(item.mrp()),
            money(item.discounted_price()),
            money(item.line_total()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    let totals = state.totals();
    let discount = totals.cart_discount;

    let mut lines = vec![
        ("Items", totals.total_quantity.to_string()),
        ("MRP total", money(totals.original_mrp_total)),
        ("Product savings", money(totals.product_savings)),
        ("Subtotal", money(totals.subtotal)),
    ];

    if discount.has_discount() {
        lines.push((
            "Cart discount",
            format!(
                "({}% over {}) {}",
                discount.percentage.normalize(),
                money(discount.min_value),
                money(discount.discount_amount)
            ),
        ));
    }

    lines.push(("Total", money(totals.total_amount)));
    lines.push(("You save", money(totals.total_savings)));

    let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in &lines {
        writeln!(out, " {label:<label_width$}  {value:>value_width$}")?;
    }

    if let Some(next) = next_tier {
        writeln!(
            out,
            "\nAdd {} more to get {}% off your cart.",
            money(next.amount_needed),
            next.rule.discount_percentage.normalize()
        )?;
    }

    Ok(())
}

/// Format an exact amount in `currency`, rounding half away from zero to minor units.
pub fn format_money(amount: Decimal, currency: &'static Currency) -> String {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| {
            minor
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .map_or_else(
            || format!("{} {}", amount.round_dp(2), currency.iso_alpha_code),
            |minor| Money::from_minor(minor, currency).to_string(),
        )
}
