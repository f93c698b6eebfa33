//! Discounts
//!
//! Tiered cart-value discount rules. A rule grants `discount_percentage` off the whole cart once
//! the subtotal reaches `min_total_cart_value`. The highest qualifying threshold wins.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod source;

/// A single cart-wide discount tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    /// Subtotal needed for this tier to apply
    pub min_total_cart_value: Decimal,

    /// Discount in percent points (e.g. `10` for 10%)
    pub discount_percentage: Decimal,
}

impl DiscountRule {
    /// Create a new rule.
    pub fn new(min_total_cart_value: Decimal, discount_percentage: Decimal) -> Self {
        Self {
            min_total_cart_value,
            discount_percentage,
        }
    }

    /// The rule's discount as a fractional [`Percentage`].
    pub fn percentage(&self) -> Percentage {
        percentage_from_points(self.discount_percentage)
    }
}

/// The cart-level discount picked for a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    /// Percent points of the matched rule
    pub percentage: Decimal,

    /// Threshold of the matched rule
    pub min_value: Decimal,

    /// `subtotal * percentage / 100`
    pub discount_amount: Decimal,
}

impl AppliedDiscount {
    /// Applied when no rule qualifies.
    pub const NONE: Self = Self {
        percentage: Decimal::ZERO,
        min_value: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
    };

    /// Whether any cart discount is in effect.
    pub fn has_discount(&self) -> bool {
        self.percentage > Decimal::ZERO
    }
}

impl Default for AppliedDiscount {
    fn default() -> Self {
        Self::NONE
    }
}

/// The next tier the cart could unlock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextTier {
    /// The rule that would apply
    pub rule: DiscountRule,

    /// How much more subtotal is needed to reach it
    pub amount_needed: Decimal,
}

/// Discount rules, held in descending threshold order.
///
/// Sorting happens once, when the rules are ingested. Rules sharing a threshold keep their source
/// order, so the earlier one wins a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DiscountRule>", into = "Vec<DiscountRule>")]
pub struct DiscountRules {
    rules: Vec<DiscountRule>,
}

impl DiscountRules {
    /// Ingest rules, sorting them by descending threshold.
    pub fn new(rules: impl Into<Vec<DiscountRule>>) -> Self {
        let mut rules = rules.into();

        rules.sort_by(|a, b| b.min_total_cart_value.cmp(&a.min_total_cart_value));

        Self { rules }
    }

    /// Find the discount for a subtotal.
    ///
    /// Returns [`AppliedDiscount::NONE`] when the subtotal is below every threshold or there are
    /// no rules.
    pub fn applicable(&self, subtotal: Decimal) -> AppliedDiscount {
        self.rules
            .iter()
            .find(|rule| rule.min_total_cart_value <= subtotal)
            .map_or(AppliedDiscount::NONE, |rule| AppliedDiscount {
                percentage: rule.discount_percentage,
                min_value: rule.min_total_cart_value,
                discount_amount: percent_of(rule.discount_percentage, subtotal),
            })
    }

    /// Find the lowest tier still above `subtotal`.
    ///
    /// Among rules sharing that threshold, the one [`applicable`](Self::applicable) would pick is
    /// returned.
    pub fn next_tier(&self, subtotal: Decimal) -> Option<NextTier> {
        self.rules
            .iter()
            .filter(|rule| subtotal < rule.min_total_cart_value)
            .min_by_key(|rule| rule.min_total_cart_value)
            .map(|rule| NextTier {
                rule: rule.clone(),
                amount_needed: rule.min_total_cart_value.saturating_sub(subtotal),
            })
    }

    /// Iterate rules in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &DiscountRule> {
        self.rules.iter()
    }

    /// Rules in lookup order.
    pub fn as_slice(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<DiscountRule>> for DiscountRules {
    fn from(rules: Vec<DiscountRule>) -> Self {
        Self::new(rules)
    }
}

impl From<DiscountRules> for Vec<DiscountRule> {
    fn from(rules: DiscountRules) -> Self {
        rules.rules
    }
}

/// Convert percent points (`20` for 20%) into a fractional [`Percentage`].
pub fn percentage_from_points(points: Decimal) -> Percentage {
    Percentage::from(points / Decimal::ONE_HUNDRED)
}

/// `amount * points / 100`, saturating at the edges of the decimal range.
pub(crate) fn percent_of(points: Decimal, amount: Decimal) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    let fraction = percentage_from_points(points) * Decimal::ONE;

    fraction.checked_mul(amount).unwrap_or({
        if fraction.is_sign_negative() == amount.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}
