//! Items
//!
//! Products as supplied by the catalog, and the line items the cart stores for them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::discounts::percent_of;

/// Errors raised when a product fails boundary validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The product has no identifier.
    #[error("product id must not be empty")]
    EmptyId,

    /// The list price is negative (product id, price).
    #[error("product {0} has negative MRP {1}")]
    NegativeMrp(String, Decimal),

    /// The discount percentage is outside `0..=100` (product id, percentage).
    #[error("product {0} has discount {1}%, expected 0 to 100")]
    DiscountOutOfRange(String, Decimal),
}

/// A catalog product that can be added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable product identifier
    #[serde(alias = "uniqueItemId")]
    pub id: String,

    /// Display name
    pub name: String,

    /// List price per unit
    #[serde(alias = "MRP")]
    pub mrp: Decimal,

    /// Product-level discount, in percent points
    #[serde(default)]
    pub discount_percent: Decimal,

    /// Display image URL
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mrp: Decimal,
        discount_percent: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mrp,
            discount_percent,
            image: String::new(),
        }
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Unit price after the product-level discount.
    pub fn discounted_price(&self) -> Decimal {
        self.mrp
            .saturating_sub(percent_of(self.discount_percent, self.mrp))
    }

    /// Check the product is well formed.
    ///
    /// The pricing engine does not call this; out-of-range values flow through its arithmetic
    /// unchanged. Input boundaries call it before dispatching to the cart.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyId`]: the id is blank.
    /// - [`ValidationError::NegativeMrp`]: the list price is below zero.
    /// - [`ValidationError::DiscountOutOfRange`]: the discount is outside `0..=100`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }

        if self.mrp < Decimal::ZERO {
            return Err(ValidationError::NegativeMrp(self.id.clone(), self.mrp));
        }

        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED {
            return Err(ValidationError::DiscountOutOfRange(
                self.id.clone(),
                self.discount_percent,
            ));
        }

        Ok(())
    }
}

/// A product instance held in the cart.
///
/// `discounted_price` is captured when the line is first created and is never refreshed, even if
/// the product's discount changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(alias = "uniqueItemId")]
    id: String,

    name: String,

    #[serde(alias = "MRP")]
    mrp: Decimal,

    #[serde(default)]
    discount_percent: Decimal,

    discounted_price: Decimal,

    quantity: i64,

    #[serde(default)]
    image: String,
}

impl LineItem {
    /// Create a line for a product with quantity 1.
    pub fn from_product(product: Product) -> Self {
        let discounted_price = product.discounted_price();

        Self {
            id: product.id,
            name: product.name,
            mrp: product.mrp,
            discount_percent: product.discount_percent,
            discounted_price,
            quantity: 1,
            image: product.image,
        }
    }

    /// Product identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// List price per unit
    pub fn mrp(&self) -> Decimal {
        self.mrp
    }

    /// Product-level discount in percent points
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Unit price frozen at insertion
    pub fn discounted_price(&self) -> Decimal {
        self.discounted_price
    }

    /// Number of units
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Display image URL
    pub fn image(&self) -> &str {
        &self.image
    }

    /// `mrp * quantity`
    pub fn mrp_total(&self) -> Decimal {
        self.mrp.saturating_mul(Decimal::from(self.quantity))
    }

    /// `discounted_price * quantity`
    pub fn line_total(&self) -> Decimal {
        self.discounted_price
            .saturating_mul(Decimal::from(self.quantity))
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product() -> Product {
        Product::new("p1", "Test Product", Decimal::from(100), Decimal::from(20))
            .with_image("/img/p1.png")
    }

    #[test]
    fn discounted_price_applies_percentage() {
        assert_eq!(product().discounted_price(), Decimal::from(80));
    }

    #[test]
    fn discounted_price_keeps_fractions() {
        let product = Product::new("p2", "Odd", Decimal::new(9999, 2), Decimal::from(15));

        assert_eq!(product.discounted_price(), Decimal::new(849915, 4));
    }

    #[test]
    fn from_product_starts_at_quantity_one() {
        let line = LineItem::from_product(product());

        assert_eq!(line.id(), "p1");
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.discounted_price(), Decimal::from(80));
        assert_eq!(line.image(), "/img/p1.png");
    }

    #[test]
    fn line_totals_scale_with_quantity() {
        let mut line = LineItem::from_product(product());
        line.set_quantity(3);

        assert_eq!(line.mrp_total(), Decimal::from(300));
        assert_eq!(line.line_total(), Decimal::from(240));
    }

    #[test]
    fn validate_accepts_well_formed_product() -> TestResult {
        product().validate()?;

        Ok(())
    }

    #[test]
    fn validate_rejects_bad_values() {
        let blank = Product::new(" ", "Blank", Decimal::from(1), Decimal::from(0));
        let negative = Product::new("n", "Negative", Decimal::from(-1), Decimal::from(0));
        let over = Product::new("o", "Over", Decimal::from(10), Decimal::from(120));

        assert_eq!(blank.validate(), Err(ValidationError::EmptyId));
        assert_eq!(
            negative.validate(),
            Err(ValidationError::NegativeMrp("n".to_string(), Decimal::from(-1)))
        );
        assert_eq!(
            over.validate(),
            Err(ValidationError::DiscountOutOfRange(
                "o".to_string(),
                Decimal::from(120)
            ))
        );
    }

    #[test]
    fn deserializes_storefront_field_names() -> TestResult {
        let line: LineItem = serde_json::from_str(
            r#"{"uniqueItemId":"p1","name":"Test","MRP":100,"discountPercent":20,
                "discountedPrice":80,"quantity":2,"image":"x.png","rating":4.5}"#,
        )?;

        assert_eq!(line.id(), "p1");
        assert_eq!(line.mrp(), Decimal::from(100));
        assert_eq!(line.quantity(), 2);

        Ok(())
    }
}
