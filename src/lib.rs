//! Cart Engine
//!
//! Cart pricing and discount recalculation for a storefront. Line items and tiered cart-value
//! discount rules go in; quantities, subtotals, product and cart-level savings and the payable
//! total come out, recomputed from scratch after every mutation.

pub mod cart;
pub mod cli;
pub mod discounts;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod storage;
pub mod summary;
