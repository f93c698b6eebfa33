//! Cart engine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartState, CartStore,
        commands::{CartCommand, apply},
    },
    discounts::{
        AppliedDiscount, DiscountRule, DiscountRules, NextTier,
        source::{DiscountFetchError, DiscountSource, FileDiscountSource, StaticDiscountSource},
    },
    items::{LineItem, Product, ValidationError},
    pricing::{CartTotals, compute_totals},
    storage::{CartStorage, JsonFileStorage, MemoryStorage, PersistenceError},
    summary::{SummaryError, format_money, write_summary},
};
