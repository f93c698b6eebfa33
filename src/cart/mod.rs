//! Cart
//!
//! [`CartStore`] owns the cart's line items and discount rules. Every mutation goes through
//! [`apply`](commands::apply), which recomputes the totals, and the store then syncs its storage.
//! Storage failures are logged and never surface to the caller; the in-memory cart keeps working.

use tracing::{debug, info, warn};

use crate::{
    discounts::{DiscountRules, NextTier, source::DiscountSource},
    items::{LineItem, Product},
    pricing::{CartTotals, compute_totals},
    storage::CartStorage,
};

pub mod commands;

use commands::{CartCommand, Persistence, apply};

/// Line items, discount rules and the totals derived from them.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    items: Vec<LineItem>,
    rules: DiscountRules,
    totals: CartTotals,
}

impl CartState {
    /// Build state from existing items, dropping any line without a positive quantity.
    pub fn new(items: impl Into<Vec<LineItem>>, rules: DiscountRules) -> Self {
        let mut items = items.into();

        items.retain(|item| item.quantity() > 0);

        let totals = compute_totals(&items, &rules);

        Self {
            items,
            rules,
            totals,
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Discount rules in lookup order.
    pub fn rules(&self) -> &DiscountRules {
        &self.rules
    }

    /// Totals for the current items and rules.
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }
}

/// The cart, synced to a storage backend.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    state: CartState,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart, hydrating items from storage.
    ///
    /// An unreadable record starts an empty cart.
    pub fn open(storage: S) -> Self {
        let items = storage.load().unwrap_or_else(|err| {
            warn!(error = %err, "could not load saved cart, starting empty");
            Vec::new()
        });

        debug!(lines = items.len(), "hydrated cart");

        Self {
            state: CartState::new(items, DiscountRules::default()),
            storage,
        }
    }

    /// Apply a command, then sync storage.
    pub fn dispatch(&mut self, command: CartCommand) {
        debug!(?command, "applying cart command");

        let persistence = command.persistence();

        self.state = apply(std::mem::take(&mut self.state), command);

        match persistence {
            Persistence::Save => {
                if let Err(err) = self.storage.save(&self.state.items) {
                    warn!(error = %err, "could not save cart");
                }
            }
            Persistence::Erase => {
                if let Err(err) = self.storage.clear() {
                    warn!(error = %err, "could not erase saved cart");
                }
            }
            Persistence::Skip => {}
        }
    }

    /// Add one unit of `product`.
    pub fn add_item(&mut self, product: Product) {
        self.dispatch(CartCommand::AddItem(product));
    }

    /// Remove the line with `id`, if present.
    pub fn remove_item(&mut self, id: impl Into<String>) {
        self.dispatch(CartCommand::RemoveItem(id.into()));
    }

    /// Set the quantity of the line with `id`. Zero or below removes it.
    pub fn set_quantity(&mut self, id: impl Into<String>, quantity: i64) {
        self.dispatch(CartCommand::SetQuantity {
            id: id.into(),
            quantity,
        });
    }

    /// Empty the cart and erase the saved record.
    pub fn clear(&mut self) {
        self.dispatch(CartCommand::Clear);
    }

    /// Replace the discount rules.
    pub fn set_discount_rules(&mut self, rules: impl Into<DiscountRules>) {
        self.dispatch(CartCommand::SetDiscountRules(rules.into()));
    }

    /// Fetch rules from `source` and apply them.
    ///
    /// On failure the current rules are kept and the error is logged. Returns whether new rules
    /// were applied.
    pub async fn load_discounts(&mut self, source: &impl DiscountSource) -> bool {
        match source.fetch().await {
            Ok(rules) => {
                info!(rules = rules.len(), "loaded cart discounts");
                self.set_discount_rules(rules);
                true
            }
            Err(err) => {
                warn!(error = %err, "could not load cart discounts");
                false
            }
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Current totals.
    pub fn totals(&self) -> &CartTotals {
        self.state.totals()
    }

    /// Current discount rules.
    pub fn discount_rules(&self) -> &DiscountRules {
        self.state.rules()
    }

    /// The next discount tier the cart could reach.
    pub fn next_discount_tier(&self) -> Option<NextTier> {
        self.state.rules().next_tier(self.state.totals().subtotal)
    }

    /// Whole cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Take back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
