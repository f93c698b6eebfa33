//! Cart commands
//!
//! Every cart mutation is a [`CartCommand`] run through [`apply`]. No command is ever rejected;
//! each is a total transition over the current state.

use crate::{
    cart::CartState,
    discounts::DiscountRules,
    items::{LineItem, Product},
    pricing::compute_totals,
};

/// A mutation of the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add one unit of a product, creating the line if needed.
    AddItem(Product),

    /// Drop the line with this id.
    RemoveItem(String),

    /// Set a line's quantity exactly. Zero or below removes the line.
    SetQuantity {
        /// Line id
        id: String,

        /// New quantity
        quantity: i64,
    },

    /// Empty the cart.
    Clear,

    /// Replace the discount rules wholesale.
    SetDiscountRules(DiscountRules),
}

/// What the store must do with its persisted record after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Write the current items.
    Save,

    /// Delete the record.
    Erase,

    /// Leave the record alone.
    Skip,
}

impl CartCommand {
    /// The persistence effect that follows this command.
    pub fn persistence(&self) -> Persistence {
        match self {
            CartCommand::AddItem(_)
            | CartCommand::RemoveItem(_)
            | CartCommand::SetQuantity { .. } => Persistence::Save,
            CartCommand::Clear => Persistence::Erase,
            CartCommand::SetDiscountRules(_) => Persistence::Skip,
        }
    }
}

/// Apply a command and recompute totals.
pub fn apply(mut state: CartState, command: CartCommand) -> CartState {
    match command {
        CartCommand::AddItem(product) => {
            match state.items.iter_mut().find(|item| item.id() == product.id) {
                Some(existing) => existing.increment(),
                None => state.items.push(LineItem::from_product(product)),
            }
        }
        CartCommand::RemoveItem(id) => state.items.retain(|item| item.id() != id),
        CartCommand::SetQuantity { id, quantity } => {
            if quantity > 0 {
                if let Some(item) = state.items.iter_mut().find(|item| item.id() == id) {
                    item.set_quantity(quantity);
                }
            } else {
                state.items.retain(|item| item.id() != id);
            }
        }
        CartCommand::Clear => state.items.clear(),
        CartCommand::SetDiscountRules(rules) => state.rules = rules,
    }

    state.totals = compute_totals(&state.items, &state.rules);

    state
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{discounts::DiscountRule, pricing::CartTotals};

    use super::*;

    fn product(id: &str, mrp: i64, discount: i64) -> Product {
        Product::new(id, id, Decimal::from(mrp), Decimal::from(discount))
    }

    fn run(commands: impl IntoIterator<Item = CartCommand>) -> CartState {
        commands.into_iter().fold(CartState::default(), apply)
    }

    #[test]
    fn add_new_item_inserts_with_quantity_one() {
        let state = run([CartCommand::AddItem(product("p1", 100, 20))]);

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items().first().map(LineItem::quantity), Some(1));
        assert_eq!(state.totals().subtotal, Decimal::from(80));
    }

    #[test]
    fn add_existing_item_increments_and_keeps_price() {
        let state = run([
            CartCommand::AddItem(product("p1", 100, 20)),
            CartCommand::AddItem(product("p1", 100, 50)),
        ]);

        let item = state.items().first();

        assert_eq!(state.items().len(), 1);
        assert_eq!(item.map(LineItem::quantity), Some(2));
        assert_eq!(
            item.map(LineItem::discounted_price),
            Some(Decimal::from(80))
        );
        assert_eq!(state.totals().subtotal, Decimal::from(160));
    }

    #[test]
    fn remove_missing_item_is_noop() {
        let state = run([
            CartCommand::AddItem(product("p1", 100, 0)),
            CartCommand::RemoveItem("other".to_string()),
        ]);

        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn set_quantity_sets_exact_value() {
        let state = run([
            CartCommand::AddItem(product("p1", 10, 0)),
            CartCommand::SetQuantity {
                id: "p1".to_string(),
                quantity: 7,
            },
        ]);

        assert_eq!(state.totals().total_quantity, 7);
        assert_eq!(state.totals().subtotal, Decimal::from(70));
    }

    #[test]
    fn set_quantity_zero_or_negative_removes() {
        for quantity in [0, -5] {
            let state = run([
                CartCommand::AddItem(product("p1", 10, 0)),
                CartCommand::SetQuantity {
                    id: "p1".to_string(),
                    quantity,
                },
            ]);

            assert!(state.items().is_empty());
            assert_eq!(*state.totals(), CartTotals::EMPTY);
        }
    }

    #[test]
    fn set_quantity_missing_item_is_noop() {
        let state = run([CartCommand::SetQuantity {
            id: "missing-id".to_string(),
            quantity: 5,
        }]);

        assert!(state.items().is_empty());
        assert_eq!(*state.totals(), CartTotals::EMPTY);
    }

    #[test]
    fn clear_resets_items_but_keeps_rules() {
        let rules = DiscountRules::new(vec![DiscountRule::new(
            Decimal::from(10),
            Decimal::from(5),
        )]);

        let state = run([
            CartCommand::SetDiscountRules(rules.clone()),
            CartCommand::AddItem(product("p1", 100, 0)),
            CartCommand::Clear,
        ]);

        assert!(state.items().is_empty());
        assert_eq!(*state.totals(), CartTotals::EMPTY);
        assert_eq!(state.rules(), &rules);
    }

    #[test]
    fn set_discount_rules_recomputes_existing_cart() {
        let state = run([
            CartCommand::AddItem(product("p1", 100, 20)),
            CartCommand::SetDiscountRules(DiscountRules::new(vec![
                DiscountRule::new(Decimal::from(50), Decimal::from(10)),
                DiscountRule::new(Decimal::from(100), Decimal::from(20)),
            ])),
        ]);

        assert_eq!(state.totals().cart_discount.percentage, Decimal::from(10));
        assert_eq!(state.totals().total_amount, Decimal::from(72));
    }

    #[test]
    fn persistence_effects() {
        assert_eq!(
            CartCommand::AddItem(product("p1", 1, 0)).persistence(),
            Persistence::Save
        );
        assert_eq!(
            CartCommand::RemoveItem("p1".to_string()).persistence(),
            Persistence::Save
        );
        assert_eq!(CartCommand::Clear.persistence(), Persistence::Erase);
        assert_eq!(
            CartCommand::SetDiscountRules(DiscountRules::default()).persistence(),
            Persistence::Skip
        );
    }
}
