//! Command-line configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::{
    cart::commands::CartCommand,
    items::{Product, ValidationError},
    storage::DEFAULT_CART_KEY,
};

/// Cart engine command-line arguments
#[derive(Debug, Parser)]
#[command(name = "cart-engine", about = "Storefront cart pricing engine", long_about = None)]
pub struct CartArgs {
    /// Directory holding the persisted cart record
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".cart")]
    pub storage_dir: PathBuf,

    /// Name of the persisted cart record
    #[arg(long, env = "CART_STORAGE_KEY", default_value = DEFAULT_CART_KEY)]
    pub storage_key: String,

    /// JSON or YAML file with cart discount rules
    #[arg(short, long, env = "CART_DISCOUNTS")]
    pub discounts: Option<PathBuf>,

    /// Display currency (INR, GBP, USD, EUR)
    #[arg(short, long, env = "CART_CURRENCY", default_value = "INR")]
    pub currency: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// What to do with the cart
    #[command(subcommand)]
    pub action: CartAction,
}

/// Cart actions
#[derive(Debug, Clone, Subcommand)]
pub enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Product name
        #[arg(long)]
        name: String,

        /// List price per unit
        #[arg(long)]
        mrp: Decimal,

        /// Product discount in percent
        #[arg(long, default_value = "0")]
        discount: Decimal,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,
    },

    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },

    /// Set a product's quantity; zero or below removes it
    SetQuantity {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,

    /// Show the cart without changing it
    Show,
}

impl CartAction {
    /// Convert to a cart command. `Show` has none.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if an added product is malformed.
    pub fn into_command(self) -> Result<Option<CartCommand>, ValidationError> {
        let command = match self {
            CartAction::Add {
                id,
                name,
                mrp,
                discount,
                image,
            } => {
                let product = Product::new(id, name, mrp, discount).with_image(image);
                product.validate()?;

                CartCommand::AddItem(product)
            }
            CartAction::Remove { id } => CartCommand::RemoveItem(id),
            CartAction::SetQuantity { id, quantity } => CartCommand::SetQuantity { id, quantity },
            CartAction::Clear => CartCommand::Clear,
            CartAction::Show => return Ok(None),
        };

        Ok(Some(command))
    }
}
