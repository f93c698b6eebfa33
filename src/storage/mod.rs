//! Storage
//!
//! Durable storage for the cart's line items. Only the raw item list is stored; totals are always
//! recomputed after loading.

use std::io;

use thiserror::Error;

use crate::items::LineItem;

pub mod file;
pub mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Record key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Errors reading or writing the persisted cart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The underlying store could not be read or written.
    #[error("cart storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The record could not be encoded or decoded.
    #[error("cart record is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store refused the operation (disabled, over quota).
    #[error("cart storage unavailable: {0}")]
    Unavailable(String),
}

/// Where the cart's line items live between runs.
pub trait CartStorage {
    /// Read the persisted items. A missing record is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the record exists but cannot be read or decoded.
    fn load(&self) -> Result<Vec<LineItem>, PersistenceError>;

    /// Replace the persisted record with `items`.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the record cannot be encoded or written.
    fn save(&mut self, items: &[LineItem]) -> Result<(), PersistenceError>;

    /// Delete the persisted record.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the record exists but cannot be removed.
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

/// Encode items as the persisted JSON array.
///
/// # Errors
///
/// Returns a [`PersistenceError::Serialization`] if encoding fails.
pub fn encode_items(items: &[LineItem]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(items)?)
}

/// Decode a persisted JSON array into items.
///
/// # Errors
///
/// Returns a [`PersistenceError::Serialization`] if the record is not a valid item array.
pub fn decode_items(record: &str) -> Result<Vec<LineItem>, PersistenceError> {
    Ok(serde_json::from_str(record)?)
}
