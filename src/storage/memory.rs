//! In-memory storage

use crate::{
    items::LineItem,
    storage::{CartStorage, PersistenceError, decode_items, encode_items},
};

/// Keeps the encoded record in memory.
///
/// Items still go through the JSON encoding, so a load sees exactly what a file or browser store
/// would have returned.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    record: Option<String>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a raw record.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }

    /// The raw persisted record, if any.
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<LineItem>, PersistenceError> {
        self.record
            .as_deref()
            .map_or_else(|| Ok(Vec::new()), decode_items)
    }

    fn save(&mut self, items: &[LineItem]) -> Result<(), PersistenceError> {
        self.record = Some(encode_items(items)?);

        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.record = None;

        Ok(())
    }
}
