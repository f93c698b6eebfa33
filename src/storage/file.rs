//! File-backed storage

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    items::LineItem,
    storage::{CartStorage, DEFAULT_CART_KEY, PersistenceError, decode_items, encode_items},
};

/// Stores the record as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Store under `dir` using the default `cart` key.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, DEFAULT_CART_KEY)
    }

    /// Store under `dir` using a custom record key.
    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<LineItem>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(record) => decode_items(&record),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, items: &[LineItem]) -> Result<(), PersistenceError> {
        let record = encode_items(items)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, record)?;

        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
