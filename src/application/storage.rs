// src/application/storage.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },
    #[error("Failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}

/// Synchronous string key-value store, the shape of a browser's local storage.
pub trait StorageAdapter {
    /// Returns `Ok(None)` when the key has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: StorageAdapter + ?Sized> StorageAdapter for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}
