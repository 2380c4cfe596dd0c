//! Key-value persistence
//!
//! Features:
//! - `Storage` trait shaped like the Web Storage API
//! - `MemoryStorage` for native builds and tests
//! - `LocalStorage` on the web
//!
//! Readers treat any failure as "nothing stored"; only writers report errors.

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Read a key, logging and swallowing backend errors
pub fn read_item(storage: &dyn Storage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}

/// The platform's default store: LocalStorage in the browser, memory elsewhere
pub fn default_storage() -> Box<dyn Storage> {
    #[cfg(target_arch = "wasm32")]
    {
        match LocalStorage::open() {
            Ok(storage) => return Box::new(storage),
            Err(e) => log::warn!("{}, falling back to memory storage", e),
        }
    }
    Box::new(MemoryStorage::new())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Store whose every call fails
    pub(crate) struct Broken;

    impl Storage for Broken {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        assert!(storage.get_item("k").unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_read_item_swallows_errors() {
        assert_eq!(read_item(&Broken, "anything"), None);
    }
}
