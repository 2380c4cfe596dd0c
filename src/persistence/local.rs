//! Browser LocalStorage backend

use super::{Storage, StorageError};

pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

fn access_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Access(format!("{:?}", err))
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(access_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(access_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(access_error)
    }
}
