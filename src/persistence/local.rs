use web_sys::Storage;

use super::{KeyValueStore, StorageError};

/// Browser LocalStorage
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// The window's LocalStorage, if the browser exposes one
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("LocalStorage is not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("read `{key}` failed: {e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("write `{key}` failed: {e:?}")))
    }
}
