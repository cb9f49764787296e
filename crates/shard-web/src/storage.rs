use shard_engine::{StorageBackend, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage` as a store backend.
/// Missing storage (disabled, sandboxed) reads as empty and rejects writes.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; progress will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(key: &str, err: JsValue) -> StoreError {
    StoreError::WriteRejected {
        key: key.to_string(),
        reason: format!("{err:?}"),
    }
}

impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match &self.storage {
            Some(storage) => Ok(storage.get_item(key).ok().flatten()),
            None => Ok(None),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(|e| rejected(key, e))
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?.remove_item(key).map_err(|e| rejected(key, e))
    }
}
