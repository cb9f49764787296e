//! Best-effort persistent key-value store.
//!
//! Reads never fail: a missing, unreadable or malformed value yields the
//! caller's default. Writes report failure through `StoreError`, which
//! callers are free to ignore.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Why a write or removal did not reach the backing medium.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage medium does not exist (disabled, private mode, no window).
    #[error("storage is unavailable")]
    Unavailable,
    /// The medium refused the write (quota, security policy).
    #[error("write to {key:?} rejected: {reason}")]
    WriteRejected { key: String, reason: String },
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Raw string storage scoped to the reader's origin.
/// Single-threaded: implementations use interior mutability where needed.
pub trait StorageBackend {
    /// Read a raw value. `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory backend. Used headless and as the test fake.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    reject_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write and removal fail, as a full quota would.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Put a raw value in place, bypassing serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn check_writable(&self, key: &str) -> Result<(), StoreError> {
        if self.reject_writes.get() {
            Err(StoreError::WriteRejected {
                key: key.to_string(),
                reason: "quota exceeded".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// JSON values over a `StorageBackend`.
pub struct PersistentStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PersistentStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load and decode `key`, falling back to `default` on any problem.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(err) => {
                log::warn!("store: reading {key:?} failed, using default: {err}");
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("store: {key:?} holds malformed data, using default: {err}");
                default
            }
        }
    }

    /// Encode and write `value` under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.backend.set_item(key, &json)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove_item(key)
    }
}
