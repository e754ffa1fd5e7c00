//! Spin Key-Value backend.

use crate::{CacheError, KeyValueStore};

/// A store backed by a Spin Key-Value store.
///
/// Holds only the store label and opens a handle per operation, so the
/// value stays `Send + Sync` inside the component.
#[derive(Debug, Clone)]
pub struct SpinStore {
    label: Option<String>,
}

impl SpinStore {
    /// Use the component's default store.
    pub fn open_default() -> Result<Self, CacheError> {
        spin_sdk::key_value::Store::open_default()
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { label: None })
    }

    /// Use a named store.
    pub fn open(name: &str) -> Result<Self, CacheError> {
        spin_sdk::key_value::Store::open(name)
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self {
            label: Some(name.to_string()),
        })
    }

    fn handle(&self) -> Result<spin_sdk::key_value::Store, CacheError> {
        let store = match &self.label {
            Some(name) => spin_sdk::key_value::Store::open(name),
            None => spin_sdk::key_value::Store::open_default(),
        };
        store.map_err(|e| CacheError::OpenError(e.to_string()))
    }
}

impl KeyValueStore for SpinStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.handle()?
            .get(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.handle()?
            .set(key, value)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.handle()?
            .delete(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.handle()?
            .exists(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.handle()?
            .get_keys()
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}
