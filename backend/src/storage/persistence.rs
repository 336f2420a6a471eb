//! # Persistence Shim
//!
//! JSON get/set over a [`KeyValueStore`]. Failures never reach the caller:
//! a failed save is logged and leaves the previous stored value untouched,
//! a failed load is logged and yields the caller's default.

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::traits::KeyValueStore;

#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Serialize `value` and write it under `key`
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                error!("Error serializing value for {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, &json) {
            error!("Error saving {} to storage: {:#}", key, e);
        }
    }

    /// Read and deserialize `key`, falling back to `default`
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.load_or_else(key, || default)
    }

    /// Like [`load`](Self::load) but only builds the default when it is needed
    pub fn load_or_else<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Nothing stored under {}, using default", key);
                return default();
            }
            Err(e) => {
                error!("Error loading {} from storage: {:#}", key, e);
                return default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored value for {} could not be parsed ({}), using default", key, e);
                default()
            }
        }
    }

    /// Delete `key` from storage
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            error!("Error removing {} from storage: {:#}", key, e);
        }
    }
}
