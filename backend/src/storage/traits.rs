//! # Storage Traits
//!
//! Abstraction over the raw key-value storage the persistence shim writes to,
//! so the domain layer never knows whether records live on disk or in memory.

use anyhow::Result;

/// Trait defining the interface for raw key-value storage
///
/// Values are opaque strings; JSON encoding happens one layer up in
/// [`Persistence`](super::Persistence).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
