//! # Collection
//!
//! An insertion-ordered list of records persisted as one JSON array under a
//! fixed key. The in-memory list is the source of truth; every mutation
//! rewrites the whole array through the persistence shim and bumps the
//! shared data version.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::persistence::Persistence;
use crate::domain::ids::DataVersion;

/// A record type that lives in a [`Collection`]
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable entity name used in logs and errors
    const KIND: &'static str;

    fn id(&self) -> &str;
}

#[derive(Clone)]
pub struct Collection<T: Entity> {
    key: &'static str,
    records: Arc<RwLock<Vec<T>>>,
    persistence: Persistence,
    version: DataVersion,
}

impl<T: Entity> Collection<T> {
    /// Load the collection stored under `key`, falling back to `seed` when
    /// nothing usable is stored
    pub fn load<F>(key: &'static str, persistence: Persistence, version: DataVersion, seed: F) -> Self
    where
        F: FnOnce() -> Vec<T>,
    {
        let records: Vec<T> = persistence.load_or_else(key, seed);
        debug!("Loaded {} {} records from {}", records.len(), T::KIND, key);

        Self {
            key,
            records: Arc::new(RwLock::new(records)),
            persistence,
            version,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Snapshot of every record in insertion order
    pub fn all(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.read().iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Run `f` against the records without cloning them
    pub fn with_records<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.read())
    }

    /// Append a record
    pub fn push(&self, record: T) {
        let mut records = self.write();
        records.push(record);
        self.commit(&records);
    }

    /// Apply `f` to the record with `id`. Returns the updated record, or
    /// `None` without touching storage when no record matches.
    pub fn update<F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.write();
        let record = records.iter_mut().find(|r| r.id() == id)?;
        f(record);
        let updated = record.clone();
        self.commit(&records);
        Some(updated)
    }

    /// Drop the record with `id`. Returns whether a record was removed;
    /// storage is untouched when nothing matched.
    pub fn remove(&self, id: &str) -> bool {
        let mut records = self.write();
        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = records.len() != before;
        if removed {
            self.commit(&records);
        }
        removed
    }

    /// Remove every record matching `occupies` and append `record`.
    /// Returns how many records were replaced.
    pub fn upsert<P>(&self, occupies: P, record: T) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let mut records = self.write();
        let before = records.len();
        records.retain(|r| !occupies(r));
        let replaced = before - records.len();
        records.push(record);
        self.commit(&records);
        replaced
    }

    fn commit(&self, records: &[T]) {
        self.persistence.save(self.key(), records);
        let version = self.version.bump();
        debug!(
            "Saved {} {} records to {} (version {})",
            records.len(),
            T::KIND,
            self.key(),
            version
        );
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}
