//! Shared fixtures for unit tests.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use shared::{ActivityStatus, Gender, Member, Transaction, TransactionType};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::StoreContext;
use crate::storage::{KeyValueStore, MemoryStore, Persistence};
use crate::Backend;

/// A store whose every operation fails
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Err(anyhow!("storage unavailable reading {}", key))
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage unavailable writing {}", key))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Err(anyhow!("storage unavailable removing {}", key))
    }
}

/// Config suitable for tests: no auth latency
pub fn test_config() -> AppConfig {
    AppConfig {
        auth_latency_ms: 0,
        ..AppConfig::default()
    }
}

/// A fresh store context over an empty memory store, plus a handle to the store
pub fn test_context() -> (StoreContext, MemoryStore) {
    let store = MemoryStore::new();
    let context = StoreContext::new(Persistence::new(Arc::new(store.clone())));
    (context, store)
}

/// A backend seeded with the sample data
pub fn test_backend() -> Backend {
    Backend::in_memory(test_config())
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn member_born(id: &str, birth_date: NaiveDate) -> Member {
    Member {
        id: id.to_string(),
        name: format!("Member {}", id),
        email: format!("member{}@example.com", id),
        phone: String::new(),
        birth_date,
        gender: Gender::Female,
        join_date: date(2020, 1, 1),
        status: ActivityStatus::Active,
        address: String::new(),
        role: "Member".to_string(),
    }
}

pub fn transaction(id: &str, transaction_type: TransactionType, amount: f64) -> Transaction {
    Transaction {
        id: id.to_string(),
        transaction_type,
        amount,
        description: "Test".to_string(),
        date: date(2024, 1, 1),
        category: "General".to_string(),
    }
}
