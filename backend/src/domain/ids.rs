//! Record id generation and the data version counter.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates ids from the creation timestamp (epoch milliseconds).
///
/// Two creations within the same millisecond get consecutive values, so ids
/// never collide within a process.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Arc<AtomicU64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        self.next_at(Utc::now().timestamp_millis().max(0) as u64)
            .to_string()
    }

    /// Next id given the current time in milliseconds
    fn next_at(&self, now_millis: u64) -> u64 {
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_millis.max(last + 1))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        now_millis.max(previous + 1)
    }
}

/// Monotonic counter bumped on every successful mutation of any collection
#[derive(Debug, Clone, Default)]
pub struct DataVersion {
    value: Arc<AtomicU64>,
}

impl DataVersion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Increment and return the new version
    pub fn bump(&self) -> u64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }
}
