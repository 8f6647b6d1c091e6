//! In-memory expiring store for verification records.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::entities::VerificationRecord;

use super::r#trait::CodeStore;

/// Process-wide store mapping phone numbers to their verification record
///
/// A single mutex serializes all reads and writes. No method awaits or
/// performs I/O while the lock is held, so each call holds it for one map
/// operation (or one pass over the map for `sweep_expired`).
///
/// Construct it once at startup and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct ExpiringStore {
    records: Mutex<HashMap<String, VerificationRecord>>,
}

impl ExpiringStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // Every operation leaves the map consistent, so a panic elsewhere while
    // the guard was held cannot leave a half-applied write behind.
    fn records(&self) -> MutexGuard<'_, HashMap<String, VerificationRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CodeStore for ExpiringStore {
    fn put(&self, phone: &str, record: VerificationRecord) {
        self.records().insert(phone.to_string(), record);
    }

    fn get(&self, phone: &str) -> Option<VerificationRecord> {
        self.records().get(phone).cloned()
    }

    fn delete(&self, phone: &str) -> Option<VerificationRecord> {
        self.records().remove(phone)
    }

    fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.records();
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        let removed = before - records.len();

        debug!(
            removed = removed,
            remaining = records.len(),
            "Swept expired verification records"
        );

        removed
    }

    fn len(&self) -> usize {
        self.records().len()
    }
}
