//! Store trait defining the interface for verification code persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::VerificationRecord;

/// Storage for the verification record of each phone number
///
/// Every method executes atomically with respect to every other method on
/// the same store. Implementations are time-agnostic: `get` returns a record
/// whether or not it has expired, and only `sweep_expired` looks at the clock
/// value it is handed.
///
/// Phone numbers are used as keys exactly as given.
pub trait CodeStore: Send + Sync {
    /// Insert a record, replacing any existing record for the phone number
    fn put(&self, phone: &str, record: VerificationRecord);

    /// Get the current record for a phone number, expired or not
    ///
    /// # Returns
    /// * `Some(VerificationRecord)` - A record is stored
    /// * `None` - Nothing is stored for the phone number
    fn get(&self, phone: &str) -> Option<VerificationRecord>;

    /// Remove the record for a phone number
    ///
    /// # Returns
    /// * `Some(VerificationRecord)` - The record that was removed
    /// * `None` - Nothing was stored for the phone number
    fn delete(&self, phone: &str) -> Option<VerificationRecord>;

    /// Remove every record with `expires_at <= now`
    ///
    /// # Returns
    /// The number of records removed
    fn sweep_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of records currently stored, including expired ones
    fn len(&self) -> usize;

    /// Whether the store holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: CodeStore + ?Sized> CodeStore for Arc<T> {
    fn put(&self, phone: &str, record: VerificationRecord) {
        (**self).put(phone, record)
    }

    fn get(&self, phone: &str) -> Option<VerificationRecord> {
        (**self).get(phone)
    }

    fn delete(&self, phone: &str) -> Option<VerificationRecord> {
        (**self).delete(phone)
    }

    fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        (**self).sweep_expired(now)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
