//! Verification record entity stored per phone number.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// A code issued to a phone number together with its expiry
///
/// Records carry no notion of "now"; every time-dependent check takes the
/// current instant as an argument so callers decide which clock applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// The numeric verification code
    pub code: String,

    /// Instant from which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a record from an explicit code and expiry
    pub fn new(code: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            expires_at,
        }
    }

    /// Creates a record that expires `ttl` after `issued_at`
    ///
    /// Returns `None` if the expiry falls outside the representable range.
    pub fn issue(code: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        issued_at
            .checked_add_signed(ttl)
            .map(|expires_at| Self::new(code, expires_at))
    }

    /// Checks if the record has expired at `now`
    ///
    /// A record is valid only while `now < expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Compares `candidate` against the stored code in constant time
    ///
    /// The comparison is exact: no trimming or normalization is applied.
    pub fn matches(&self, candidate: &str) -> bool {
        self.code.len() == candidate.len()
            && constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Checks that `candidate` matches and the record has not expired at `now`
    pub fn accepts(&self, candidate: &str, now: DateTime<Utc>) -> bool {
        // Evaluate both so a wrong code and an expired one cost the same
        let matches = self.matches(candidate);
        let live = !self.is_expired_at(now);
        matches && live
    }

    /// Time left until expiry at `now`, or zero once expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
