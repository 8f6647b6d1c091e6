//! Unit tests for verification record entity

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::VerificationRecord;

fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_issue_sets_expiry() {
    let record = VerificationRecord::issue("012345", issued_at(), Duration::seconds(300)).unwrap();

    assert_eq!(record.code, "012345");
    assert_eq!(record.expires_at, issued_at() + Duration::seconds(300));
}

#[test]
fn test_issue_out_of_range_expiry() {
    let ttl = Duration::try_seconds(10_000_000_000_000).unwrap();
    assert!(VerificationRecord::issue("012345", issued_at(), ttl).is_none());
    let longest = Duration::try_seconds(i64::MAX / 1_000).unwrap();
    assert!(VerificationRecord::issue("012345", issued_at(), longest).is_none());
}

#[test]
fn test_expiry_boundary() {
    let record = VerificationRecord::issue("123456", issued_at(), Duration::seconds(300)).unwrap();

    assert!(!record.is_expired_at(issued_at()));
    assert!(!record.is_expired_at(issued_at() + Duration::seconds(299)));
    // Expired exactly at expires_at
    assert!(record.is_expired_at(issued_at() + Duration::seconds(300)));
    assert!(record.is_expired_at(issued_at() + Duration::seconds(301)));
}

#[test]
fn test_matches_is_exact() {
    let record = VerificationRecord::issue("123456", issued_at(), Duration::seconds(60)).unwrap();

    assert!(record.matches("123456"));
    assert!(!record.matches("123457"));
    assert!(!record.matches(" 123456"));
    assert!(!record.matches("123456 "));
    assert!(!record.matches("12345"));
    assert!(!record.matches(""));
}

#[test]
fn test_accepts_requires_match_and_liveness() {
    let record = VerificationRecord::issue("654321", issued_at(), Duration::seconds(60)).unwrap();
    let during = issued_at() + Duration::seconds(30);
    let after = issued_at() + Duration::seconds(61);

    assert!(record.accepts("654321", during));
    assert!(!record.accepts("000000", during));
    assert!(!record.accepts("654321", after));
    assert!(!record.accepts("000000", after));
}

#[test]
fn test_time_until_expiration() {
    let record = VerificationRecord::issue("111111", issued_at(), Duration::seconds(300)).unwrap();

    assert_eq!(
        record.time_until_expiration(issued_at() + Duration::seconds(100)),
        Duration::seconds(200)
    );
    assert_eq!(
        record.time_until_expiration(issued_at() + Duration::seconds(400)),
        Duration::zero()
    );
}

#[test]
fn test_serialization() {
    let record = VerificationRecord::issue("987654", issued_at(), Duration::seconds(300)).unwrap();

    let json = serde_json::to_string(&record).unwrap();
    let deserialized: VerificationRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(record, deserialized);
}
