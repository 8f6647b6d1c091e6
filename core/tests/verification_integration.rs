//! Integration tests for the verification service with the background sweeper

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use otp_core::repositories::{CodeStore, ExpiringStore};
use otp_core::services::clock::ManualClock;
use otp_core::services::sweeper::CodeSweeper;
use otp_core::services::verification::{
    DeliveryChannel, DeliveryFailure, DeliveryResponse, ProviderOptions, SendOptions,
    VerificationService,
};
use otp_core::DomainError;
use otp_shared::config::{SweeperConfig, VerificationConfig};

// Channel that echoes the body back as the message id so tests can read the code
struct EchoChannel {
    sent: AtomicUsize,
    reject_prefix: Option<&'static str>,
}

impl EchoChannel {
    fn new() -> Self {
        Self {
            sent: AtomicUsize::new(0),
            reject_prefix: None,
        }
    }

    fn rejecting(prefix: &'static str) -> Self {
        Self {
            sent: AtomicUsize::new(0),
            reject_prefix: Some(prefix),
        }
    }
}

#[async_trait]
impl DeliveryChannel for EchoChannel {
    async fn send(
        &self,
        to: &str,
        body: &str,
        _options: &ProviderOptions,
    ) -> Result<DeliveryResponse, DeliveryFailure> {
        if let Some(prefix) = self.reject_prefix {
            if to.starts_with(prefix) {
                return Err(DeliveryFailure::new("Unreachable destination").with_code("21612"));
            }
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(DeliveryResponse::new(body, "echo"))
    }
}

fn config() -> Arc<VerificationConfig> {
    Arc::new(
        VerificationConfig::default()
            .with_ttl_seconds(120)
            .with_message_template("{{code}}"),
    )
}

#[tokio::test(start_paused = true)]
async fn test_full_lifecycle_with_sweeper() {
    let start = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let store = Arc::new(ExpiringStore::new());
    let channel = Arc::new(EchoChannel::new());

    let service = VerificationService::new(channel.clone(), store.clone(), config())
        .with_clock(clock.clone());
    let sweeper = Arc::new(
        CodeSweeper::new(store.clone(), SweeperConfig::every(30)).with_clock(clock.clone()),
    );
    let handle = sweeper.start_background_task().expect("sweeper is enabled");

    let code = service
        .send_code("+14155552671", SendOptions::default())
        .await
        .unwrap()
        .message_id;
    assert!(service.verify_code("+14155552671", &code));

    // Still valid one second before expiry, even after a sweep
    clock.advance(Duration::seconds(119));
    tokio::time::sleep(StdDuration::from_secs(30)).await;
    assert!(service.verify_code("+14155552671", &code));
    assert_eq!(store.len(), 1);

    // Expired: verification fails and the next sweep reclaims the record
    clock.advance(Duration::seconds(1));
    assert!(!service.verify_code("+14155552671", &code));
    tokio::time::sleep(StdDuration::from_secs(30)).await;
    assert!(store.is_empty());

    let err = service.remove_code("+14155552671").unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    handle.shutdown().await;
}

#[tokio::test]
async fn test_failed_delivery_does_not_touch_store() {
    let store = Arc::new(ExpiringStore::new());
    let channel = Arc::new(EchoChannel::rejecting("+44"));
    let service = VerificationService::new(channel.clone(), store.clone(), config());

    let ok = service.send_code("+14155552671", SendOptions::default()).await;
    let failed = service.send_code("+442071838750", SendOptions::default()).await;

    assert!(ok.is_ok());
    match failed {
        Err(DomainError::Delivery { message, code }) => {
            assert_eq!(message, "Unreachable destination");
            assert_eq!(code.as_deref(), Some("21612"));
        }
        other => panic!("Expected delivery error, got {:?}", other),
    }
    assert_eq!(store.len(), 1);
    assert!(store.get("+442071838750").is_none());
    assert_eq!(channel.sent.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_service_and_sweeper_share_one_store() {
    let start = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let store = Arc::new(ExpiringStore::new());
    let service = VerificationService::new(Arc::new(EchoChannel::new()), store.clone(), config())
        .with_clock(clock.clone());
    let sweeper = CodeSweeper::new(store.clone(), SweeperConfig::default()).with_clock(clock.clone());

    service
        .send_code("+10000000001", SendOptions::default().with_ttl_seconds(10))
        .await
        .unwrap();
    service
        .send_code("+10000000002", SendOptions::default())
        .await
        .unwrap();

    clock.advance(Duration::seconds(10));
    let result = sweeper.run_sweep();

    assert_eq!(result.removed, 1);
    assert_eq!(result.remaining, Some(1));
    assert!(service.code_ttl("+10000000002").is_some());
    assert!(service.store().get("+10000000001").is_none());
}
