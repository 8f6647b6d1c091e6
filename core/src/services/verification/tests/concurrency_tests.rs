//! Concurrent send and verify against one shared store

use std::sync::Arc;

use otp_shared::config::VerificationConfig;

use crate::repositories::{CodeStore, ExpiringStore};
use crate::services::verification::{SendOptions, VerificationService};

use super::mocks::MockDeliveryChannel;

const CALLERS: usize = 64;

fn phone(i: usize) -> String {
    format!("+1415555{:04}", i)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sends_do_not_cross_talk() {
    let channel = Arc::new(MockDeliveryChannel::new(false));
    let store = Arc::new(ExpiringStore::new());
    let service = Arc::new(VerificationService::new(
        channel.clone(),
        store.clone(),
        Arc::new(VerificationConfig::default().with_message_template("{{code}}")),
    ));

    let sends: Vec<_> = (0..CALLERS)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.send_code(&phone(i), SendOptions::default()).await })
        })
        .collect();
    for handle in sends {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(store.len(), CALLERS);

    let verifies: Vec<_> = (0..CALLERS)
        .map(|i| {
            let service = Arc::clone(&service);
            let code = channel.get_sent_body(&phone(i)).unwrap();
            tokio::spawn(async move { service.verify_code(&phone(i), &code) })
        })
        .collect();
    for handle in verifies {
        assert!(handle.await.unwrap());
    }

    // Each number only accepts its own code
    for i in 0..CALLERS {
        let own = channel.get_sent_body(&phone(i)).unwrap();
        let other = channel.get_sent_body(&phone((i + 1) % CALLERS)).unwrap();
        if own != other {
            assert!(!service.verify_code(&phone(i), &other));
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sweeps_and_sends() {
    let channel = Arc::new(MockDeliveryChannel::new(false));
    let store = Arc::new(ExpiringStore::new());
    let service = Arc::new(VerificationService::new(
        channel,
        store.clone(),
        Arc::new(VerificationConfig::default()),
    ));

    let sweeper_store = store.clone();
    let sweeper = tokio::spawn(async move {
        for _ in 0..100 {
            sweeper_store.sweep_expired(chrono::Utc::now());
            tokio::task::yield_now().await;
        }
    });

    let sends: Vec<_> = (0..CALLERS)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.send_code(&phone(i), SendOptions::default()).await })
        })
        .collect();
    for handle in sends {
        handle.await.unwrap().unwrap();
    }
    sweeper.await.unwrap();

    // Nothing issued with a 300s lifetime can have been swept
    assert_eq!(store.len(), CALLERS);
}
