//! Mock SMS Service Implementation
//!
//! A mock implementation of the SMS service for development and testing.
//! Messages are logged and remembered instead of being sent.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use otp_shared::utils::phone::{is_valid_e164, mask_phone_number};
use tracing::{info, warn};
use uuid::Uuid;

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Validates phone numbers
/// - Generates mock message IDs
/// - Tracks message count and the last message per phone for tests
///
/// Clones share counters and recorded messages.
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
    /// Last message body sent to each phone number
    last_messages: Arc<Mutex<HashMap<String, String>>>,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
            last_messages: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Body of the last message sent to `phone_number`
    pub fn last_message(&self, phone_number: &str) -> Option<String> {
        self.last_messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(phone_number)
            .cloned()
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        // Validate phone number format
        if !is_valid_e164(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                mask_phone_number(phone_number)
            )));
        }

        // Simulate failure if configured
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                "Mock SMS service simulating failure for phone: {}",
                mask_phone_number(phone_number)
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        // Generate mock message ID
        let message_id = format!("mock_{}", Uuid::new_v4());

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.last_messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(phone_number.to_string(), message.to_string());

        let masked_phone = mask_phone_number(phone_number);

        if self.console_output {
            // Full message only in development output
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {} (masked: {})", phone_number, masked_phone);
            println!("Message ID: {}", message_id);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
