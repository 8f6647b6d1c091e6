//! SMS Service Module
//!
//! This module provides SMS service implementations for sending verification
//! codes. It includes a Twilio integration and a mock implementation for
//! development.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output for development
//! - **Twilio Support**: Production SMS via Twilio API
//! - **Security**: Phone number masking in logs

use std::sync::Arc;

pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use mock_sms::MockSmsService;
pub use sms_service::SmsService;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Returns the implementation named by `config.provider`. An unknown
/// provider, or a provider that fails to initialize, falls back to the mock
/// service.
pub fn create_sms_service(config: &crate::config::SmsConfig) -> Arc<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new()),
        #[cfg(feature = "twilio-sms")]
        "twilio" => {
            let twilio_config = TwilioConfig {
                account_sid: config.api_key.clone(),
                auth_token: config.api_secret.clone(),
                from_number: config.from_number.clone(),
                max_retries: 3,
                retry_delay_ms: 1000,
            };

            match TwilioSmsService::new(twilio_config) {
                Ok(service) => Arc::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize Twilio SMS service: {}", e);
                    tracing::warn!("Falling back to mock SMS service");
                    Arc::new(MockSmsService::new())
                }
            }
        }
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Arc::new(MockSmsService::new())
        }
    }
}
