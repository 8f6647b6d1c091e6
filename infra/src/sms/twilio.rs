//! Twilio SMS Service Implementation
//!
//! This module provides SMS sending capabilities using the Twilio API.
//!
//! ## Features
//!
//! - E.164 format validation
//! - Automatic retry with exponential backoff on transient errors
//! - Per-message sender override through the `from` provider option
//! - Phone number masking in logs

use std::time::Duration;

use async_trait::async_trait;
use otp_core::services::verification::ProviderOptions;
use otp_shared::utils::phone::{is_valid_e164, mask_phone_number};
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use crate::{sms::sms_service::SmsService, InfrastructureError};

/// Provider option that overrides the configured sender number
pub const FROM_OPTION: &str = "from";

/// Maximum message body accepted by Twilio
pub const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        let config = Self {
            account_sid,
            auth_token,
            from_number,
            max_retries: std::env::var("TWILIO_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("TWILIO_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that credentials are present and the sender is E.164
    pub fn validate(&self) -> Result<(), InfrastructureError> {
        if self.account_sid.is_empty() || self.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio credentials are required".to_string(),
            ));
        }
        if !is_valid_e164(&self.from_number) {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(InfrastructureError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        config.validate()?;
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(TwilioConfig::from_env()?)
    }

    /// The sender number used when no `from` option is given
    pub fn from_number(&self) -> &str {
        &self.config.from_number
    }

    fn validate_phone_number(phone: &str) -> Result<(), InfrastructureError> {
        if is_valid_e164(phone) {
            Ok(())
        } else {
            Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +1234567890)".to_string(),
            ))
        }
    }

    /// Send SMS with retry logic
    async fn send_with_retry(
        &self,
        from: &str,
        to: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            let msg = OutboundMessage::new(from, to, message);

            match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        response.sid
                    );
                    return Ok(response.sid);
                }
                Err(e) => {
                    error!(
                        "Failed to send SMS (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }

                    let error_msg = e.to_string();
                    if !is_retryable(&error_msg) {
                        return Err(InfrastructureError::Sms(format!(
                            "Invalid request: {}",
                            e
                        )));
                    }

                    warn!("Transient Twilio error, retrying after {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay);
                }
            }
        }
    }
}

/// Exponential backoff step
fn next_delay(delay: Duration) -> Duration {
    delay.saturating_mul(2)
}

/// Rate limits, server errors and unclassified failures are retried; client errors are not
fn is_retryable(error_msg: &str) -> bool {
    let lower = error_msg.to_lowercase();
    if lower.contains("400") || lower.contains("invalid") {
        return false;
    }
    true
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        self.send_sms_with_options(phone_number, message, &ProviderOptions::new())
            .await
    }

    async fn send_sms_with_options(
        &self,
        phone_number: &str,
        message: &str,
        options: &ProviderOptions,
    ) -> Result<String, InfrastructureError> {
        Self::validate_phone_number(phone_number)?;

        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        let from = options
            .get(FROM_OPTION)
            .map(String::as_str)
            .unwrap_or(&self.config.from_number);

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(phone_number),
            message.len()
        );

        self.send_with_retry(from, phone_number, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(is_retryable("HTTP 429 Too Many Requests"));
        assert!(is_retryable("HTTP 503 Service Unavailable"));
        assert!(is_retryable("connection reset"));
        assert!(!is_retryable("HTTP 400 Bad Request"));
        assert!(!is_retryable("Invalid 'To' Phone Number"));
    }

    #[test]
    fn test_backoff_doubles_and_saturates() {
        assert_eq!(next_delay(Duration::from_millis(1000)), Duration::from_millis(2000));
        assert_eq!(next_delay(Duration::MAX), Duration::MAX);

        let mut delay = Duration::from_millis(u64::MAX);
        for _ in 0..16 {
            delay = next_delay(delay);
        }
        assert_eq!(delay, Duration::MAX);
    }

    #[test]
    fn test_phone_validation() {
        assert!(TwilioSmsService::validate_phone_number("+14155552671").is_ok());
        assert!(TwilioSmsService::validate_phone_number("4155552671").is_err());
        assert!(TwilioSmsService::validate_phone_number("+1415abc2671").is_err());
    }
}
