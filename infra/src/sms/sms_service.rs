//! SMS Service Interface
//!
//! Defines the trait for SMS service implementations that deliver
//! verification messages.

use async_trait::async_trait;
use otp_core::services::verification::ProviderOptions;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// let service = MockSmsService::new();
    /// let message_id = service.send_sms("+1234567890", "Your code is 123456").await?;
    /// ```
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send an SMS message with provider-specific options
    ///
    /// Providers that understand none of the options use the default, which
    /// ignores them and calls [`SmsService::send_sms`].
    async fn send_sms_with_options(
        &self,
        phone_number: &str,
        message: &str,
        _options: &ProviderOptions,
    ) -> Result<String, InfrastructureError> {
        self.send_sms(phone_number, message).await
    }

    /// Get the service provider name
    ///
    /// Returns the name of the SMS service provider (e.g., "Twilio", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
