//! Trait for message delivery integration

use async_trait::async_trait;

use super::types::{DeliveryFailure, DeliveryResponse, ProviderOptions};

/// Outbound channel that carries the rendered message to the phone
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Send `body` to `to`
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient phone number, exactly as the caller supplied it
    /// * `body` - Rendered message containing the verification code
    /// * `options` - Provider-specific passthrough options
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryResponse)` - The provider accepted the message
    /// * `Err(DeliveryFailure)` - The provider rejected it or could not be reached
    async fn send(
        &self,
        to: &str,
        body: &str,
        options: &ProviderOptions,
    ) -> Result<DeliveryResponse, DeliveryFailure>;
}
