//! Delivery channel backed by an SMS service

use std::sync::Arc;

use async_trait::async_trait;
use otp_core::services::verification::{
    DeliveryChannel, DeliveryFailure, DeliveryResponse, ProviderOptions,
};
use serde_json::json;

use crate::sms::SmsService;
use crate::InfrastructureError;

/// Error code attached to failures reported by an SMS provider
pub const SMS_FAILURE_CODE: &str = "sms_error";

/// Adapts any [`SmsService`] to the core [`DeliveryChannel`]
#[derive(Clone)]
pub struct SmsDeliveryChannel {
    sms: Arc<dyn SmsService>,
}

impl SmsDeliveryChannel {
    /// Wrap an SMS service
    pub fn new(sms: Arc<dyn SmsService>) -> Self {
        Self { sms }
    }

    /// The wrapped SMS service
    pub fn sms_service(&self) -> &Arc<dyn SmsService> {
        &self.sms
    }
}

#[async_trait]
impl DeliveryChannel for SmsDeliveryChannel {
    async fn send(
        &self,
        to: &str,
        body: &str,
        options: &ProviderOptions,
    ) -> Result<DeliveryResponse, DeliveryFailure> {
        let provider = self.sms.provider_name().to_string();

        match self.sms.send_sms_with_options(to, body, options).await {
            Ok(message_id) => {
                let payload = json!({
                    "message_id": message_id,
                    "provider": provider,
                    "to": to,
                });
                Ok(DeliveryResponse::new(message_id, provider).with_payload(payload))
            }
            Err(InfrastructureError::Sms(message)) => {
                Err(DeliveryFailure::new(message).with_code(SMS_FAILURE_CODE))
            }
            Err(other) => Err(DeliveryFailure::new(other.to_string())),
        }
    }
}
