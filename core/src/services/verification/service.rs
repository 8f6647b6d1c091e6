//! Main verification service implementation

use std::sync::Arc;

use chrono::Duration;
use otp_shared::config::verification::{CODE_PLACEHOLDER, MAX_CODE_LENGTH};
use otp_shared::utils::phone::mask_phone_number;

use crate::domain::entities::VerificationRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::CodeStore;
use crate::services::clock::{Clock, SystemClock};
use crate::services::code_generator::{CodeGenerator, RandomCodeGenerator};

use super::config::ConfigSource;
use super::traits::DeliveryChannel;
use super::types::{DeliveryResponse, SendOptions};

/// Verification service for issuing and checking phone verification codes
pub struct VerificationService<D: DeliveryChannel, S: CodeStore> {
    /// Channel used to deliver the rendered message
    channel: Arc<D>,
    /// Shared store of issued codes
    store: Arc<S>,
    /// Settings read on every send
    config: Arc<dyn ConfigSource>,
    /// Code generator
    generator: Arc<dyn CodeGenerator>,
    /// Time source for expiry decisions
    clock: Arc<dyn Clock>,
}

impl<D: DeliveryChannel, S: CodeStore> VerificationService<D, S> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `channel` - Delivery channel implementation
    /// * `store` - Shared code store
    /// * `config` - Source of verification settings
    pub fn new(channel: Arc<D>, store: Arc<S>, config: Arc<dyn ConfigSource>) -> Self {
        Self {
            channel,
            store,
            config,
            generator: Arc::new(RandomCodeGenerator),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the code generator
    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The shared store this service writes to
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Send a verification code to a phone number
    ///
    /// This method:
    /// 1. Resolves code length, lifetime and message from `options` and configuration
    /// 2. Generates a new code and computes its expiry
    /// 3. Delivers the rendered message through the channel
    /// 4. Stores the code only once delivery succeeded
    ///
    /// A failed delivery leaves any code previously issued to the phone
    /// number untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryResponse)` - The provider response for the sent message
    /// * `Err(DomainError::InvalidArgument)` - Code length or lifetime out of range
    /// * `Err(DomainError::Delivery)` - The channel failed to deliver
    pub async fn send_code(&self, phone: &str, options: SendOptions) -> DomainResult<DeliveryResponse> {
        let config = self.config.verification_config()?;

        let code_length = options.code_length.unwrap_or(config.code_length);
        let ttl_seconds = options.ttl_seconds.unwrap_or(config.code_ttl_seconds);
        let template = options.message.unwrap_or(config.message_template);

        if code_length == 0 || code_length > MAX_CODE_LENGTH {
            return Err(DomainError::invalid_argument(
                "code_length",
                format!(
                    "code length must be between 1 and {}, got {}",
                    MAX_CODE_LENGTH, code_length
                ),
            ));
        }
        if ttl_seconds <= 0 {
            return Err(DomainError::invalid_argument(
                "ttl_seconds",
                format!("code lifetime must be positive, got {}", ttl_seconds),
            ));
        }
        let ttl = Duration::try_seconds(ttl_seconds).ok_or_else(ttl_out_of_range)?;

        let code = self.generator.generate(code_length)?;
        let record = VerificationRecord::issue(code.as_str(), self.clock.now(), ttl)
            .ok_or_else(ttl_out_of_range)?;
        let body = template.replace(CODE_PLACEHOLDER, &code);

        let masked = mask_phone_number(phone);
        let response = self
            .channel
            .send(phone, &body, &options.provider_options)
            .await
            .map_err(|failure| {
                tracing::error!(
                    phone = %masked,
                    error = %failure,
                    error_code = ?failure.code,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::from(failure)
            })?;

        let expires_at = record.expires_at;
        self.store.put(phone, record);

        tracing::info!(
            phone = %masked,
            message_id = %response.message_id,
            provider = %response.provider,
            expires_at = %expires_at,
            event = "otp_sent",
            "Verification code sent"
        );

        Ok(response)
    }

    /// Verify a submitted code
    ///
    /// Returns `true` only if a code is stored for the phone number, it equals
    /// `code` exactly, and it has not expired. This is a pure read: a
    /// successful check does not consume the code.
    pub fn verify_code(&self, phone: &str, code: &str) -> bool {
        let now = self.clock.now();
        let verified = self
            .store
            .get(phone)
            .map(|record| record.accepts(code, now))
            .unwrap_or(false);

        tracing::debug!(
            phone = %mask_phone_number(phone),
            verified = verified,
            event = "otp_verify",
            "Checked verification code"
        );

        verified
    }

    /// Remove the code issued to a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationRecord)` - The record that was removed
    /// * `Err(DomainError::NotFound)` - No code is stored for the phone number
    pub fn remove_code(&self, phone: &str) -> DomainResult<VerificationRecord> {
        match self.store.delete(phone) {
            Some(record) => {
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    event = "otp_removed",
                    "Removed verification code"
                );
                Ok(record)
            }
            None => Err(DomainError::NotFound {
                phone: phone.to_string(),
            }),
        }
    }

    /// Time left on the code issued to a phone number
    ///
    /// Returns `None` if no code is stored or the stored code has expired.
    pub fn code_ttl(&self, phone: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.store
            .get(phone)
            .filter(|record| !record.is_expired_at(now))
            .map(|record| record.time_until_expiration(now))
    }
}

fn ttl_out_of_range() -> DomainError {
    DomainError::invalid_argument("ttl_seconds", "code lifetime is out of range")
}
