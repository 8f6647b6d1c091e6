//! Types for verification service requests and delivery results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::DomainError;

/// Provider-specific options passed through to the delivery channel untouched
pub type ProviderOptions = BTreeMap<String, String>;

/// Per-call overrides for sending a code
///
/// Unset fields fall back to the service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Message template; `{{code}}` is replaced by the code
    pub message: Option<String>,
    /// Number of digits in the code
    pub code_length: Option<usize>,
    /// Seconds the code stays valid
    pub ttl_seconds: Option<i64>,
    /// Options forwarded to the delivery channel
    pub provider_options: ProviderOptions,
}

impl SendOptions {
    /// Override the message template
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the code length
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = Some(code_length);
        self
    }

    /// Override the code lifetime
    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = Some(ttl_seconds);
        self
    }

    /// Add a provider passthrough option
    pub fn with_provider_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.provider_options.insert(key.into(), value.into());
        self
    }
}

/// Successful delivery as reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryResponse {
    /// Provider message identifier
    pub message_id: String,
    /// Name of the provider that accepted the message
    pub provider: String,
    /// Raw provider payload
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl DeliveryResponse {
    /// Create a response with an empty payload
    pub fn new(message_id: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            provider: provider.into(),
            payload: serde_json::Value::Null,
        }
    }

    /// Attach the raw provider payload
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Failed delivery as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeliveryFailure {
    /// Human-readable provider error
    pub message: String,
    /// Provider error code, when one was returned
    pub code: Option<String>,
}

impl DeliveryFailure {
    /// Create a failure without a provider error code
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attach the provider error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<DeliveryFailure> for DomainError {
    fn from(failure: DeliveryFailure) -> Self {
        DomainError::Delivery {
            message: failure.message,
            code: failure.code,
        }
    }
}
