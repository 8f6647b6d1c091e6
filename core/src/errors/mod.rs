//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// Absence and expiry of a code are not errors; they surface as `Option`
/// and `bool` results. Only the cases below reach the caller as `Err`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The delivery channel rejected or failed to send the message
    #[error("Delivery failed: {message}")]
    Delivery {
        message: String,
        code: Option<String>,
    },

    /// No verification code is stored for the phone number
    #[error("Verification code not found for {phone}")]
    NotFound { phone: String },

    /// A caller-supplied or configured value is out of range
    #[error("Invalid argument {field}: {message}")]
    InvalidArgument { field: String, message: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    /// Build an `InvalidArgument` error for the named field
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports a missing verification code
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
