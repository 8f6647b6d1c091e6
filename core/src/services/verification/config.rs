//! Configuration lookup for the verification service

use otp_shared::config::VerificationConfig;

use crate::errors::DomainResult;

/// Source of verification settings, consulted on every send
///
/// The service never caches what this returns, so an implementation backed
/// by the environment or a file picks up changes on the next call.
pub trait ConfigSource: Send + Sync {
    /// Current verification settings
    fn verification_config(&self) -> DomainResult<VerificationConfig>;
}

/// A fixed configuration value
impl ConfigSource for VerificationConfig {
    fn verification_config(&self) -> DomainResult<VerificationConfig> {
        Ok(self.clone())
    }
}
