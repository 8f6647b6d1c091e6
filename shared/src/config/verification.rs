//! Verification code and sweeper configuration

use serde::{Deserialize, Serialize};

/// Token replaced by the generated code when rendering a message template
pub const CODE_PLACEHOLDER: &str = "{{code}}";

/// Default lifetime of a verification code in seconds (5 minutes)
pub const DEFAULT_CODE_TTL_SECONDS: i64 = 300;

/// Default number of digits in a verification code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Longest code the generator will produce
pub const MAX_CODE_LENGTH: usize = 32;

/// Default message body sent with a verification code
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "Your verification code is: {{code}}";

/// Default interval between sweeper passes in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;

/// Settings resolved by the verification service on every send
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds a code stays valid after it is issued
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: i64,

    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Message body; every `{{code}}` is replaced by the code
    #[serde(default = "default_message_template")]
    pub message_template: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl_seconds(),
            code_length: default_code_length(),
            message_template: default_message_template(),
        }
    }
}

impl VerificationConfig {
    /// Set the code lifetime in seconds
    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.code_ttl_seconds = ttl_seconds;
        self
    }

    /// Set the number of digits per code
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    /// Set the message template
    pub fn with_message_template(mut self, template: impl Into<String>) -> Self {
        self.message_template = template.into();
        self
    }

    /// Check that the configured values can produce a usable code
    pub fn validate(&self) -> Result<(), String> {
        if self.code_ttl_seconds <= 0 {
            return Err(format!(
                "code_ttl_seconds must be positive, got {}",
                self.code_ttl_seconds
            ));
        }
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(format!(
                "code_length must be between 1 and {}, got {}",
                MAX_CODE_LENGTH, self.code_length
            ));
        }
        Ok(())
    }
}

/// Background sweeper configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SweeperConfig {
    /// How often to evict expired codes (in seconds)
    #[serde(default = "default_sweep_interval_seconds")]
    pub interval_seconds: u64,

    /// Whether the background sweep runs at all
    #[serde(default = "default_sweep_enabled")]
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_sweep_interval_seconds(),
            enabled: default_sweep_enabled(),
        }
    }
}

impl SweeperConfig {
    /// Create an enabled sweeper configuration with the given interval
    pub fn every(interval_seconds: u64) -> Self {
        Self {
            interval_seconds,
            enabled: true,
        }
    }
}

fn default_code_ttl_seconds() -> i64 {
    DEFAULT_CODE_TTL_SECONDS
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_message_template() -> String {
    DEFAULT_MESSAGE_TEMPLATE.to_string()
}

fn default_sweep_interval_seconds() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECONDS
}

fn default_sweep_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_config_default() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_ttl_seconds, 300);
        assert_eq!(config.code_length, 6);
        assert_eq!(config.message_template, "Your verification code is: {{code}}");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_verification_config_rejects_non_positive_values() {
        assert!(VerificationConfig::default().with_ttl_seconds(0).validate().is_err());
        assert!(VerificationConfig::default().with_ttl_seconds(-5).validate().is_err());
        assert!(VerificationConfig::default().with_code_length(0).validate().is_err());
    }

    #[test]
    fn test_verification_config_rejects_oversized_code_length() {
        let at_limit = VerificationConfig::default().with_code_length(MAX_CODE_LENGTH);
        assert!(at_limit.validate().is_ok());

        let over = VerificationConfig::default().with_code_length(MAX_CODE_LENGTH + 1);
        assert!(over.validate().is_err());
        assert!(VerificationConfig::default()
            .with_code_length(usize::MAX)
            .validate()
            .is_err());
    }

    #[test]
    fn test_verification_config_partial_deserialize() {
        let config: VerificationConfig =
            serde_json::from_str(r#"{"code_length": 4}"#).unwrap();
        assert_eq!(config.code_length, 4);
        assert_eq!(config.code_ttl_seconds, DEFAULT_CODE_TTL_SECONDS);
        assert!(config.message_template.contains(CODE_PLACEHOLDER));
    }

    #[test]
    fn test_sweeper_config() {
        let config = SweeperConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval_seconds, 60);

        let fast = SweeperConfig::every(5);
        assert_eq!(fast.interval_seconds, 5);
        assert!(fast.enabled);
    }
}
