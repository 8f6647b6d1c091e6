//! Configuration module with business-specific sub-modules
//!
//! - `environment` - Environment detection and logging configuration
//! - `verification` - Code lifetime, length, message template and sweeper settings

pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::{SweeperConfig, VerificationConfig};

/// Complete configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Expired code sweeper configuration
    #[serde(default)]
    pub sweeper: SweeperConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl OtpConfig {
    /// Create configuration with defaults suited to the given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            verification: VerificationConfig::default(),
            sweeper: SweeperConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_for_environment() {
        let config = OtpConfig::for_environment(Environment::Production);
        assert!(config.environment.is_production());
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.verification, VerificationConfig::default());
    }
}
