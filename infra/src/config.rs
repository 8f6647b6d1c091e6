//! Configuration management for infrastructure services
//!
//! Handles:
//! - Verification and sweeper settings (`OTP_*` variables)
//! - SMS service credentials (`SMS_*` variables)
//! - Environment-specific logging settings

use std::path::{Path, PathBuf};

use otp_core::errors::{DomainError, DomainResult};
use otp_core::services::verification::ConfigSource;
use otp_shared::config::{
    Environment, LoggingConfig, OtpConfig, SweeperConfig, VerificationConfig,
};
use serde::{Deserialize, Serialize};

use crate::InfrastructureError;

/// Default prefix for verification settings in the environment
pub const DEFAULT_ENV_PREFIX: &str = "OTP";

/// Infrastructure configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureConfig {
    /// Verification, sweeper and logging configuration
    pub otp: OtpConfig,
    /// SMS service configuration
    pub sms: SmsConfig,
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            otp: OtpConfig::default(),
            sms: SmsConfig::default(),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsConfig {
    /// SMS service provider ("twilio", "mock")
    #[serde(default = "default_provider")]
    pub provider: String,
    /// API credentials
    #[serde(default)]
    pub api_key: String,
    /// API secret/token
    #[serde(default)]
    pub api_secret: String,
    /// From phone number
    #[serde(default = "default_from_number")]
    pub from_number: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            api_secret: String::new(),
            from_number: default_from_number(),
        }
    }
}

fn default_provider() -> String {
    "mock".to_string()
}

fn default_from_number() -> String {
    "+1234567890".to_string()
}

/// Configuration source backed by process environment variables
///
/// Every lookup rebuilds the configuration from the environment, so changes
/// to `OTP_CODE_TTL_SECONDS`, `OTP_CODE_LENGTH` or `OTP_MESSAGE_TEMPLATE`
/// apply to the next code that is sent.
#[derive(Debug, Clone)]
pub struct EnvConfigSource {
    prefix: String,
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvConfigSource {
    /// Read variables prefixed with `OTP_`
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Read variables prefixed with `<prefix>_`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load verification settings (`<prefix>_CODE_TTL_SECONDS`, ...)
    pub fn load_verification(&self) -> Result<VerificationConfig, InfrastructureError> {
        load_prefixed(&self.prefix)
    }

    /// Load sweeper settings (`<prefix>_SWEEP_INTERVAL_SECONDS`, `<prefix>_SWEEP_ENABLED`)
    pub fn load_sweeper(&self) -> Result<SweeperConfig, InfrastructureError> {
        load_prefixed(&format!("{}_SWEEP", self.prefix))
    }
}

impl ConfigSource for EnvConfigSource {
    fn verification_config(&self) -> DomainResult<VerificationConfig> {
        self.load_verification()
            .map_err(|e| DomainError::Configuration {
                message: e.to_string(),
            })
    }
}

fn load_prefixed<T>(prefix: &str) -> Result<T, InfrastructureError>
where
    T: for<'de> Deserialize<'de>,
{
    let settings = ::config::Config::builder()
        .add_source(::config::Environment::with_prefix(prefix).try_parsing(true))
        .build()?;
    Ok(settings.try_deserialize()?)
}

/// Load `.env.<environment>` and then `.env` from `dir`
///
/// Variables already present in the process are never overwritten, so the
/// environment-specific file wins over `.env`. Missing files are skipped.
/// Returns the files that were loaded.
pub fn load_env_files(dir: &Path, environment: Environment) -> Vec<PathBuf> {
    [dir.join(environment.env_file()), dir.join(".env")]
        .into_iter()
        .filter(|path| dotenvy::from_path(path).is_ok())
        .collect()
}

/// Load infrastructure configuration from the environment
///
/// Detects the environment from `ENVIRONMENT` (or `ENV` / `RUST_ENV`), loads
/// its `.env.<environment>` file and `.env` from the working directory, and
/// layers the `OTP_*` and `SMS_*` variables over environment defaults.
pub fn load_config() -> Result<InfrastructureConfig, InfrastructureError> {
    let environment = Environment::from_env();
    let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    load_env_files(&dir, environment);
    let source = EnvConfigSource::new();

    let verification = source.load_verification()?;
    verification.validate().map_err(InfrastructureError::Config)?;

    let otp = OtpConfig {
        environment,
        verification,
        sweeper: source.load_sweeper()?,
        logging: load_logging(environment)?,
    };
    let sms = load_prefixed::<SmsConfig>("SMS")?;

    Ok(InfrastructureConfig { otp, sms })
}

fn load_logging(environment: Environment) -> Result<LoggingConfig, InfrastructureError> {
    let mut logging = LoggingConfig::for_environment(environment);
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        logging.level = level;
    }
    if let Ok(format) = std::env::var("LOG_FORMAT") {
        logging.format = serde_json::from_value(serde_json::Value::String(format.to_lowercase()))
            .map_err(|e| InfrastructureError::Config(format!("Invalid LOG_FORMAT: {}", e)))?;
    }
    Ok(logging)
}
