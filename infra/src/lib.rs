//! # Infrastructure Layer
//!
//! This crate wires the PhoneVerify core to the outside world. It provides
//! concrete delivery channels, configuration loading and the runtime that
//! owns the shared store and the background sweeper.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **SMS**: SMS service integrations (Twilio, mock) and the adapter to the core delivery channel
//! - **Config**: Environment-backed configuration, re-read on every send
//! - **Telemetry**: `tracing` subscriber setup
//! - **Runtime**: Construction of the store, service and sweeper
//!
//! ## Features
//!
//! - `twilio-sms`: Enable Twilio SMS service (default)

// Re-export core types for convenience
pub use otp_core::errors::*;

/// Configuration module for infrastructure services
pub mod config;

/// Delivery channel adapter from SMS services to the core service
pub mod delivery;

/// Runtime wiring of store, service and sweeper
pub mod runtime;

/// SMS service module - External SMS providers
pub mod sms;

/// Logging setup
pub mod telemetry;

pub use config::{load_config, EnvConfigSource, InfrastructureConfig, SmsConfig};
pub use delivery::SmsDeliveryChannel;
pub use runtime::{initialize, initialize_from_env, initialize_with_sms, OtpRuntime, SmsVerificationService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration source could not be read or deserialized
    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
