//! Shared utilities and common types for the PhoneVerify workspace
//!
//! This crate provides common functionality used across all modules:
//! - Configuration types
//! - Utility functions (phone validation and masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    Environment, LogFormat, LoggingConfig, OtpConfig, SweeperConfig, VerificationConfig,
};
pub use utils::phone;
