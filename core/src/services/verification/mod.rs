//! Verification service module for SMS-based phone ownership checks
//!
//! This module provides the verification code workflow:
//! - Code generation and delivery through a pluggable channel
//! - Committing delivered codes to the shared expiring store
//! - Checking submitted codes against the store and the clock
//! - Explicit removal of issued codes

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::ConfigSource;
pub use service::VerificationService;
pub use traits::DeliveryChannel;
pub use types::{DeliveryFailure, DeliveryResponse, ProviderOptions, SendOptions};
