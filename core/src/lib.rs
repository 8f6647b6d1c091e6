//! # PhoneVerify Core
//!
//! Core logic for phone number verification with one-time codes.
//! This crate contains the verification record entity, the shared expiring
//! store, the background sweeper that evicts expired codes, and the
//! verification service that issues, checks and removes codes.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
