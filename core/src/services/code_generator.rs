//! Numeric verification code generation

use otp_shared::config::verification::MAX_CODE_LENGTH;
use rand::{rngs::OsRng, Rng};

use crate::errors::{DomainError, DomainResult};

/// Produces fixed-length numeric codes
pub trait CodeGenerator: Send + Sync {
    /// Generate a code of exactly `length` ASCII digits
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The generated code (leading zeros allowed)
    /// * `Err(DomainError::InvalidArgument)` - If `length` is zero or above [`MAX_CODE_LENGTH`]
    fn generate(&self, length: usize) -> DomainResult<String>;
}

/// Generator drawing every digit independently from the OS CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> DomainResult<String> {
        generate_code(length)
    }
}

/// Generate a cryptographically secure random numeric code
///
/// Each digit is drawn uniformly from `0..=9`, so there is no modulo bias
/// regardless of `length`.
pub fn generate_code(length: usize) -> DomainResult<String> {
    if length == 0 || length > MAX_CODE_LENGTH {
        return Err(DomainError::invalid_argument(
            "code_length",
            format!(
                "code length must be between 1 and {}, got {}",
                MAX_CODE_LENGTH, length
            ),
        ));
    }

    let mut rng = OsRng;
    Ok((0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect())
}
