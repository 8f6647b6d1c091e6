//! Unit tests for domain error types

use crate::errors::DomainError;

#[test]
fn test_delivery_error_message() {
    let error = DomainError::Delivery {
        message: "The 'To' number is not a valid phone number".to_string(),
        code: Some("21211".to_string()),
    };
    let message = error.to_string();
    assert!(message.starts_with("Delivery failed"));
    assert!(message.contains("not a valid phone number"));
}

#[test]
fn test_not_found_error() {
    let error = DomainError::NotFound {
        phone: "+14155552671".to_string(),
    };
    assert!(error.is_not_found());
    assert!(error.to_string().contains("+14155552671"));
}

#[test]
fn test_invalid_argument_helper() {
    let error = DomainError::invalid_argument("code_length", "must be positive");
    assert_eq!(
        error,
        DomainError::InvalidArgument {
            field: "code_length".to_string(),
            message: "must be positive".to_string(),
        }
    );
    assert!(!error.is_not_found());
    assert_eq!(error.to_string(), "Invalid argument code_length: must be positive");
}
