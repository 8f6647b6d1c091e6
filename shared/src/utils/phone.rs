//! Phone number utilities
//!
//! Phone numbers are stored exactly as callers supply them; these helpers
//! only validate and mask for display and logging.

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").expect("E.164 regex is valid")
});

/// Check if a phone number is in E.164 format (`+` followed by up to 15 digits)
pub fn is_valid_e164(phone: &str) -> bool {
    E164_PHONE_REGEX.is_match(phone)
}

/// Mask a phone number for logging, keeping only the last 4 characters
///
/// ```
/// use otp_shared::utils::phone::mask_phone_number;
///
/// assert_eq!(mask_phone_number("+14155552671"), "+*******2671");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let visible = 4;
    if chars.len() <= visible {
        return "*".repeat(chars.len());
    }

    let tail: String = chars[chars.len() - visible..].iter().collect();
    if chars[0] == '+' {
        format!("+{}{}", "*".repeat(chars.len() - visible - 1), tail)
    } else {
        format!("{}{}", "*".repeat(chars.len() - visible), tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_e164() {
        assert!(is_valid_e164("+8613812345678"));
        assert!(is_valid_e164("+14155552671"));
        assert!(is_valid_e164("+442071838750"));
        assert!(!is_valid_e164("13812345678")); // Missing +
        assert!(!is_valid_e164("+0123456789")); // Invalid country code
        assert!(!is_valid_e164("+1415555267a"));
        assert!(!is_valid_e164("+1234567890123456")); // Too long
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+1234567890"), "+******7890");
        assert_eq!(mask_phone_number("1234567890"), "******7890");
        assert_eq!(mask_phone_number("1234"), "****");
        assert_eq!(mask_phone_number("12"), "**");
        assert_eq!(mask_phone_number(""), "");
    }

    #[test]
    fn test_mask_phone_number_non_ascii() {
        // Must not split multi-byte characters
        assert_eq!(mask_phone_number("電話1234"), "**1234");
    }
}
