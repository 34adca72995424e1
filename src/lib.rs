//! # card_form
//!
//! Credit card payment form engine: input masks, field validation, form
//! state and card tokenization, independent of any UI toolkit.
//!
//! ## Features
//!
//! - Input masks for card number, expiry date and CVV
//! - Luhn, expiry and CVV validation with translatable reason keys
//! - Form controller with touched-field tracking and host callbacks
//! - Theme and translation overrides merged over defaults
//! - Card tokenization against a hosted tokens endpoint
//!
//! ## Quick Start
//!
//! ```rust
//! use card_form::{validate_card_details, is_form_valid, CardDetails, ErrorKey, TouchedFields};
//!
//! let details = CardDetails::new("4242 4242 4242 4242", "12/99", "12");
//! let errors = validate_card_details(&details, &TouchedFields::all());
//!
//! assert_eq!(errors.card_number, None);
//! assert_eq!(errors.cvv, Some(ErrorKey::CvvInvalid));
//! assert!(!is_form_valid(&details, &errors));
//!
//! // Debug output never shows the full number or the CVV
//! assert!(!format!("{:?}", details).contains("4242 4242 4242 4242"));
//! ```
//!
//! ## Input Masks
//!
//! ```rust
//! use card_form::format;
//!
//! assert_eq!(format::format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format::format_expiry_date("1225"), "12/25");
//! assert_eq!(format::format_cvv("12a34x"), "1234");
//! assert_eq!(format::strip_formatting("4242 4242"), "42424242");
//! ```
//!
//! ## Field Validators
//!
//! ```rust
//! use card_form::{validate_card_number, validate_cvv, validate_expiry_date};
//!
//! assert!(validate_card_number("4242 4242 4242 4242"));
//! assert!(!validate_card_number("4242 4242 4242 4241"));
//! assert!(validate_expiry_date("12/99"));
//! assert!(!validate_expiry_date("13/30"));
//! assert!(validate_cvv("123"));
//! assert!(!validate_cvv("12"));
//! ```
//!
//! ## Security
//!
//! - [`CardDetails`] zeroizes its values on drop
//! - `Debug` shows masked card numbers only
//! - Logs carry masked card numbers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod config;
pub mod cvv;
pub mod error;
pub mod expiry;
pub mod form;
pub mod format;
pub mod luhn;
pub mod mask;
pub mod tokenize;
pub mod validate;

// Re-export main types at crate root
pub use card::{CardDetails, Field, TouchedFields, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use config::{
    ErrorMessageOverrides, ErrorMessages, Theme, ThemeColorOverrides, ThemeColors,
    ThemeOverrides, TranslationOverrides, Translations,
};
pub use error::{CardNumberError, ConfigError};
pub use form::{FieldView, PaymentForm, PaymentFormBuilder, PaymentFormHandle};
pub use tokenize::{
    create_token, TokenApiResponse, TokenClient, TokenClientConfig, TokenError, Tokenizer,
};
pub use validate::{
    is_form_valid, validate_card_details, validate_card_number, ErrorKey, ValidationErrors,
};

pub use cvv::validate_cvv;
pub use expiry::{validate_expiry_date, ExpiryDate};
pub use format::{format_card_number, format_cvv, format_expiry_date, strip_formatting};
pub use mask::mask_string;

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test card numbers from payment processors
    const VISA_16: &str = "4242424242424242";
    const VISA_13: &str = "4222222222222";
    const MASTERCARD: &str = "5555555555554444";
    const AMEX: &str = "378282246310005";

    #[test]
    fn test_known_cards_pass() {
        for number in [VISA_16, VISA_13, MASTERCARD, AMEX] {
            assert!(validate_card_number(number), "{number}");
            assert!(validate_card_number(&format_card_number(number)), "{number}");
        }
    }

    #[test]
    fn test_formatted_input() {
        assert!(validate_card_number("4242-4242-4242-4242"));
        assert!(validate_card_number("4242 4242 4242 4242"));
        assert!(validate_card_number("4242-4242 4242-4242"));
    }

    #[test]
    fn test_invalid_checksum() {
        assert!(!validate_card_number("4242424242424241"));
    }

    #[test]
    fn test_fully_touched_valid_form() {
        let details = CardDetails::new(format_card_number(VISA_16), "12/99", "123");
        let errors = validate_card_details(&details, &TouchedFields::all());
        assert!(errors.is_empty());
        assert!(is_form_valid(&details, &errors));
    }

    #[test]
    fn test_untouched_fields_report_nothing() {
        let details = CardDetails::default();
        let errors = validate_card_details(&details, &TouchedFields::default());
        assert!(errors.is_empty());
        assert!(!is_form_valid(&details, &errors));
    }

    #[test]
    fn test_debug_is_safe() {
        let details = CardDetails::new(VISA_16, "12/30", "123");
        let debug = format!("{:?}", details);

        assert!(!debug.contains(VISA_16));
        assert!(!debug.contains("123\""));
        assert!(debug.contains("4242"));
    }

    #[test]
    fn test_mask_string() {
        let masked = mask_string(VISA_16);
        assert!(!masked.contains(VISA_16));
        assert!(masked.ends_with("4242"));
    }
}
