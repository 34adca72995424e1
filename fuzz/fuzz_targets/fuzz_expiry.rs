//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use card_form::{expiry, format};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // These should never panic
    let _ = expiry::validate_expiry_date(data);
    let _ = expiry::is_expiry_shape(data);

    if let Ok(exp) = expiry::parse_expiry(data) {
        assert!(expiry::is_expiry_shape(data));
        assert!((1..=12).contains(&exp.month()));
        assert_eq!(exp.to_string(), data, "Parsed expiry should display as typed");
        let _ = exp.is_expired();
    }

    // Whatever the mask produces is either a prefix of MM/YY or the full shape
    let masked = format::format_expiry_date(data);
    assert!(masked.len() <= 5);
    if masked.len() == 5 {
        assert!(expiry::is_expiry_shape(&masked));
    }
});
