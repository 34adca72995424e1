//! Fuzz target for CVV validation.
//!
//! Tests that CVV functions never panic and agree with the input mask.

#![no_main]

use card_form::{cvv, format};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // These should never panic
    let checked = cvv::check_cvv(data);
    assert_eq!(checked.is_ok(), cvv::validate_cvv(data));

    if let Ok(length) = checked {
        assert!((3..=4).contains(&length));
        assert_eq!(format::format_cvv(data), data, "Valid CVV should survive the mask");
    }

    let masked = format::format_cvv(data);
    assert!(masked.len() <= 4);
});
