//! Fuzz target for the input masks.
//!
//! Tests that formatting functions never panic on arbitrary input.

#![no_main]

use card_form::format;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let formatted = format::format_card_number(data);
    let expiry = format::format_expiry_date(data);
    let cvv = format::format_cvv(data);

    // Masks are idempotent
    assert_eq!(format::format_card_number(&formatted), formatted);
    assert_eq!(format::format_expiry_date(&expiry), expiry);
    assert_eq!(format::format_cvv(&cvv), cvv);

    // Digits are kept in order, up to the field maximum
    let original_digits: String = format::strip_formatting(data).chars().take(19).collect();
    assert_eq!(
        format::strip_formatting(&formatted),
        original_digits,
        "Format roundtrip should preserve digits"
    );
});
