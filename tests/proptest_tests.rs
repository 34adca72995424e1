//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use card_form::{
    cvv, format, luhn, mask, validate_card_details, validate_card_number, CardDetails, ErrorKey,
    TouchedFields,
};
use chrono::NaiveDate;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(|len| {
        proptest::collection::vec(prop::char::range('0', '9'), len)
            .prop_map(|chars| chars.into_iter().collect::<String>())
    })
}

/// Generates a Luhn-valid card number of 13 to 19 digits.
fn valid_card_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..10, 12..=18).prop_map(|mut digits| {
        digits.push(luhn::generate_check_digit(&digits));
        digits.iter().map(|d| char::from(b'0' + d)).collect()
    })
}

/// Luhn written the long way, to check the table-driven one against.
fn reference_luhn(number: &str) -> bool {
    let mut sum = 0;
    for (i, c) in number.chars().rev().enumerate() {
        let mut d = c.to_digit(10).unwrap();
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

// =============================================================================
// CARD NUMBER
// =============================================================================

proptest! {
    /// Length-valid numbers are accepted exactly when the reference Luhn agrees.
    #[test]
    fn luhn_matches_reference(number in digit_string_range(13..=19)) {
        prop_assert_eq!(validate_card_number(&number), reference_luhn(&number));
    }

    /// Generated check digits always produce valid numbers.
    #[test]
    fn generated_cards_validate(number in valid_card_strategy()) {
        prop_assert!(validate_card_number(&number));
        prop_assert!(validate_card_number(&format::format_card_number(&number)));
    }

    /// Changing one digit of a valid number always breaks the checksum.
    #[test]
    fn single_digit_change_detected(number in valid_card_strategy(), pos in 0usize..13, delta in 1u32..10) {
        let mut chars: Vec<char> = number.chars().collect();
        let d = chars[pos].to_digit(10).unwrap();
        chars[pos] = char::from_digit((d + delta) % 10, 10).unwrap();
        let changed: String = chars.into_iter().collect();

        prop_assert!(!validate_card_number(&changed));
    }

    /// Numbers outside 13..=19 digits never validate.
    #[test]
    fn wrong_lengths_rejected(number in prop_oneof![digit_string_range(1..=12), digit_string_range(20..=30)]) {
        prop_assert!(!validate_card_number(&number));
    }

    /// Never panics on arbitrary input.
    #[test]
    fn card_number_never_panics(input in ".*") {
        let _ = validate_card_number(&input);
        let _ = format::format_card_number(&input);
        let _ = mask::mask_string(&input);
    }
}

// =============================================================================
// INPUT MASKS
// =============================================================================

proptest! {
    /// Formatting a formatted value changes nothing.
    #[test]
    fn formatters_idempotent(input in ".*") {
        let card = format::format_card_number(&input);
        prop_assert_eq!(format::format_card_number(&card), card.clone());

        let expiry = format::format_expiry_date(&input);
        prop_assert_eq!(format::format_expiry_date(&expiry), expiry.clone());

        let cvv = format::format_cvv(&input);
        prop_assert_eq!(format::format_cvv(&cvv), cvv.clone());
    }

    /// Formatted card numbers keep their digits in order and stay within the input length.
    #[test]
    fn card_format_preserves_digits(input in digit_string_range(0..=25)) {
        let formatted = format::format_card_number(&input);
        let expected: String = input.chars().take(19).collect();

        prop_assert_eq!(format::strip_formatting(&formatted), expected);
        prop_assert!(formatted.len() <= 23);
        prop_assert!(!formatted.starts_with(' ') && !formatted.ends_with(' '));
        prop_assert!(!formatted.contains("  "));
    }

    /// Four digits always format to a well-shaped expiry.
    #[test]
    fn expiry_format_shape(digits in digit_string_range(4..=4)) {
        let formatted = format::format_expiry_date(&digits);
        prop_assert_eq!(formatted.len(), 5);
        prop_assert_eq!(&formatted[2..3], "/");
        prop_assert!(card_form::expiry::is_expiry_shape(&formatted));
    }

    /// The CVV mask yields at most four digits.
    #[test]
    fn cvv_format_bounded(input in ".*") {
        let formatted = format::format_cvv(&input);
        prop_assert!(formatted.len() <= 4);
        prop_assert!(formatted.chars().all(|c| c.is_ascii_digit()));
    }
}

// =============================================================================
// EXPIRY AND CVV
// =============================================================================

proptest! {
    /// Well-shaped dates with months outside 1..=12 read as expired.
    #[test]
    fn bad_months_are_past(month in prop_oneof![Just(0u8), 13u8..100], year in 0u8..100) {
        let details = CardDetails::new("", format!("{:02}/{:02}", month, year), "");
        let touched = TouchedFields { expiry_date: true, ..Default::default() };
        let errors = card_form::validate::validate_card_details_at(&details, &touched, today());

        prop_assert_eq!(errors.expiry_date, Some(ErrorKey::ExpiryDatePast));
    }

    /// Valid months are past exactly when before October 2026.
    #[test]
    fn expiry_past_boundary(month in 1u8..=12, year in 0u8..100) {
        let details = CardDetails::new("", format!("{:02}/{:02}", month, year), "");
        let touched = TouchedFields { expiry_date: true, ..Default::default() };
        let errors = card_form::validate::validate_card_details_at(&details, &touched, today());

        let past = (year, month) < (26, 10);
        prop_assert_eq!(errors.expiry_date.is_some(), past);
    }

    /// A CVV is valid exactly when it is 3 or 4 ASCII digits.
    #[test]
    fn cvv_rule(input in "[0-9a-z ]{0,6}") {
        let expected = (3..=4).contains(&input.len()) && input.chars().all(|c| c.is_ascii_digit());
        prop_assert_eq!(cvv::validate_cvv(&input), expected);
    }

    /// Untouched fields never carry errors.
    #[test]
    fn untouched_fields_clean(number in ".*", expiry in ".*", code in ".*") {
        let details = CardDetails::new(number, expiry, code);
        let errors = validate_card_details(&details, &TouchedFields::default());
        prop_assert!(errors.is_empty());
    }
}
