//! Input masks applied to the form fields as the user types.
//!
//! Every mask first throws away anything that is not an ASCII digit, then
//! truncates, then inserts its separators. None of them validate.
//!
//! # Example
//!
//! ```
//! use card_form::format::{format_card_number, format_cvv, format_expiry_date};
//!
//! assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format_expiry_date("1225"), "12/25");
//! assert_eq!(format_cvv("12a34x5"), "1234");
//! ```

use crate::card::{MAX_CARD_DIGITS, MAX_CVV_DIGITS};

/// Digits in a `MMYY` expiry.
const EXPIRY_DIGITS: usize = 4;

/// Digits per space-separated group in a formatted card number.
const GROUP_SIZE: usize = 4;

/// Formats a card number as the user types.
///
/// Keeps at most 19 digits and puts a single space after every fourth digit
/// that is followed by another one. Applying it to its own output changes
/// nothing.
///
/// # Example
///
/// ```
/// use card_form::format::format_card_number;
///
/// assert_eq!(format_card_number("4242"), "4242");
/// assert_eq!(format_card_number("42424"), "4242 4");
/// assert_eq!(format_card_number("4242-4242 4242.4242"), "4242 4242 4242 4242");
/// ```
pub fn format_card_number(input: &str) -> String {
    let digits = digits_truncated(input, MAX_CARD_DIGITS);

    let mut result = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            result.push(' ');
        }
        result.push(c);
    }

    result
}

/// Formats an expiry date as `MM/YY` while the user types.
///
/// Keeps at most four digits; the slash only appears once a third digit is
/// present.
///
/// # Example
///
/// ```
/// use card_form::format::format_expiry_date;
///
/// assert_eq!(format_expiry_date("1"), "1");
/// assert_eq!(format_expiry_date("12"), "12");
/// assert_eq!(format_expiry_date("122"), "12/2");
/// assert_eq!(format_expiry_date("12/2530"), "12/25");
/// ```
pub fn format_expiry_date(input: &str) -> String {
    let digits = digits_truncated(input, EXPIRY_DIGITS);

    if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Restricts CVV input to at most four digits.
pub fn format_cvv(input: &str) -> String {
    digits_truncated(input, MAX_CVV_DIGITS)
}

/// Strips everything but ASCII digits.
///
/// # Example
///
/// ```
/// use card_form::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4242 4242-4242 4242"), "4242424242424242");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digits_truncated(input: &str, max: usize) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}
