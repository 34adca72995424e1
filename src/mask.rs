//! Masking for card numbers that end up in logs or debug output.
//!
//! Only the last four digits are ever shown. The masked form keeps the same
//! four-digit grouping the card number input uses.

/// Masks a card number, keeping only the last four digits.
///
/// Separators in the input are ignored. Inputs with four or fewer digits are
/// masked completely.
///
/// # Example
///
/// ```
/// use card_form::mask::mask_string;
///
/// assert_eq!(mask_string("4242 4242 4242 4242"), "**** **** **** 4242");
/// assert_eq!(mask_string("4222222222222"), "**** **** *222 2");
/// assert_eq!(mask_string("424"), "***");
/// ```
pub fn mask_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let mut result = String::with_capacity(len + len / 4);
    for (i, &c) in digits.iter().enumerate() {
        if i > 0 && i % 4 == 0 {
            result.push(' ');
        }
        result.push(if i < len - 4 { '*' } else { c });
    }

    result
}

/// Returns the last four digits of a card number, or an empty string if it
/// has fewer than four.
#[inline]
pub fn last_four(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        digits[digits.len() - 4..].iter().collect()
    } else {
        String::new()
    }
}
