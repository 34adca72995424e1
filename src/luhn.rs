//! Luhn ("modulus 10") checksum over card digits.
//!
//! Works on slices of digit values (0-9), not on text. Callers are expected
//! to strip separators first; see [`crate::validate::validate_card_number`].

/// Doubled digit with 9 subtracted when the result exceeds 9.
/// Index is the digit (0-9).
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Returns true if the digits pass the Luhn check.
///
/// An empty slice never passes.
///
/// # Example
///
/// ```
/// use card_form::luhn::validate;
///
/// let digits = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];
/// assert!(validate(&digits));
///
/// let invalid = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 3];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10).
///
/// The rightmost digit is kept as is, the one left of it is doubled, and so
/// on alternating towards the front.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Computes the check digit that makes `digits` followed by it pass
/// [`validate`].
///
/// # Example
///
/// ```
/// use card_form::luhn::generate_check_digit;
///
/// let partial = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4];
/// assert_eq!(generate_check_digit(&partial), 2);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every digit moves one position left once the check digit is appended,
    // so the doubling parity flips.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
