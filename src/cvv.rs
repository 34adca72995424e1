//! CVV/CVC/CID shape validation.
//!
//! The form accepts any 3 or 4 digit code; it does not know the card brand,
//! so it cannot tell a 4-digit Amex CID from a mistyped Visa CVV.
//!
//! # Example
//!
//! ```
//! use card_form::cvv::validate_cvv;
//!
//! assert!(validate_cvv("123"));
//! assert!(validate_cvv("1234"));
//! assert!(!validate_cvv("12"));
//! assert!(!validate_cvv("12a"));
//! ```

use thiserror::Error;

use crate::card::{MAX_CVV_DIGITS, MIN_CVV_DIGITS};

/// Why a CVV was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CvvError {
    /// The input is empty.
    #[error("CVV is empty")]
    Empty,
    /// The CVV contains a non-digit character.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The invalid character found.
        character: char,
        /// Position of the invalid character.
        position: usize,
    },
    /// The CVV is not 3 or 4 digits long.
    #[error("CVV must be 3 or 4 digits, got {length}")]
    InvalidLength {
        /// Actual number of characters.
        length: usize,
    },
}

/// Checks a CVV and returns its length.
///
/// # Example
///
/// ```
/// use card_form::cvv::{check_cvv, CvvError};
///
/// assert_eq!(check_cvv("1234"), Ok(4));
/// assert_eq!(check_cvv("12345"), Err(CvvError::InvalidLength { length: 5 }));
/// ```
pub fn check_cvv(input: &str) -> Result<usize, CvvError> {
    if input.is_empty() {
        return Err(CvvError::Empty);
    }

    let mut count = 0;
    for (position, character) in input.chars().enumerate() {
        if !character.is_ascii_digit() {
            return Err(CvvError::InvalidCharacter {
                character,
                position,
            });
        }
        count += 1;
    }

    if !(MIN_CVV_DIGITS..=MAX_CVV_DIGITS).contains(&count) {
        return Err(CvvError::InvalidLength { length: count });
    }

    Ok(count)
}

/// Returns true if `input` is exactly 3 or 4 ASCII digits.
#[inline]
pub fn validate_cvv(input: &str) -> bool {
    check_cvv(input).is_ok()
}
