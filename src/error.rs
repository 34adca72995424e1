//! Error types for card number checks and client configuration.
//!
//! Field-level form errors are reason keys, see [`crate::validate::ErrorKey`].
//! Tokenization failures live in [`crate::tokenize::TokenError`].

use thiserror::Error;

/// Why a card number was rejected.
///
/// Each variant carries enough detail to explain the failure to a developer;
/// end users see the translated reason key instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardNumberError {
    /// The input string was empty.
    #[error("card number is empty")]
    Empty,

    /// The card number has too few digits.
    #[error("card number too short: got {length} digits, minimum is {minimum}")]
    TooShort {
        /// The actual number of digits provided.
        length: usize,
        /// The minimum required digits (13).
        minimum: usize,
    },

    /// The card number has too many digits.
    #[error("card number too long: got {length} digits, maximum is {maximum}")]
    TooLong {
        /// The actual number of digits provided.
        length: usize,
        /// The maximum allowed digits (19).
        maximum: usize,
    },

    /// A character other than a digit, whitespace or hyphen was found.
    #[error(
        "invalid character '{}' at position {} (only digits, spaces, and hyphens allowed)",
        .character.escape_default(),
        .position
    )]
    InvalidCharacter {
        /// The position in the input string (0-indexed, in characters).
        position: usize,
        /// The invalid character that was found.
        character: char,
    },

    /// The Luhn checksum validation failed.
    #[error("invalid checksum (Luhn check failed) - please verify the card number")]
    InvalidChecksum,
}

/// Errors building client configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}
