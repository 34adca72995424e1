//! Field validation and the form-level error map.
//!
//! The per-field predicates are pure. [`validate_card_details`] combines them
//! into a [`ValidationErrors`] map, but only for fields the user has touched,
//! so a half-filled form does not shout at the user before they leave a field.
//!
//! # Example
//!
//! ```
//! use card_form::{validate_card_details, is_form_valid, CardDetails, ErrorKey, TouchedFields};
//!
//! let details = CardDetails::new("4242 4242 4242 4243", "", "");
//! let touched = TouchedFields { card_number: true, ..Default::default() };
//!
//! let errors = validate_card_details(&details, &touched);
//! assert_eq!(errors.card_number, Some(ErrorKey::CardNumberInvalid));
//! assert_eq!(errors.expiry_date, None);
//! assert!(!is_form_valid(&details, &errors));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::card::{CardDetails, Field, TouchedFields, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::cvv::validate_cvv;
use crate::error::CardNumberError;
use crate::expiry::{self, parse_expiry, ExpiryError};
use crate::luhn;

/// Checks a card number: separators stripped, 13-19 digits, Luhn.
///
/// Whitespace and hyphens are treated as separators; anything else that is
/// not an ASCII digit is rejected.
///
/// # Example
///
/// ```
/// use card_form::validate::check_card_number;
/// use card_form::CardNumberError;
///
/// assert!(check_card_number("4242 4242 4242 4242").is_ok());
/// assert_eq!(
///     check_card_number("4242 4242 4242 4243"),
///     Err(CardNumberError::InvalidChecksum)
/// );
/// ```
pub fn check_card_number(input: &str) -> Result<(), CardNumberError> {
    if input.is_empty() {
        return Err(CardNumberError::Empty);
    }

    let mut digits = [0u8; MAX_CARD_DIGITS];
    let mut count = 0usize;

    for (position, c) in input.chars().enumerate() {
        match c {
            '0'..='9' => {
                if count >= MAX_CARD_DIGITS {
                    return Err(CardNumberError::TooLong {
                        length: count + 1,
                        maximum: MAX_CARD_DIGITS,
                    });
                }
                digits[count] = (c as u8) - b'0';
                count += 1;
            }
            '-' => {}
            c if c.is_whitespace() => {}
            _ => {
                return Err(CardNumberError::InvalidCharacter {
                    position,
                    character: c,
                });
            }
        }
    }

    if count < MIN_CARD_DIGITS {
        return Err(CardNumberError::TooShort {
            length: count,
            minimum: MIN_CARD_DIGITS,
        });
    }

    if !luhn::validate(&digits[..count]) {
        return Err(CardNumberError::InvalidChecksum);
    }

    Ok(())
}

/// Returns true if the card number has 13-19 digits once spaces and hyphens
/// are removed and passes the Luhn check.
///
/// # Example
///
/// ```
/// use card_form::validate_card_number;
///
/// assert!(validate_card_number("4242424242424242"));
/// assert!(validate_card_number("4242-4242-4242-4242"));
/// assert!(!validate_card_number("1234"));
/// ```
#[inline]
pub fn validate_card_number(input: &str) -> bool {
    check_card_number(input).is_ok()
}

/// Reason a field failed validation.
///
/// The camelCase [`key`](ErrorKey::key) is what translation tables are keyed
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKey {
    /// Card number left empty.
    CardNumberRequired,
    /// Card number has the wrong length, characters, or checksum.
    CardNumberInvalid,
    /// Expiry date left empty.
    ExpiryDateRequired,
    /// Expiry date is not shaped `MM/YY`.
    ExpiryDateInvalid,
    /// Expiry date lies in the past, or its month is outside 1-12.
    ExpiryDatePast,
    /// CVV left empty.
    CvvRequired,
    /// CVV is not 3 or 4 digits.
    CvvInvalid,
}

impl ErrorKey {
    /// The translation key for this reason.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::CardNumberRequired => "cardNumberRequired",
            Self::CardNumberInvalid => "cardNumberInvalid",
            Self::ExpiryDateRequired => "expiryDateRequired",
            Self::ExpiryDateInvalid => "expiryDateInvalid",
            Self::ExpiryDatePast => "expiryDatePast",
            Self::CvvRequired => "cvvRequired",
            Self::CvvInvalid => "cvvInvalid",
        }
    }

    /// The field this reason belongs to.
    pub const fn field(&self) -> Field {
        match self {
            Self::CardNumberRequired | Self::CardNumberInvalid => Field::CardNumber,
            Self::ExpiryDateRequired | Self::ExpiryDateInvalid | Self::ExpiryDatePast => {
                Field::ExpiryDate
            }
            Self::CvvRequired | Self::CvvInvalid => Field::Cvv,
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// At most one error reason per field. `None` means no error is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    /// Card number error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<ErrorKey>,
    /// Expiry date error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<ErrorKey>,
    /// CVV error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<ErrorKey>,
}

impl ValidationErrors {
    /// Returns the error for one field.
    #[inline]
    pub const fn get(&self, field: Field) -> Option<ErrorKey> {
        match field {
            Field::CardNumber => self.card_number,
            Field::ExpiryDate => self.expiry_date,
            Field::Cvv => self.cvv,
        }
    }

    /// True when no field has an error.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.card_number.is_none() && self.expiry_date.is_none() && self.cvv.is_none()
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterates over `(field, reason)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, ErrorKey)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|key| (field, key)))
    }
}

/// Computes the error map for the touched fields, using the local clock for
/// the expiry check.
///
/// For each touched field the first failing rule wins: empty, then format,
/// then (expiry only) in the past.
pub fn validate_card_details(details: &CardDetails, touched: &TouchedFields) -> ValidationErrors {
    validate_card_details_at(details, touched, expiry::today())
}

/// Same as [`validate_card_details`] with an explicit reference date.
pub fn validate_card_details_at(
    details: &CardDetails,
    touched: &TouchedFields,
    today: NaiveDate,
) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if touched.card_number {
        errors.card_number = card_number_error(&details.card_number);
    }
    if touched.expiry_date {
        errors.expiry_date = expiry_date_error(&details.expiry_date, today);
    }
    if touched.cvv {
        errors.cvv = cvv_error(&details.cvv);
    }

    errors
}

/// True when all three fields hold a value and there are no errors.
///
/// `errors` is only as fresh as the last blur or submit: a field corrected
/// after an error was recorded keeps the form invalid until it is checked
/// again.
#[inline]
pub fn is_form_valid(details: &CardDetails, errors: &ValidationErrors) -> bool {
    let has_all_values = !details.card_number.is_empty()
        && !details.expiry_date.is_empty()
        && !details.cvv.is_empty();

    has_all_values && errors.is_empty()
}

fn card_number_error(value: &str) -> Option<ErrorKey> {
    if value.is_empty() {
        Some(ErrorKey::CardNumberRequired)
    } else if !validate_card_number(value) {
        Some(ErrorKey::CardNumberInvalid)
    } else {
        None
    }
}

fn expiry_date_error(value: &str, today: NaiveDate) -> Option<ErrorKey> {
    let expiry = match parse_expiry(value) {
        Ok(expiry) => expiry,
        Err(ExpiryError::Empty) => return Some(ErrorKey::ExpiryDateRequired),
        // Well-shaped but impossible months read as expired, not malformed.
        Err(ExpiryError::InvalidMonth(_)) => return Some(ErrorKey::ExpiryDatePast),
        Err(_) => return Some(ErrorKey::ExpiryDateInvalid),
    };

    expiry
        .is_expired_at(today)
        .then_some(ErrorKey::ExpiryDatePast)
}

fn cvv_error(value: &str) -> Option<ErrorKey> {
    if value.is_empty() {
        Some(ErrorKey::CvvRequired)
    } else if !validate_cvv(value) {
        Some(ErrorKey::CvvInvalid)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISA: &str = "4242 4242 4242 4242";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_card_number_lengths() {
        assert!(validate_card_number("4222222222222"));
        assert!(validate_card_number("4111111111111111110"));
        assert!(validate_card_number("4111 1111 1111 1111 110"));
        assert!(!validate_card_number("4111111111111111111"));
        assert_eq!(
            check_card_number("424242424242"),
            Err(CardNumberError::TooShort {
                length: 12,
                minimum: 13
            })
        );
        assert_eq!(
            check_card_number("42424242424242424242"),
            Err(CardNumberError::TooLong {
                length: 20,
                maximum: 19
            })
        );
    }

    #[test]
    fn test_card_number_separators() {
        assert!(validate_card_number("4242 4242 4242 4242"));
        assert!(validate_card_number("4242-4242-4242-4242"));
        assert!(validate_card_number("4242\t4242 4242-4242"));
        assert_eq!(
            check_card_number("4242.4242.4242.4242"),
            Err(CardNumberError::InvalidCharacter {
                position: 4,
                character: '.'
            })
        );
    }

    #[test]
    fn test_card_number_checksum() {
        assert!(!validate_card_number("4242424242424241"));
        assert!(!validate_card_number(""));
    }

    #[test]
    fn test_nothing_touched_means_no_errors() {
        let errors =
            validate_card_details_at(&CardDetails::default(), &TouchedFields::default(), today());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_reasons() {
        let errors =
            validate_card_details_at(&CardDetails::default(), &TouchedFields::all(), today());
        assert_eq!(errors.card_number, Some(ErrorKey::CardNumberRequired));
        assert_eq!(errors.expiry_date, Some(ErrorKey::ExpiryDateRequired));
        assert_eq!(errors.cvv, Some(ErrorKey::CvvRequired));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_invalid_reasons() {
        let details = CardDetails::new("1234", "1/2", "12");
        let errors = validate_card_details_at(&details, &TouchedFields::all(), today());
        assert_eq!(errors.card_number, Some(ErrorKey::CardNumberInvalid));
        assert_eq!(errors.expiry_date, Some(ErrorKey::ExpiryDateInvalid));
        assert_eq!(errors.cvv, Some(ErrorKey::CvvInvalid));
    }

    #[test]
    fn test_expiry_reasons() {
        let touched = TouchedFields {
            expiry_date: true,
            ..Default::default()
        };

        let past = CardDetails::new("", "01/20", "");
        let errors = validate_card_details_at(&past, &touched, today());
        assert_eq!(errors.expiry_date, Some(ErrorKey::ExpiryDatePast));

        let bad_month = CardDetails::new("", "13/30", "");
        let errors = validate_card_details_at(&bad_month, &touched, today());
        assert_eq!(errors.expiry_date, Some(ErrorKey::ExpiryDatePast));

        let zero_month = CardDetails::new("", "00/30", "");
        let errors = validate_card_details_at(&zero_month, &touched, today());
        assert_eq!(errors.expiry_date, Some(ErrorKey::ExpiryDatePast));

        let bad_shape = CardDetails::new("", "1230", "");
        let errors = validate_card_details_at(&bad_shape, &touched, today());
        assert_eq!(errors.expiry_date, Some(ErrorKey::ExpiryDateInvalid));

        let current = CardDetails::new("", "10/26", "");
        let errors = validate_card_details_at(&current, &touched, today());
        assert_eq!(errors.expiry_date, None);
    }

    #[test]
    fn test_only_touched_fields_report() {
        let details = CardDetails::new("1234", "", "");
        let touched = TouchedFields {
            cvv: true,
            ..Default::default()
        };
        let errors = validate_card_details_at(&details, &touched, today());
        assert_eq!(errors.card_number, None);
        assert_eq!(errors.cvv, Some(ErrorKey::CvvRequired));
    }

    #[test]
    fn test_is_form_valid() {
        let details = CardDetails::new(VISA, "12/30", "123");
        let errors = validate_card_details_at(&details, &TouchedFields::all(), today());
        assert!(errors.is_empty());
        assert!(is_form_valid(&details, &errors));

        let missing_cvv = CardDetails::new(VISA, "12/30", "");
        assert!(!is_form_valid(&missing_cvv, &ValidationErrors::default()));

        let errors = ValidationErrors {
            cvv: Some(ErrorKey::CvvInvalid),
            ..Default::default()
        };
        assert!(!is_form_valid(&details, &errors));
    }

    #[test]
    fn test_error_key_strings() {
        assert_eq!(ErrorKey::ExpiryDatePast.key(), "expiryDatePast");
        assert_eq!(ErrorKey::CvvInvalid.field(), Field::Cvv);
        assert_eq!(
            serde_json::to_string(&ErrorKey::CardNumberRequired).unwrap(),
            "\"cardNumberRequired\""
        );
    }

    #[test]
    fn test_errors_serialize_without_empty_fields() {
        let errors = ValidationErrors {
            expiry_date: Some(ErrorKey::ExpiryDatePast),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"expiryDate":"expiryDatePast"}"#
        );
    }

    #[test]
    fn test_iter_in_display_order() {
        let errors =
            validate_card_details_at(&CardDetails::default(), &TouchedFields::all(), today());
        let fields: Vec<Field> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }
}
