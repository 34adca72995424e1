//! Expiry date parsing and validation.
//!
//! The form only accepts the exact `MM/YY` shape its input mask produces.
//! Two-digit years are read as `20YY`. A card stays valid through the whole
//! of its expiry month.
//!
//! # Example
//!
//! ```
//! use card_form::expiry::{parse_expiry, validate_expiry_date_at};
//! use chrono::NaiveDate;
//!
//! let expiry = parse_expiry("12/30").unwrap();
//! assert_eq!(expiry.month(), 12);
//! assert_eq!(expiry.year(), 2030);
//!
//! let today = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();
//! assert!(validate_expiry_date_at("12/30", today));
//! assert!(!validate_expiry_date_at("11/30", today));
//! ```

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use thiserror::Error;

/// A parsed `MM/YY` expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExpiryDate {
    /// Four-digit year (e.g., 2030). Declared first so ordering is by year.
    year: u16,
    /// Month (1-12)
    month: u8,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Returns `None` if the month is not 1-12.
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns true if the expiry month lies strictly before the month of
    /// `today`.
    pub fn is_expired_at(&self, today: NaiveDate) -> bool {
        let (current_year, current_month) = year_month(today);
        (self.year, self.month) < (current_year, current_month)
    }

    /// Returns true if the card has expired, according to the local clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(today())
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Why an expiry string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiryError {
    /// The input string is empty.
    #[error("expiry date is empty")]
    Empty,
    /// The input is not shaped `MM/YY`.
    #[error("invalid expiry format (expected MM/YY)")]
    InvalidFormat,
    /// Month is out of range.
    #[error("invalid month {0}: must be 1-12")]
    InvalidMonth(u8),
    /// The expiry month has passed.
    #[error("card expired ({month:02}/{year})")]
    Expired {
        /// The expiry month.
        month: u8,
        /// The expiry year.
        year: u16,
    },
}

/// Returns true if `input` is exactly two ASCII digits, a slash, and two
/// ASCII digits.
///
/// The month is not range-checked here.
#[inline]
pub fn is_expiry_shape(input: &str) -> bool {
    match input.as_bytes() {
        [m1, m2, b'/', y1, y2] => [m1, m2, y1, y2].iter().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Parses an `MM/YY` expiry without checking it against the clock.
///
/// # Example
///
/// ```
/// use card_form::expiry::{parse_expiry, ExpiryError};
///
/// assert_eq!(parse_expiry("01/20").unwrap().year(), 2020);
/// assert_eq!(parse_expiry("13/25"), Err(ExpiryError::InvalidMonth(13)));
/// assert_eq!(parse_expiry("1/25"), Err(ExpiryError::InvalidFormat));
/// ```
pub fn parse_expiry(input: &str) -> Result<ExpiryDate, ExpiryError> {
    if input.is_empty() {
        return Err(ExpiryError::Empty);
    }
    if !is_expiry_shape(input) {
        return Err(ExpiryError::InvalidFormat);
    }

    let (month_str, year_str) = input.split_at(2);
    let month: u8 = month_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;
    let yy: u16 = year_str[1..].parse().map_err(|_| ExpiryError::InvalidFormat)?;

    ExpiryDate::new(month, 2000 + yy).ok_or(ExpiryError::InvalidMonth(month))
}

/// Parses an expiry and rejects it if it lies before the month of `today`.
pub fn check_expiry_at(input: &str, today: NaiveDate) -> Result<ExpiryDate, ExpiryError> {
    let expiry = parse_expiry(input)?;

    if expiry.is_expired_at(today) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }

    Ok(expiry)
}

/// Returns true if `input` is a well-formed `MM/YY` that has not expired
/// relative to `today`.
#[inline]
pub fn validate_expiry_date_at(input: &str, today: NaiveDate) -> bool {
    check_expiry_at(input, today).is_ok()
}

/// Returns true if `input` is a well-formed `MM/YY` that has not expired,
/// according to the local clock.
///
/// # Example
///
/// ```
/// use card_form::expiry::validate_expiry_date;
///
/// assert!(!validate_expiry_date("01/20"));
/// assert!(validate_expiry_date("12/99"));
/// assert!(!validate_expiry_date("1299"));
/// ```
#[inline]
pub fn validate_expiry_date(input: &str) -> bool {
    validate_expiry_date_at(input, today())
}

/// Today's date on the local clock.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn year_month(date: NaiveDate) -> (u16, u8) {
    // Years outside u16 would already fail every expiry comparison.
    let year = u16::try_from(date.year()).unwrap_or(u16::MAX);
    (year, date.month() as u8)
}
