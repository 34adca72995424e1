//! Card field values and the per-field touched flags.
//!
//! `CardDetails` holds raw cardholder input, so it wipes itself on drop and
//! never prints the full number or the CVV.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::mask::mask_string;

/// Maximum number of digits in a credit card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a credit card number.
pub const MIN_CARD_DIGITS: usize = 13;

/// Maximum number of CVV digits.
pub const MAX_CVV_DIGITS: usize = 4;

/// Minimum number of CVV digits.
pub const MIN_CVV_DIGITS: usize = 3;

/// One of the three inputs of the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Card number, formatted as `4242 4242 4242 4242`.
    CardNumber,
    /// Expiry date, formatted as `MM/YY`.
    ExpiryDate,
    /// Card verification value, 3 or 4 digits.
    Cvv,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::CardNumber, Field::ExpiryDate, Field::Cvv];

    /// Stable camelCase key (`cardNumber`, `expiryDate`, `cvv`).
    #[inline]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
        }
    }

    /// Identifier a host UI attaches to the rendered input.
    #[inline]
    pub const fn test_id(&self) -> &'static str {
        match self {
            Self::CardNumber => "card-number-input",
            Self::ExpiryDate => "expiry-date-input",
            Self::Cvv => "cvv-input",
        }
    }

    /// Maximum number of characters the input accepts.
    #[inline]
    pub const fn max_length(&self) -> usize {
        match self {
            Self::CardNumber => 19,
            Self::ExpiryDate => 5,
            Self::Cvv => MAX_CVV_DIGITS,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The values currently held by the form.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CardDetails {
    /// Card number as entered (after masking), e.g. `4242 4242 4242 4242`.
    pub card_number: String,
    /// Expiry date as `MM/YY`.
    pub expiry_date: String,
    /// Card verification value.
    pub cvv: String,
}

impl CardDetails {
    /// Creates card details from the three raw values.
    pub fn new(
        card_number: impl Into<String>,
        expiry_date: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiry_date: expiry_date.into(),
            cvv: cvv.into(),
        }
    }

    /// Returns the value of one field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::CardNumber => &self.card_number,
            Field::ExpiryDate => &self.expiry_date,
            Field::Cvv => &self.cvv,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with(&self, field: Field, value: String) -> Self {
        let mut next = self.clone();
        match field {
            Field::CardNumber => next.card_number = value,
            Field::ExpiryDate => next.expiry_date = value,
            Field::Cvv => next.cvv = value,
        }
        next
    }

    /// True when none of the fields hold a value.
    pub fn is_empty(&self) -> bool {
        self.card_number.is_empty() && self.expiry_date.is_empty() && self.cvv.is_empty()
    }

    /// Card number masked down to its last four digits, safe for logs.
    pub fn masked_number(&self) -> String {
        mask_string(&self.card_number)
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &self.masked_number())
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"*".repeat(self.cvv.len()))
            .finish()
    }
}

/// Which fields the user has blurred at least once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedFields {
    /// Card number was blurred.
    pub card_number: bool,
    /// Expiry date was blurred.
    pub expiry_date: bool,
    /// CVV was blurred.
    pub cvv: bool,
}

impl TouchedFields {
    /// Every field marked touched, as on submit.
    pub const fn all() -> Self {
        Self {
            card_number: true,
            expiry_date: true,
            cvv: true,
        }
    }

    /// Returns the flag for one field.
    #[inline]
    pub const fn get(&self, field: Field) -> bool {
        match field {
            Field::CardNumber => self.card_number,
            Field::ExpiryDate => self.expiry_date,
            Field::Cvv => self.cvv,
        }
    }

    /// Marks one field touched.
    #[inline]
    pub fn touch(&mut self, field: Field) {
        match field {
            Field::CardNumber => self.card_number = true,
            Field::ExpiryDate => self.expiry_date = true,
            Field::Cvv => self.cvv = true,
        }
    }
}
