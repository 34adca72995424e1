//! Appearance configuration: colours and user-facing strings.
//!
//! Callers never build a full [`Theme`] or [`Translations`]. They pass
//! override structs whose leaves are all optional, and [`Theme::merged`] /
//! [`Translations::merged`] lay them over the built-in defaults one leaf at a
//! time. Colours and error messages are taken as-is; a malformed colour is the
//! host UI's problem. Empty labels and placeholders fall back to the defaults.
//!
//! Overrides deserialize from the camelCase JSON shape the host UI uses:
//!
//! ```
//! use card_form::config::{Translations, TranslationOverrides};
//!
//! let overrides: TranslationOverrides = serde_json::from_str(
//!     r#"{ "cardNumberLabel": "Kartennummer", "errors": { "cvvInvalid": "Ungültige CVV" } }"#,
//! ).unwrap();
//!
//! let translations = Translations::default().merged(overrides);
//! assert_eq!(translations.card_number_label, "Kartennummer");
//! assert_eq!(translations.expiry_date_label, "Expiry Date");
//! assert_eq!(translations.errors.cvv_invalid, "Ungültige CVV");
//! ```

use serde::{Deserialize, Serialize};

use crate::card::Field;
use crate::validate::ErrorKey;

/// Replaces `target` when an override is present.
fn apply(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Like [`apply`], but an empty override keeps the default.
fn apply_non_empty(target: &mut String, value: Option<String>) {
    apply(target, value.filter(|value| !value.is_empty()));
}

/// Colour palette, as CSS-style colour strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Accent colour.
    pub primary: String,
    /// Error text and error borders.
    pub error: String,
    /// Form background.
    pub background: String,
    /// Labels and input text.
    pub text: String,
    /// Input borders and placeholder text.
    pub border: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#0240FF".to_string(),
            error: "#FF0000".to_string(),
            background: "#FFFFFF".to_string(),
            text: "#000000".to_string(),
            border: "#CCCCCC".to_string(),
        }
    }
}

/// Visual theme of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Colour palette.
    pub colors: ThemeColors,
}

impl Theme {
    /// Returns this theme with `overrides` applied leaf by leaf.
    pub fn merged(mut self, overrides: ThemeOverrides) -> Self {
        if let Some(colors) = overrides.colors {
            apply(&mut self.colors.primary, colors.primary);
            apply(&mut self.colors.error, colors.error);
            apply(&mut self.colors.background, colors.background);
            apply(&mut self.colors.text, colors.text);
            apply(&mut self.colors.border, colors.border);
        }
        self
    }
}

/// Partial [`ThemeColors`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColorOverrides {
    /// Primary.
    pub primary: Option<String>,
    /// Error.
    pub error: Option<String>,
    /// Background.
    pub background: Option<String>,
    /// Text.
    pub text: Option<String>,
    /// Border.
    pub border: Option<String>,
}

/// Partial [`Theme`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    /// Colour overrides.
    pub colors: Option<ThemeColorOverrides>,
}

/// One message per validation reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessages {
    /// Card number required.
    pub card_number_required: String,
    /// Card number invalid.
    pub card_number_invalid: String,
    /// Expiry date required.
    pub expiry_date_required: String,
    /// Expiry date invalid.
    pub expiry_date_invalid: String,
    /// Expiry date past.
    pub expiry_date_past: String,
    /// CVV required.
    pub cvv_required: String,
    /// CVV invalid.
    pub cvv_invalid: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            card_number_required: "Card number is required".to_string(),
            card_number_invalid: "Invalid card number".to_string(),
            expiry_date_required: "Expiry date is required".to_string(),
            expiry_date_invalid: "Invalid expiry date format".to_string(),
            expiry_date_past: "Card has expired".to_string(),
            cvv_required: "CVV is required".to_string(),
            cvv_invalid: "Invalid CVV".to_string(),
        }
    }
}

impl ErrorMessages {
    /// Message for a reason key.
    pub fn get(&self, key: ErrorKey) -> &str {
        match key {
            ErrorKey::CardNumberRequired => &self.card_number_required,
            ErrorKey::CardNumberInvalid => &self.card_number_invalid,
            ErrorKey::ExpiryDateRequired => &self.expiry_date_required,
            ErrorKey::ExpiryDateInvalid => &self.expiry_date_invalid,
            ErrorKey::ExpiryDatePast => &self.expiry_date_past,
            ErrorKey::CvvRequired => &self.cvv_required,
            ErrorKey::CvvInvalid => &self.cvv_invalid,
        }
    }

    fn merge(&mut self, overrides: ErrorMessageOverrides) {
        apply(&mut self.card_number_required, overrides.card_number_required);
        apply(&mut self.card_number_invalid, overrides.card_number_invalid);
        apply(&mut self.expiry_date_required, overrides.expiry_date_required);
        apply(&mut self.expiry_date_invalid, overrides.expiry_date_invalid);
        apply(&mut self.expiry_date_past, overrides.expiry_date_past);
        apply(&mut self.cvv_required, overrides.cvv_required);
        apply(&mut self.cvv_invalid, overrides.cvv_invalid);
    }
}

/// Labels, placeholders and error messages shown by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translations {
    /// Card number label.
    pub card_number_label: String,
    /// Card number placeholder.
    pub card_number_placeholder: String,
    /// Expiry date label.
    pub expiry_date_label: String,
    /// Expiry date placeholder.
    pub expiry_date_placeholder: String,
    /// CVV label.
    pub cvv_label: String,
    /// CVV placeholder.
    pub cvv_placeholder: String,
    /// Validation messages.
    pub errors: ErrorMessages,
}

impl Default for Translations {
    fn default() -> Self {
        Self {
            card_number_label: "Card Number".to_string(),
            card_number_placeholder: "Enter your card number".to_string(),
            expiry_date_label: "Expiry Date".to_string(),
            expiry_date_placeholder: "MM/YY".to_string(),
            cvv_label: "CVV".to_string(),
            cvv_placeholder: "Enter CVV".to_string(),
            errors: ErrorMessages::default(),
        }
    }
}

impl Translations {
    /// Returns these translations with `overrides` applied leaf by leaf.
    ///
    /// Empty labels and placeholders keep their defaults. Error messages are
    /// taken as given, empty or not.
    pub fn merged(mut self, overrides: TranslationOverrides) -> Self {
        apply_non_empty(&mut self.card_number_label, overrides.card_number_label);
        apply_non_empty(&mut self.card_number_placeholder, overrides.card_number_placeholder);
        apply_non_empty(&mut self.expiry_date_label, overrides.expiry_date_label);
        apply_non_empty(&mut self.expiry_date_placeholder, overrides.expiry_date_placeholder);
        apply_non_empty(&mut self.cvv_label, overrides.cvv_label);
        apply_non_empty(&mut self.cvv_placeholder, overrides.cvv_placeholder);
        if let Some(errors) = overrides.errors {
            self.errors.merge(errors);
        }
        self
    }

    /// Label of a field.
    pub fn label(&self, field: Field) -> &str {
        match field {
            Field::CardNumber => &self.card_number_label,
            Field::ExpiryDate => &self.expiry_date_label,
            Field::Cvv => &self.cvv_label,
        }
    }

    /// Placeholder of a field.
    pub fn placeholder(&self, field: Field) -> &str {
        match field {
            Field::CardNumber => &self.card_number_placeholder,
            Field::ExpiryDate => &self.expiry_date_placeholder,
            Field::Cvv => &self.cvv_placeholder,
        }
    }

    /// Message for a validation reason.
    #[inline]
    pub fn message(&self, key: ErrorKey) -> &str {
        self.errors.get(key)
    }
}

/// Partial [`ErrorMessages`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorMessageOverrides {
    /// Card number required.
    pub card_number_required: Option<String>,
    /// Card number invalid.
    pub card_number_invalid: Option<String>,
    /// Expiry date required.
    pub expiry_date_required: Option<String>,
    /// Expiry date invalid.
    pub expiry_date_invalid: Option<String>,
    /// Expiry date past.
    pub expiry_date_past: Option<String>,
    /// CVV required.
    pub cvv_required: Option<String>,
    /// CVV invalid.
    pub cvv_invalid: Option<String>,
}

/// Partial [`Translations`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranslationOverrides {
    /// Card number label.
    pub card_number_label: Option<String>,
    /// Card number placeholder.
    pub card_number_placeholder: Option<String>,
    /// Expiry date label.
    pub expiry_date_label: Option<String>,
    /// Expiry date placeholder.
    pub expiry_date_placeholder: Option<String>,
    /// CVV label.
    pub cvv_label: Option<String>,
    /// CVV placeholder.
    pub cvv_placeholder: Option<String>,
    /// Error message overrides.
    pub errors: Option<ErrorMessageOverrides>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.colors.primary, "#0240FF");
        assert_eq!(theme.colors.error, "#FF0000");
        assert_eq!(theme.colors.border, "#CCCCCC");
    }

    #[test]
    fn test_theme_merge_per_leaf() {
        let theme = Theme::default().merged(ThemeOverrides {
            colors: Some(ThemeColorOverrides {
                error: Some("#00FF00".to_string()),
                ..Default::default()
            }),
        });
        assert_eq!(theme.colors.error, "#00FF00");
        assert_eq!(theme.colors.primary, "#0240FF");
        assert_eq!(theme.colors.text, "#000000");
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        assert_eq!(Theme::default().merged(ThemeOverrides::default()), Theme::default());
        assert_eq!(
            Translations::default().merged(TranslationOverrides::default()),
            Translations::default()
        );
    }

    #[test]
    fn test_translation_merge_nested_errors() {
        let translations = Translations::default().merged(TranslationOverrides {
            card_number_label: Some("Custom Card Number".to_string()),
            cvv_label: Some("Custom CVV".to_string()),
            errors: Some(ErrorMessageOverrides {
                card_number_required: Some("Custom card number required".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(translations.label(Field::CardNumber), "Custom Card Number");
        assert_eq!(translations.label(Field::Cvv), "Custom CVV");
        assert_eq!(translations.label(Field::ExpiryDate), "Expiry Date");
        assert_eq!(
            translations.message(ErrorKey::CardNumberRequired),
            "Custom card number required"
        );
        assert_eq!(translations.message(ErrorKey::CvvInvalid), "Invalid CVV");
    }

    #[test]
    fn test_theme_overrides_from_json() {
        let overrides: ThemeOverrides =
            serde_json::from_str(r##"{ "colors": { "primary": "#FF0000" } }"##).unwrap();
        let theme = Theme::default().merged(overrides);
        assert_eq!(theme.colors.primary, "#FF0000");
        assert_eq!(theme.colors.error, "#FF0000");
        assert_eq!(theme.colors.background, "#FFFFFF");
    }

    #[test]
    fn test_malformed_colour_is_taken_as_is() {
        let overrides: ThemeOverrides =
            serde_json::from_str(r#"{ "colors": { "border": "not-a-colour" } }"#).unwrap();
        assert_eq!(Theme::default().merged(overrides).colors.border, "not-a-colour");
    }

    #[test]
    fn test_empty_label_keeps_default() {
        let translations = Translations::default().merged(TranslationOverrides {
            card_number_label: Some(String::new()),
            cvv_placeholder: Some(String::new()),
            errors: Some(ErrorMessageOverrides {
                cvv_invalid: Some(String::new()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(translations.label(Field::CardNumber), "Card Number");
        assert_eq!(translations.placeholder(Field::Cvv), "Enter CVV");
        assert_eq!(translations.message(ErrorKey::CvvInvalid), "");
    }

    #[test]
    fn test_placeholders() {
        let translations = Translations::default();
        assert_eq!(translations.placeholder(Field::ExpiryDate), "MM/YY");
        assert_eq!(translations.placeholder(Field::Cvv), "Enter CVV");
    }
}
