//! The payment form controller.
//!
//! [`PaymentForm`] owns the three field values, which fields have been
//! touched, the current error map and whether the form is mounted. A host UI
//! forwards its input events ([`PaymentForm::edit`], [`PaymentForm::blur`]),
//! renders [`PaymentForm::fields`], and drives the form through the
//! [`PaymentFormHandle`] trait.
//!
//! State changes are synchronous except for `submit`, which awaits the
//! tokenizer once and cannot be cancelled other than by dropping the future.
//!
//! # Example
//!
//! ```rust,no_run
//! use card_form::{Field, PaymentForm, PaymentFormHandle, TokenClient, TokenClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TokenClient::new(TokenClientConfig::from_env()?)?;
//! let mut form = PaymentForm::builder(client)
//!     .on_card_details_change(|details, valid| println!("{:?} valid={}", details, valid))
//!     .on_payment_completed(|token| println!("token {}", token.token))
//!     .build();
//!
//! form.edit(Field::CardNumber, "4242424242424242");
//! form.blur(Field::CardNumber);
//! form.edit(Field::ExpiryDate, "1230");
//! form.blur(Field::ExpiryDate);
//! form.edit(Field::Cvv, "100");
//! form.blur(Field::Cvv);
//!
//! if let Some(token) = form.submit().await? {
//!     println!("tokenized card ending {}", token.last4);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::card::{CardDetails, Field, TouchedFields};
use crate::config::{Theme, ThemeOverrides, TranslationOverrides, Translations};
use crate::expiry;
use crate::format::{format_card_number, format_cvv, format_expiry_date};
use crate::tokenize::{TokenApiResponse, TokenError, Tokenizer};
use crate::validate::{is_form_valid, validate_card_details_at, ErrorKey, ValidationErrors};

/// Called after a blur with the current details and form validity.
pub type ChangeCallback = Box<dyn FnMut(&CardDetails, bool) + Send>;

/// Called with a freshly created token.
pub type TokenCallback = Box<dyn FnMut(&TokenApiResponse) + Send>;

/// Called when tokenization fails.
pub type ErrorCallback = Box<dyn FnMut(&TokenError) + Send>;

#[derive(Default)]
struct Callbacks {
    on_card_details_change: Option<ChangeCallback>,
    on_submit: Option<TokenCallback>,
    on_error: Option<ErrorCallback>,
    on_payment_completed: Option<TokenCallback>,
}

/// Imperative operations a host application can invoke on a form.
#[async_trait]
pub trait PaymentFormHandle {
    /// Validates every field and, if the form is valid, tokenizes the card.
    ///
    /// Returns `Ok(None)` without contacting the tokenizer when validation
    /// fails.
    async fn submit(&mut self) -> Result<Option<TokenApiResponse>, TokenError>;

    /// Whether the current values and errors make a valid form.
    ///
    /// Does not validate; errors are as of the last blur or submit.
    fn is_valid(&self) -> bool;

    /// Whether the form can be used at all. Always true.
    fn is_available(&self) -> bool;

    /// Shows the form.
    fn mount(&mut self) -> &mut Self;

    /// Hides the form. State is kept.
    fn unmount(&mut self) -> &mut Self;

    /// Clears all values, touched flags and errors.
    fn reset(&mut self);
}

/// What a host UI needs to render one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView<'a> {
    /// Which input this is.
    pub field: Field,
    /// Identifier for the rendered input.
    pub test_id: &'static str,
    /// Label above the input.
    pub label: &'a str,
    /// Placeholder inside the empty input.
    pub placeholder: &'a str,
    /// Current formatted value.
    pub value: &'a str,
    /// Translated error message, if one is shown.
    pub error: Option<&'a str>,
    /// Maximum accepted input length.
    pub max_length: usize,
    /// Input border colour; the theme's error colour while an error shows.
    pub border_color: &'a str,
    /// Label and input text colour.
    pub text_color: &'a str,
}

/// Credit card payment form.
pub struct PaymentForm<T> {
    tokenizer: T,
    details: CardDetails,
    touched: TouchedFields,
    errors: ValidationErrors,
    mounted: bool,
    theme: Theme,
    translations: Translations,
    callbacks: Callbacks,
    today: fn() -> NaiveDate,
}

impl<T: Tokenizer> PaymentForm<T> {
    /// Starts building a form that tokenizes through `tokenizer`.
    pub fn builder(tokenizer: T) -> PaymentFormBuilder<T> {
        PaymentFormBuilder::new(tokenizer)
    }

    /// Creates a form with default theme, translations and no callbacks.
    pub fn new(tokenizer: T) -> Self {
        Self::builder(tokenizer).build()
    }

    /// Sets a field from raw user input, through that field's input mask.
    ///
    /// Does not mark the field touched and does not validate.
    pub fn edit(&mut self, field: Field, raw: &str) {
        let formatted = match field {
            Field::CardNumber => format_card_number(raw),
            Field::ExpiryDate => format_expiry_date(raw),
            Field::Cvv => format_cvv(raw),
        };
        self.details = self.details.with(field, formatted);
    }

    /// Marks a field touched, revalidates every touched field and notifies
    /// the change callback.
    pub fn blur(&mut self, field: Field) {
        self.touched.touch(field);
        self.revalidate();

        let valid = self.is_valid();
        tracing::debug!(%field, valid, errors = self.errors.len(), "field blurred");

        if let Some(callback) = self.callbacks.on_card_details_change.as_mut() {
            callback(&self.details, valid);
        }
    }

    /// Current values.
    pub fn details(&self) -> &CardDetails {
        &self.details
    }

    /// Current touched flags.
    pub fn touched(&self) -> &TouchedFields {
        &self.touched
    }

    /// Current error map.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Whether the form is currently shown.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Effective theme, defaults merged with overrides.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Effective translations, defaults merged with overrides.
    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// The tokenizer this form submits through.
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Translated error message for a field, if it has an error.
    pub fn error_message(&self, field: Field) -> Option<&str> {
        self.errors
            .get(field)
            .map(|key: ErrorKey| self.translations.message(key))
    }

    /// Render descriptors for the three inputs in display order, or nothing
    /// while unmounted.
    pub fn fields(&self) -> Vec<FieldView<'_>> {
        if !self.mounted {
            return Vec::new();
        }

        let colors = &self.theme.colors;
        Field::ALL
            .into_iter()
            .map(|field| {
                let error = self.error_message(field);
                FieldView {
                    field,
                    test_id: field.test_id(),
                    label: self.translations.label(field),
                    placeholder: self.translations.placeholder(field),
                    value: self.details.get(field),
                    error,
                    max_length: field.max_length(),
                    border_color: if error.is_some() {
                        colors.error.as_str()
                    } else {
                        colors.border.as_str()
                    },
                    text_color: &colors.text,
                }
            })
            .collect()
    }

    fn revalidate(&mut self) {
        self.errors = validate_card_details_at(&self.details, &self.touched, (self.today)());
    }
}

#[async_trait]
impl<T: Tokenizer> PaymentFormHandle for PaymentForm<T> {
    async fn submit(&mut self) -> Result<Option<TokenApiResponse>, TokenError> {
        self.touched = TouchedFields::all();
        self.revalidate();

        if !self.is_valid() {
            tracing::debug!(errors = self.errors.len(), "submit blocked by validation errors");
            return Ok(None);
        }

        tracing::info!(card = %self.details.masked_number(), "submitting card");

        match self.tokenizer.create_token(&self.details).await {
            Ok(token) => {
                if let Some(callback) = self.callbacks.on_submit.as_mut() {
                    callback(&token);
                }
                if let Some(callback) = self.callbacks.on_payment_completed.as_mut() {
                    callback(&token);
                }
                Ok(Some(token))
            }
            Err(error) => {
                if let Some(callback) = self.callbacks.on_error.as_mut() {
                    callback(&error);
                }
                Err(error)
            }
        }
    }

    fn is_valid(&self) -> bool {
        is_form_valid(&self.details, &self.errors)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn mount(&mut self) -> &mut Self {
        self.mounted = true;
        self
    }

    fn unmount(&mut self) -> &mut Self {
        self.mounted = false;
        self
    }

    fn reset(&mut self) {
        self.details = CardDetails::default();
        self.touched = TouchedFields::default();
        self.errors = ValidationErrors::default();
    }
}

/// Builder for [`PaymentForm`].
pub struct PaymentFormBuilder<T> {
    tokenizer: T,
    theme: ThemeOverrides,
    translations: TranslationOverrides,
    callbacks: Callbacks,
    today: fn() -> NaiveDate,
}

impl<T: Tokenizer> PaymentFormBuilder<T> {
    /// Creates a new builder.
    pub fn new(tokenizer: T) -> Self {
        Self {
            tokenizer,
            theme: ThemeOverrides::default(),
            translations: TranslationOverrides::default(),
            callbacks: Callbacks::default(),
            today: expiry::today,
        }
    }

    /// Colour overrides laid over the default theme.
    pub fn theme(mut self, overrides: ThemeOverrides) -> Self {
        self.theme = overrides;
        self
    }

    /// String overrides laid over the default translations.
    pub fn translations(mut self, overrides: TranslationOverrides) -> Self {
        self.translations = overrides;
        self
    }

    /// Called after every blur.
    pub fn on_card_details_change(
        mut self,
        callback: impl FnMut(&CardDetails, bool) + Send + 'static,
    ) -> Self {
        self.callbacks.on_card_details_change = Some(Box::new(callback));
        self
    }

    /// Called with the token after a successful submit.
    pub fn on_submit(mut self, callback: impl FnMut(&TokenApiResponse) + Send + 'static) -> Self {
        self.callbacks.on_submit = Some(Box::new(callback));
        self
    }

    /// Called when tokenization fails.
    pub fn on_error(mut self, callback: impl FnMut(&TokenError) + Send + 'static) -> Self {
        self.callbacks.on_error = Some(Box::new(callback));
        self
    }

    /// Called with the token after a successful submit, after `on_submit`.
    pub fn on_payment_completed(
        mut self,
        callback: impl FnMut(&TokenApiResponse) + Send + 'static,
    ) -> Self {
        self.callbacks.on_payment_completed = Some(Box::new(callback));
        self
    }

    /// Source of today's date for the expiry check. Defaults to the local
    /// clock.
    pub fn clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Builds the form, mounted and empty.
    pub fn build(self) -> PaymentForm<T> {
        PaymentForm {
            tokenizer: self.tokenizer,
            details: CardDetails::default(),
            touched: TouchedFields::default(),
            errors: ValidationErrors::default(),
            mounted: true,
            theme: Theme::default().merged(self.theme),
            translations: Translations::default().merged(self.translations),
            callbacks: self.callbacks,
            today: self.today,
        }
    }
}
