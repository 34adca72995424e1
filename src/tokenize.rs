//! Card tokenization: exchange raw card fields for a provider token.
//!
//! One `POST` per call, authenticated with a bearer API key. There is no
//! retry and no timeout; a hung connection hangs the returned future.
//!
//! # Example
//!
//! ```rust,no_run
//! use card_form::tokenize::{TokenClient, TokenClientConfig};
//! use card_form::CardDetails;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TokenClient::new(TokenClientConfig::new("pk_sbox_..."))?;
//! let details = CardDetails::new("4242 4242 4242 4242", "12/30", "100");
//!
//! let token = client.create_token(&details).await?;
//! println!("{} ({} ending {})", token.token, token.scheme, token.last4);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

use crate::card::CardDetails;
use crate::error::ConfigError;

/// Sandbox tokenization endpoint used unless another one is configured.
pub const DEFAULT_TOKEN_URL: &str = "https://api.sandbox.checkout.com/tokens";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CARD_FORM_API_KEY";

/// Environment variable overriding the tokenization endpoint.
pub const TOKEN_URL_ENV: &str = "CARD_FORM_TOKEN_URL";

/// Message used when the provider rejects a request without saying why.
const FALLBACK_MESSAGE: &str = "Failed to create token";

/// Token returned by the provider.
///
/// The form forwards it to its callbacks and to the caller of `submit`; it
/// keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenApiResponse {
    /// Opaque card token.
    pub token: String,
    /// Last four digits of the tokenized card.
    #[serde(default)]
    pub last4: String,
    /// Card scheme as reported by the provider, e.g. `VISA`.
    #[serde(default)]
    pub scheme: String,
    /// Expiry month as reported by the provider.
    #[serde(default, deserialize_with = "string_or_number")]
    pub expiry_month: String,
    /// Expiry year as reported by the provider.
    #[serde(default, deserialize_with = "string_or_number")]
    pub expiry_year: String,
}

/// Providers send expiry fields either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Why a token could not be created.
///
/// Every variant displays as `Token creation failed: <detail>`.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The provider answered with a non-success status.
    #[error("Token creation failed: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The provider's `message`, or a generic fallback.
        message: String,
    },

    /// The request never produced a response.
    #[error("Token creation failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// A success response whose body is not a token.
    #[error("Token creation failed: {0}")]
    Decode(String),
}

impl TokenError {
    /// The HTTP status, when the provider answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Where and how to reach the tokenization endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenClientConfig {
    /// Full URL of the tokens endpoint.
    pub endpoint: String,
    /// Public API key sent as a bearer token.
    pub api_key: String,
}

impl TokenClientConfig {
    /// Configuration for the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_TOKEN_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Replaces the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Reads `CARD_FORM_API_KEY` and, if set, `CARD_FORM_TOKEN_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingVar(API_KEY_ENV))?;

        let config = Self::new(api_key);
        Ok(match std::env::var(TOKEN_URL_ENV) {
            Ok(endpoint) if !endpoint.is_empty() => config.with_endpoint(endpoint),
            _ => config,
        })
    }
}

impl fmt::Debug for TokenClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .finish()
    }
}

/// Request body sent to the provider.
#[derive(Serialize)]
struct TokenRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    number: String,
    expiry_month: &'a str,
    expiry_year: &'a str,
    cvv: &'a str,
}

impl<'a> TokenRequest<'a> {
    fn from_details(details: &'a CardDetails) -> Self {
        let mut expiry = details.expiry_date.split('/');
        let expiry_month = expiry.next().unwrap_or_default();
        let expiry_year = expiry.next().unwrap_or_default();

        Self {
            kind: "card",
            number: details
                .card_number
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
            expiry_month,
            expiry_year,
            cvv: &details.cvv,
        }
    }
}

impl Drop for TokenRequest<'_> {
    fn drop(&mut self) {
        self.number.zeroize();
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Anything that can turn card details into a token.
///
/// [`TokenClient`] talks to the real endpoint; tests and alternative
/// providers implement this directly.
#[async_trait]
pub trait Tokenizer: Send + Sync {
    /// Exchanges card details for a token.
    async fn create_token(&self, details: &CardDetails) -> Result<TokenApiResponse, TokenError>;
}

/// HTTP client for the tokenization endpoint.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct TokenClient {
    config: TokenClientConfig,
    client: reqwest::Client,
}

impl TokenClient {
    /// Creates a client for the given configuration.
    pub fn new(config: TokenClientConfig) -> Result<Self, TokenError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(TokenError::Transport)?;

        Ok(Self { config, client })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TokenClientConfig {
        &self.config
    }

    /// Sends the card details to the endpoint and returns the token.
    pub async fn create_token(
        &self,
        details: &CardDetails,
    ) -> Result<TokenApiResponse, TokenError> {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            card = %details.masked_number(),
            "requesting card token"
        );

        let result = self.request_token(details).await;
        match &result {
            Ok(token) => tracing::info!(
                last4 = %token.last4,
                scheme = %token.scheme,
                "card token created"
            ),
            Err(error) => tracing::warn!(status = ?error.status(), %error, "card tokenization failed"),
        }
        result
    }

    async fn request_token(&self, details: &CardDetails) -> Result<TokenApiResponse, TokenError> {
        let body = TokenRequest::from_details(details);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(TokenError::Transport)?;
        drop(body);

        let status = response.status();
        let text = response.text().await.map_err(TokenError::Transport)?;

        if !status.is_success() {
            return Err(TokenError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| TokenError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Tokenizer for TokenClient {
    async fn create_token(&self, details: &CardDetails) -> Result<TokenApiResponse, TokenError> {
        TokenClient::create_token(self, details).await
    }
}

/// One-shot tokenization against the default endpoint.
pub async fn create_token(
    details: &CardDetails,
    api_key: &str,
) -> Result<TokenApiResponse, TokenError> {
    TokenClient::new(TokenClientConfig::new(api_key))?
        .create_token(details)
        .await
}

/// Extracts the provider's `message` from an error body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
