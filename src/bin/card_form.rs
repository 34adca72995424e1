//! Command-line front end for the payment form engine.
//!
//! # Usage
//!
//! ```bash
//! # Apply an input mask
//! card-form format card 4242424242424242
//! card-form format expiry 1230
//!
//! # Validate all three fields as a submit would
//! card-form validate --number "4242 4242 4242 4242" --expiry 12/30 --cvv 123
//!
//! # Tokenize a card (API key from --api-key or CARD_FORM_API_KEY)
//! card-form tokenize --number 4242424242424242 --expiry 12/30 --cvv 100
//! ```
//!
//! Set `RUST_LOG=card_form=debug` to see what the form does.

use card_form::tokenize::API_KEY_ENV;
use card_form::{
    format, validate_card_details, CardDetails, Field, PaymentForm, PaymentFormHandle,
    TokenClient, TokenClientConfig, TouchedFields, Translations,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "card-form")]
#[command(author, version, about = "Credit card payment form: masks, validation and tokenization")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a field's input mask
    Format {
        /// Which field's mask to apply
        field: FieldArg,

        /// Raw input
        value: String,
    },

    /// Validate card number, expiry date and CVV together
    Validate {
        #[command(flatten)]
        card: CardArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Validate and tokenize a card
    Tokenize {
        #[command(flatten)]
        card: CardArgs,

        /// API key, defaults to the CARD_FORM_API_KEY environment variable
        #[arg(short, long)]
        api_key: Option<String>,

        /// Tokens endpoint
        #[arg(short, long)]
        endpoint: Option<String>,
    },
}

#[derive(clap::Args)]
struct CardArgs {
    /// Card number (spaces and dashes allowed)
    #[arg(short, long)]
    number: String,

    /// Expiry date as MM/YY
    #[arg(short = 'x', long)]
    expiry: String,

    /// Card verification value
    #[arg(short, long)]
    cvv: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Card,
    Expiry,
    Cvv,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Format { field, value } => cmd_format(field, &value),
        Commands::Validate { card, output } => cmd_validate(&card, output),
        Commands::Tokenize {
            card,
            api_key,
            endpoint,
        } => cmd_tokenize(&card, api_key, endpoint).await,
    }
}

fn cmd_format(field: FieldArg, value: &str) {
    let formatted = match field {
        FieldArg::Card => format::format_card_number(value),
        FieldArg::Expiry => format::format_expiry_date(value),
        FieldArg::Cvv => format::format_cvv(value),
    };
    println!("{}", formatted);
}

fn cmd_validate(card: &CardArgs, output: OutputFormat) {
    let details = CardDetails::new(&card.number, &card.expiry, &card.cvv);
    let errors = validate_card_details(&details, &TouchedFields::all());
    let translations = Translations::default();

    match output {
        OutputFormat::Text => {
            println!("Valid: {}", if errors.is_empty() { "yes" } else { "no" });
            println!("Card: {}", details.masked_number());
            for (field, key) in errors.iter() {
                println!("{}: {}", translations.label(field), translations.message(key));
            }
        }
        OutputFormat::Json => {
            let messages: serde_json::Map<String, serde_json::Value> = errors
                .iter()
                .map(|(field, key)| (field.key().to_string(), translations.message(key).into()))
                .collect();
            let report = serde_json::json!({
                "valid": errors.is_empty(),
                "card": details.masked_number(),
                "errors": errors,
                "messages": messages,
            });
            println!("{:#}", report);
        }
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }
}

async fn cmd_tokenize(card: &CardArgs, api_key: Option<String>, endpoint: Option<String>) {
    let config = match api_key {
        Some(key) => Ok(TokenClientConfig::new(key)),
        None => TokenClientConfig::from_env(),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {} (pass --api-key or set {})", e, API_KEY_ENV);
            std::process::exit(1);
        }
    };
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }

    let client = match TokenClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut form = PaymentForm::new(client);
    form.edit(Field::CardNumber, &card.number);
    form.edit(Field::ExpiryDate, &card.expiry);
    form.edit(Field::Cvv, &card.cvv);

    match form.submit().await {
        Ok(Some(token)) => match serde_json::to_string_pretty(&token) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Ok(None) => {
            for field in Field::ALL {
                if let Some(message) = form.error_message(field) {
                    eprintln!("{}: {}", form.translations().label(field), message);
                }
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
