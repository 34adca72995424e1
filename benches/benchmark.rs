//! Benchmarks for the form's per-keystroke and per-blur work.
//!
//! Run with: cargo bench

use card_form::{
    format, luhn, mask, validate_card_details, validate_card_number, CardDetails, Field,
    PaymentForm, TokenApiResponse, TokenError, Tokenizer, TouchedFields,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// Test card numbers
const VISA_16: &str = "4242424242424242";
const VISA_16_FORMATTED: &str = "4242 4242 4242 4242";
const MASTERCARD: &str = "5555555555554444";
const AMEX: &str = "378282246310005";

const VISA_DIGITS: [u8; 16] = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];

struct NoopTokenizer;

#[async_trait::async_trait]
impl Tokenizer for NoopTokenizer {
    async fn create_token(&self, _details: &CardDetails) -> Result<TokenApiResponse, TokenError> {
        Err(TokenError::Decode("not used".to_string()))
    }
}

/// Benchmark the input masks
fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");

    group.bench_function("card_number_raw", |b| {
        b.iter(|| format::format_card_number(black_box(VISA_16)))
    });

    group.bench_function("card_number_formatted", |b| {
        b.iter(|| format::format_card_number(black_box(VISA_16_FORMATTED)))
    });

    group.bench_function("expiry_date", |b| {
        b.iter(|| format::format_expiry_date(black_box("1230")))
    });

    group.bench_function("cvv", |b| b.iter(|| format::format_cvv(black_box("1234"))));

    group.finish();
}

/// Benchmark card number validation
fn bench_card_number(c: &mut Criterion) {
    let mut group = c.benchmark_group("card_number");

    for (name, number) in [
        ("visa_16", VISA_16),
        ("visa_16_formatted", VISA_16_FORMATTED),
        ("mastercard", MASTERCARD),
        ("amex_15", AMEX),
    ] {
        group.bench_with_input(BenchmarkId::new("validate", name), number, |b, number| {
            b.iter(|| validate_card_number(black_box(number)))
        });
    }

    group.bench_function("luhn_digits", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("mask", |b| {
        b.iter(|| mask::mask_string(black_box(VISA_16_FORMATTED)))
    });

    group.finish();
}

/// Benchmark validating the whole form
fn bench_card_details(c: &mut Criterion) {
    let mut group = c.benchmark_group("card_details");
    group.throughput(Throughput::Elements(3));

    let valid = CardDetails::new(VISA_16_FORMATTED, "12/99", "123");
    let invalid = CardDetails::new("4242 4242 4242 4241", "13/30", "12");
    let touched = TouchedFields::all();

    group.bench_function("valid", |b| {
        b.iter(|| validate_card_details(black_box(&valid), black_box(&touched)))
    });

    group.bench_function("invalid", |b| {
        b.iter(|| validate_card_details(black_box(&invalid), black_box(&touched)))
    });

    group.finish();
}

/// Benchmark a full typing session on the form controller
fn bench_form_session(c: &mut Criterion) {
    c.bench_function("form_session", |b| {
        b.iter(|| {
            let mut form = PaymentForm::new(NoopTokenizer);
            form.edit(Field::CardNumber, black_box(VISA_16));
            form.blur(Field::CardNumber);
            form.edit(Field::ExpiryDate, black_box("1299"));
            form.blur(Field::ExpiryDate);
            form.edit(Field::Cvv, black_box("123"));
            form.blur(Field::Cvv);
            form.fields().len()
        })
    });
}

criterion_group!(
    benches,
    bench_formatters,
    bench_card_number,
    bench_card_details,
    bench_form_session,
);

criterion_main!(benches);
