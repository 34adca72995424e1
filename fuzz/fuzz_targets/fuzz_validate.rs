//! Fuzz target for form validation.
//!
//! Tests that validation never panics and that untouched fields never
//! report errors.

#![no_main]

use arbitrary::Arbitrary;
use card_form::{
    is_form_valid, validate_card_details, validate_card_number, CardDetails, TouchedFields,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    card_number: String,
    expiry_date: String,
    cvv: String,
    touched: [bool; 3],
}

fuzz_target!(|input: Input| {
    let _ = validate_card_number(&input.card_number);

    let details = CardDetails::new(input.card_number, input.expiry_date, input.cvv);
    let touched = TouchedFields {
        card_number: input.touched[0],
        expiry_date: input.touched[1],
        cvv: input.touched[2],
    };

    let errors = validate_card_details(&details, &touched);
    for (field, _) in errors.iter() {
        assert!(touched.get(field), "Untouched field {} reported an error", field);
    }

    let _ = is_form_valid(&details, &errors);
    let _ = format!("{:?}", details);
});
