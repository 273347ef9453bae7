//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_form::expiry::{self, ExpiryDate, YearMonth};
use card_form::transform::{ExpiryDateTransformation, Transformation};

fuzz_target!(|data: &str| {
    let today = YearMonth::new(22, 9).unwrap();

    // These should never panic
    let _ = ExpiryDate::parse_mmyy(data);
    let _ = expiry::validate_expiry(data, today);
    let _ = expiry::is_expiry_input_valid(data, today);
    let _ = expiry::expiry_length_cap(data);

    // If parsing succeeds, test other methods
    if let Ok(exp) = ExpiryDate::parse_mmyy(data) {
        assert!((1..=12).contains(&exp.month()));
        let _ = exp.is_expired_at(today);
        let _ = exp.format_short();
        let _ = exp.to_string();
    }

    let shown = ExpiryDateTransformation::new().transform(data);
    let _ = shown.formatted();
    let _ = shown.hint();
    for offset in 0..=data.chars().count() {
        let display = shown.raw_to_display(offset);
        let _ = shown.display_to_raw(display);
    }
});
