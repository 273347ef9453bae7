//! Fuzz target for input filters and validators.
//!
//! Every filter must be idempotent and its output must satisfy the
//! matching correctness validator.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use card_form::{CardType, Filter, Validator};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    card_type: u8,
    text: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let card_type = CardType::ALL.get(input.card_type as usize).copied();

    for (filter, validator) in [
        (Filter::card_number(card_type), Validator::card_number(card_type)),
        (Filter::cvv(card_type), Validator::cvv(card_type)),
    ] {
        let once = filter.apply(input.text);
        assert_eq!(filter.apply(&once), once);
        assert!(validator.is_valid(&once));
    }

    let expiry = Filter::expiry_date();
    let once = expiry.apply(input.text);
    assert_eq!(expiry.apply(&once), once);
});
