//! Field validators.
//!
//! Validators are pure predicates over a field's filtered value. Each field
//! uses two of them: a completion validator (enough characters typed) and a
//! correctness validator (what was typed is acceptable so far).
//!
//! No Luhn checksum is applied to card numbers: correctness only checks the
//! alphabet and length.
//!
//! # Example
//!
//! ```
//! use card_form::validate::{and, Validator};
//!
//! let validator = and(Validator::DigitsOnly, Validator::MaxLength(3));
//! assert!(validator.is_valid("12"));
//! assert!(!validator.is_valid("1234"));
//! assert!(!validator.is_valid("1a"));
//! ```

use std::sync::Arc;

use crate::card::{self, CardType};
use crate::expiry::{expiry_length_cap, is_expiry_input_valid, Clock};

/// A pure `&str -> bool` check.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Length is exactly `n` characters.
    ExactLength(usize),
    /// Length is at most `n` characters.
    MaxLength(usize),
    /// Every character is `0-9`. The empty string passes.
    DigitsOnly,
    /// Length has reached [`expiry_length_cap`].
    ExpiryComplete,
    /// Expiry digits are unfinished, or form a month no earlier than the
    /// clock's current month.
    ExpiryDate(Arc<dyn Clock>),
    /// Both validators pass.
    And(Box<Validator>, Box<Validator>),
}

impl Validator {
    /// Checks `value` against this validator.
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            Self::ExactLength(n) => value.chars().count() == *n,
            Self::MaxLength(n) => value.chars().count() <= *n,
            Self::DigitsOnly => value.chars().all(|c| c.is_ascii_digit()),
            Self::ExpiryComplete => value.chars().count() == expiry_length_cap(value),
            Self::ExpiryDate(clock) => is_expiry_input_valid(value, clock.today()),
            Self::And(first, second) => first.is_valid(value) && second.is_valid(value),
        }
    }

    /// Requires `other` to pass as well.
    #[inline]
    pub fn and(self, other: Validator) -> Validator {
        and(self, other)
    }

    /// Card number completion: exactly the type's number length.
    pub fn card_number_complete(card_type: Option<CardType>) -> Validator {
        Self::ExactLength(card::number_length(card_type))
    }

    /// Card number correctness: digits only, at most the type's number length.
    pub fn card_number(card_type: Option<CardType>) -> Validator {
        Self::DigitsOnly.and(Self::MaxLength(card::number_length(card_type)))
    }

    /// Security code completion: exactly the type's CVV length.
    pub fn cvv_complete(card_type: Option<CardType>) -> Validator {
        Self::ExactLength(card::cvv_length(card_type))
    }

    /// Security code correctness: digits only, at most the type's CVV length.
    pub fn cvv(card_type: Option<CardType>) -> Validator {
        Self::DigitsOnly.and(Self::MaxLength(card::cvv_length(card_type)))
    }

    /// Expiry completion: 4 digits for a two-digit month, 3 otherwise.
    pub fn expiry_complete() -> Validator {
        Self::ExpiryComplete
    }

    /// Expiry correctness against `clock`.
    pub fn expiry_date(clock: Arc<dyn Clock>) -> Validator {
        Self::ExpiryDate(clock)
    }
}

/// Combines two validators with logical AND.
#[inline]
pub fn and(first: Validator, second: Validator) -> Validator {
    Validator::And(Box::new(first), Box::new(second))
}
