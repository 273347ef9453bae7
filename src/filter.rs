//! Input filters applied to every keystroke before a value is stored.
//!
//! A filter normalizes raw input: it strips characters the field never
//! accepts and clips the text to the field's maximum length. Filters
//! change the stored data; display formatting lives in [`crate::transform`].
//!
//! # Example
//!
//! ```
//! use card_form::filter::{compose, Filter};
//!
//! let filter = compose(Filter::DigitsOnly, Filter::MaxLength(4));
//! assert_eq!(filter.apply("12-34-56"), "1234");
//! ```

use crate::card::{self, CardType};
use crate::expiry::expiry_length_cap;

/// A pure `&str -> String` normalization step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    /// Leaves the input untouched.
    #[default]
    Identity,
    /// Removes every character outside `0-9`.
    DigitsOnly,
    /// Keeps at most the first `n` characters.
    MaxLength(usize),
    /// Keeps at most [`expiry_length_cap`] characters of the input.
    ExpiryLength,
    /// Applies the first filter, then the second to its result.
    Compose(Box<Filter>, Box<Filter>),
}

impl Filter {
    /// Runs the filter over `input`.
    pub fn apply(&self, input: &str) -> String {
        match self {
            Self::Identity => input.to_string(),
            Self::DigitsOnly => input.chars().filter(|c| c.is_ascii_digit()).collect(),
            Self::MaxLength(n) => input.chars().take(*n).collect(),
            Self::ExpiryLength => input.chars().take(expiry_length_cap(input)).collect(),
            Self::Compose(first, second) => second.apply(&first.apply(input)),
        }
    }

    /// Chains `next` after this filter.
    #[inline]
    pub fn then(self, next: Filter) -> Filter {
        compose(self, next)
    }

    /// Card number filter: digits only, clipped to the type's number length.
    pub fn card_number(card_type: Option<CardType>) -> Filter {
        Self::DigitsOnly.then(Self::MaxLength(card::number_length(card_type)))
    }

    /// Security code filter: digits only, clipped to the type's CVV length.
    pub fn cvv(card_type: Option<CardType>) -> Filter {
        Self::DigitsOnly.then(Self::MaxLength(card::cvv_length(card_type)))
    }

    /// Expiry filter: digits only, clipped to 4 for a two-digit month and
    /// 3 otherwise.
    pub fn expiry_date() -> Filter {
        Self::DigitsOnly.then(Self::ExpiryLength)
    }
}

/// Composes two filters left to right.
#[inline]
pub fn compose(first: Filter, second: Filter) -> Filter {
    Filter::Compose(Box::new(first), Box::new(second))
}
