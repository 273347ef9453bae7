//! A single form input: raw value plus the rules that judge it.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroize;

use crate::card::CardType;
use crate::expiry::Clock;
use crate::filter::Filter;
use crate::validate::Validator;

/// The filter and validators that apply to one field.
///
/// Rules may depend on the detected card type; the owning form replaces
/// them whenever that type changes.
#[derive(Debug, Clone)]
pub struct FieldRules {
    /// Normalizes input before storage and on every read.
    pub filter: Filter,
    /// Passes once enough characters are present.
    pub completion: Validator,
    /// Passes while the content is acceptable, complete or not.
    pub correctness: Validator,
}

impl FieldRules {
    /// Rules for the card number field.
    pub fn card_number(card_type: Option<CardType>) -> Self {
        Self {
            filter: Filter::card_number(card_type),
            completion: Validator::card_number_complete(card_type),
            correctness: Validator::card_number(card_type),
        }
    }

    /// Rules for the security code field.
    pub fn cvv(card_type: Option<CardType>) -> Self {
        Self {
            filter: Filter::cvv(card_type),
            completion: Validator::cvv_complete(card_type),
            correctness: Validator::cvv(card_type),
        }
    }

    /// Rules for the expiry date field, judged against `clock`.
    pub fn expiry_date(clock: Arc<dyn Clock>) -> Self {
        Self {
            filter: Filter::expiry_date(),
            completion: Validator::expiry_complete(),
            correctness: Validator::expiry_date(clock),
        }
    }
}

/// Form field state.
///
/// The stored value is filtered on every write. Reads filter again with
/// the rules current at read time, so a value written under looser rules
/// (a 4-digit Amex CVV) reads back clipped under stricter ones (Visa), and
/// comes back whole if the looser rules return.
pub struct InputField {
    value: String,
    rules: FieldRules,
}

impl InputField {
    /// Creates an empty field.
    pub fn new(rules: FieldRules) -> Self {
        Self {
            value: String::new(),
            rules,
        }
    }

    /// Creates a field holding `initial`, filtered.
    pub fn with_value(initial: &str, rules: FieldRules) -> Self {
        let mut field = Self::new(rules);
        field.set_value(initial);
        field
    }

    /// Stores user input after running it through the field's filter.
    pub fn set_value(&mut self, input: &str) {
        let filtered = self.rules.filter.apply(input);
        self.value.zeroize();
        self.value = filtered;
    }

    /// The value as the display layer should show it.
    pub fn value(&self) -> String {
        self.rules.filter.apply(&self.value)
    }

    /// The value as stored by the last write.
    #[inline]
    pub fn stored_value(&self) -> &str {
        &self.value
    }

    /// True once the field holds enough characters.
    pub fn is_complete(&self) -> bool {
        self.rules.completion.is_valid(&self.value())
    }

    /// True if the content is acceptable so far, regardless of completion.
    ///
    /// Drives the error state while the user is still typing.
    pub fn is_input_valid(&self) -> bool {
        self.rules.correctness.is_valid(&self.value())
    }

    /// True if the field is complete and its content is acceptable.
    pub fn is_valid_and_complete(&self) -> bool {
        let value = self.value();
        self.rules.completion.is_valid(&value) && self.rules.correctness.is_valid(&value)
    }

    /// Returns the rules currently in force.
    #[inline]
    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    /// Swaps the rules without touching the stored value.
    pub(crate) fn set_rules(&mut self, rules: FieldRules) {
        self.rules = rules;
    }
}

impl fmt::Debug for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Length only, the value may be card data
        f.debug_struct("InputField")
            .field("length", &self.value.chars().count())
            .field("complete", &self.is_complete())
            .field("input_valid", &self.is_input_valid())
            .finish()
    }
}

impl Drop for InputField {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}
