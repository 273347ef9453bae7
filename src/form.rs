//! The payment card form: number, expiry and CVV fields.
//!
//! The number field drives the rest. Every write to it re-detects the card
//! type and replaces the type-dependent rules of the number and CVV fields,
//! so the dependency is an explicit recomputation step rather than hidden
//! reactive state.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use card_form::expiry::{FixedClock, YearMonth};
//! use card_form::{CardType, PaymentCardForm};
//!
//! let clock = Arc::new(FixedClock(YearMonth::new(22, 9).unwrap()));
//! let mut form = PaymentCardForm::with_clock(clock);
//!
//! form.set_number("3782 822463 10005");
//! form.set_expiry("09/30");
//! form.set_cvv("1234");
//!
//! assert_eq!(form.card_type(), Some(CardType::Amex));
//! assert!(form.is_valid());
//! assert_eq!(form.number_display().text(), "3782 822463 10005");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::card::CardType;
use crate::detect::detect_card_type;
use crate::expiry::{Clock, SystemClock};
use crate::field::{FieldRules, InputField};
use crate::filter::Filter;
use crate::mask::{mask_number, mask_secret};
use crate::transform::{
    card_number_transformation, ExpiryDateTransformation, NoTransformation, Transformation,
    TransformedText,
};

/// Form state for one checkout session.
pub struct PaymentCardForm {
    number: InputField,
    expiry: InputField,
    cvv: InputField,
}

impl PaymentCardForm {
    /// Creates an empty form that checks expiry dates against the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty form that checks expiry dates against `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            number: InputField::new(FieldRules::card_number(None)),
            expiry: InputField::new(FieldRules::expiry_date(clock)),
            cvv: InputField::new(FieldRules::cvv(None)),
        }
    }

    /// Card type detected from the current number, if any.
    pub fn card_type(&self) -> Option<CardType> {
        detect_card_type(self.number.stored_value())
    }

    /// The card number field.
    #[inline]
    pub fn number(&self) -> &InputField {
        &self.number
    }

    /// The expiry date field.
    #[inline]
    pub fn expiry(&self) -> &InputField {
        &self.expiry
    }

    /// The security code field.
    #[inline]
    pub fn cvv(&self) -> &InputField {
        &self.cvv
    }

    /// Writes user input to the number field and updates dependent rules.
    pub fn set_number(&mut self, input: &str) {
        // The incoming digits decide the length cap the input is filtered with
        let incoming = detect_card_type(&Filter::DigitsOnly.apply(input));
        self.number.set_rules(FieldRules::card_number(incoming));
        self.number.set_value(input);
        self.refresh_card_rules();
    }

    /// Writes user input to the expiry field.
    pub fn set_expiry(&mut self, input: &str) {
        self.expiry.set_value(input);
    }

    /// Writes user input to the security code field.
    pub fn set_cvv(&mut self, input: &str) {
        self.cvv.set_value(input);
    }

    fn refresh_card_rules(&mut self) {
        let card_type = self.card_type();
        self.number.set_rules(FieldRules::card_number(card_type));
        self.cvv.set_rules(FieldRules::cvv(card_type));
    }

    /// True when all three fields are complete and acceptable.
    pub fn is_valid(&self) -> bool {
        self.number.is_valid_and_complete()
            && self.expiry.is_valid_and_complete()
            && self.cvv.is_valid_and_complete()
    }

    /// Card number as displayed, grouped by the detected type's blocks.
    pub fn number_display(&self) -> TransformedText {
        card_number_transformation(self.card_type()).transform(&self.number.value())
    }

    /// Expiry date as displayed, `MM/YY` with the untyped part as hint.
    pub fn expiry_display(&self) -> TransformedText {
        ExpiryDateTransformation::new().transform(&self.expiry.value())
    }

    /// Security code as displayed (unchanged).
    pub fn cvv_display(&self) -> TransformedText {
        NoTransformation.transform(&self.cvv.value())
    }
}

impl Default for PaymentCardForm {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PaymentCardForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentCardForm")
            .field("card_type", &self.card_type())
            .field("number", &mask_number(&self.number.value()))
            .field("expiry", &self.expiry.value())
            .field("cvv", &mask_secret(&self.cvv.value()))
            .field("valid", &self.is_valid())
            .finish()
    }
}
