//! The verification request sent once the form is complete.
//!
//! Field names on the wire are fixed:
//!
//! ```json
//! {
//!   "number": "4242424242424242",
//!   "expiry_month": 9,
//!   "expiry_year": 30,
//!   "cvv": 123,
//!   "success_url": "https://shop.example/success",
//!   "failure_url": "https://shop.example/failure"
//! }
//! ```
//!
//! The response is `{"url": "..."}`, the page the user must visit to
//! confirm the payment.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::expiry::ExpiryDate;
use crate::form::PaymentCardForm;
use crate::mask::{mask_number, mask_secret};

/// Card details plus redirect targets, ready for the checkout endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct VerificationRequest {
    /// Card number digits.
    pub number: String,
    /// Expiry month (1-12).
    pub expiry_month: u8,
    /// Two-digit expiry year.
    pub expiry_year: u8,
    /// Security code as an integer.
    pub cvv: u32,
    /// Where the verification page sends the user on success.
    pub success_url: String,
    /// Where the verification page sends the user on failure.
    pub failure_url: String,
}

impl VerificationRequest {
    /// Builds a request from a form.
    ///
    /// Returns `None` unless the form is valid. The validity check runs
    /// before any parsing, so a valid form always yields a request.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use card_form::expiry::{FixedClock, YearMonth};
    /// use card_form::{PaymentCardForm, VerificationRequest};
    ///
    /// let clock = Arc::new(FixedClock(YearMonth::new(22, 9).unwrap()));
    /// let mut form = PaymentCardForm::with_clock(clock);
    /// assert!(VerificationRequest::from_form(&form, "ok", "ko").is_none());
    ///
    /// form.set_number("4242424242424242");
    /// form.set_expiry("930");
    /// form.set_cvv("123");
    /// let request = VerificationRequest::from_form(&form, "ok", "ko").unwrap();
    /// assert_eq!(request.expiry_month, 9);
    /// assert_eq!(request.expiry_year, 30);
    /// assert_eq!(request.cvv, 123);
    /// ```
    pub fn from_form(form: &PaymentCardForm, success_url: &str, failure_url: &str) -> Option<Self> {
        if !form.is_valid() {
            return None;
        }

        let expiry = ExpiryDate::parse_mmyy(&form.expiry().value()).ok()?;
        let cvv = form.cvv().value().parse().ok()?;

        Some(Self {
            number: form.number().value(),
            expiry_month: expiry.month(),
            expiry_year: expiry.year(),
            cvv,
            success_url: success_url.to_string(),
            failure_url: failure_url.to_string(),
        })
    }
}

impl fmt::Debug for VerificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationRequest")
            .field("number", &mask_number(&self.number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &mask_secret(&self.cvv.to_string()))
            .field("success_url", &self.success_url)
            .field("failure_url", &self.failure_url)
            .finish()
    }
}

/// The checkout endpoint's answer: where to send the user next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationUrl {
    /// Verification page URL.
    pub url: String,
}

impl PaymentCardForm {
    /// Shorthand for [`VerificationRequest::from_form`].
    #[inline]
    pub fn to_request(&self, success_url: &str, failure_url: &str) -> Option<VerificationRequest> {
        VerificationRequest::from_form(self, success_url, failure_url)
    }
}
