//! # card_form
//!
//! Payment card entry engine: live input filtering, validation and
//! cursor-safe display formatting for a card number, expiry date and
//! security code, plus submission of the completed form for verification.
//!
//! ## Features
//!
//! - Card type detection while typing (Visa, MasterCard, American Express)
//! - Per-field filters that absorb malformed keystrokes
//! - Completion and correctness validators, re-evaluated on every read
//! - Block formatting with separators and a bidirectional cursor mapping
//! - `MM/YY` expiry display with leading-zero insertion and a placeholder hint
//! - Async verification request with a loading flag and outcome events
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use card_form::expiry::{FixedClock, YearMonth};
//! use card_form::{CardType, PaymentCardForm};
//!
//! let clock = Arc::new(FixedClock(YearMonth::new(22, 9).unwrap()));
//! let mut form = PaymentCardForm::with_clock(clock);
//!
//! form.set_number("4242 4242 4242 4242");
//! form.set_expiry("930");
//! form.set_cvv("123");
//!
//! assert_eq!(form.card_type(), Some(CardType::Visa));
//! assert!(form.is_valid());
//!
//! // Debug output never shows the full number
//! println!("{:?}", form);
//! ```
//!
//! ## Display Formatting
//!
//! ```rust
//! use card_form::{BlockOffsetMapping, OffsetMapping};
//!
//! let mapping = BlockOffsetMapping::new(&[4, 6, 5], ' ');
//! assert_eq!(mapping.render("378282246310005"), "3782 822463 10005");
//!
//! // Cursor after the 5th digit sits after the first space
//! assert_eq!(mapping.raw_to_display(5), 6);
//! assert_eq!(mapping.display_to_raw(6), 5);
//! ```
//!
//! ## Filters and Validators
//!
//! ```rust
//! use card_form::{CardType, Filter, Validator};
//!
//! let filter = Filter::cvv(Some(CardType::Visa));
//! assert_eq!(filter.apply("1a2b34"), "123");
//!
//! let complete = Validator::cvv_complete(Some(CardType::Amex));
//! assert!(!complete.is_valid("123"));
//! assert!(complete.is_valid("1234"));
//! ```
//!
//! ## Supported Card Types
//!
//! | Type | Prefix | Blocks | CVV |
//! |------|--------|--------|-----|
//! | Visa | 4 | 4-4-4-4 | 3 |
//! | MasterCard | 51-55, 2221-2720 | 4-4-4-4 | 3 |
//! | American Express | 34, 37 | 4-6-5 | 4 |
//! | (undetermined) | | 4-4-4-4 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `http` | reqwest-backed checkout service |
//! | `cli` | Command-line tool |
//!
//! ## Security
//!
//! - Field values are zeroized when overwritten or dropped
//! - `Debug` on forms, fields and requests shows masked values only
//! - Submission logs never include card data
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod checkout;
pub mod config;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod field;
pub mod filter;
pub mod form;
#[cfg(feature = "http")]
pub mod http;
pub mod mask;
pub mod request;
pub mod transform;
pub mod validate;

// Re-export main types at crate root
pub use card::CardType;
pub use checkout::{CheckoutEvent, CheckoutFeature, CheckoutService};
pub use config::CheckoutConfig;
pub use detect::detect_card_type;
pub use error::{CheckoutError, ConfigError};
pub use field::{FieldRules, InputField};
pub use filter::Filter;
pub use form::PaymentCardForm;
pub use request::{VerificationRequest, VerificationUrl};
pub use transform::{BlockOffsetMapping, OffsetMapping, TransformedText, Transformation};
pub use validate::Validator;

#[cfg(feature = "http")]
pub use http::HttpCheckoutService;
