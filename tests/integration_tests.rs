//! Integration tests for card_form.
//!
//! These tests drive the form the way a UI would: one keystroke at a time,
//! checking what is displayed, where the cursor lands and when the form
//! becomes submittable.

use std::sync::Arc;

use card_form::expiry::{FixedClock, YearMonth};
use card_form::transform::{card_number_transformation, ExpiryDateTransformation};
use card_form::{
    detect_card_type, BlockOffsetMapping, CardType, FieldRules, Filter, InputField,
    OffsetMapping, PaymentCardForm, Transformation, Validator,
};

// =============================================================================
// TEST CARD NUMBERS
// =============================================================================
// Published test numbers from payment processors. Not real cards.

mod test_cards {
    pub const VISA_1: &str = "4242424242424242";
    pub const VISA_2: &str = "4000056655665556";

    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    // Mastercard 2-series
    pub const MC_2SERIES_1: &str = "2223003122003222";
    pub const MC_2SERIES_2: &str = "2720992720992724";

    pub const AMEX_1: &str = "378282246310005";
    pub const AMEX_2: &str = "371449635398431";
    pub const AMEX_3: &str = "340000000000009";

    // Networks the form does not recognise
    pub const DISCOVER: &str = "6011111111111117";
    pub const JCB: &str = "3530111333300000";
}

use test_cards::*;

fn today() -> YearMonth {
    YearMonth::new(22, 9).unwrap()
}

fn form() -> PaymentCardForm {
    PaymentCardForm::with_clock(Arc::new(FixedClock(today())))
}

/// Feeds `text` into `set` one character at a time, as a text field would.
fn type_into(text: &str, mut set: impl FnMut(&str)) {
    let mut typed = String::new();
    for c in text.chars() {
        typed.push(c);
        set(&typed);
    }
}

// =============================================================================
// DETECTION
// =============================================================================

#[test]
fn test_detect_published_test_cards() {
    for card in [VISA_1, VISA_2] {
        assert_eq!(detect_card_type(card), Some(CardType::Visa), "{}", card);
    }
    for card in [MC_1, MC_2, MC_2SERIES_1, MC_2SERIES_2] {
        assert_eq!(detect_card_type(card), Some(CardType::MasterCard), "{}", card);
    }
    for card in [AMEX_1, AMEX_2, AMEX_3] {
        assert_eq!(detect_card_type(card), Some(CardType::Amex), "{}", card);
    }
    for card in [DISCOVER, JCB] {
        assert_eq!(detect_card_type(card), None, "{}", card);
    }
}

#[test]
fn test_mastercard_two_series_boundaries() {
    assert_eq!(detect_card_type("2220"), None);
    assert_eq!(detect_card_type("2221"), Some(CardType::MasterCard));
    assert_eq!(detect_card_type("2720"), Some(CardType::MasterCard));
    assert_eq!(detect_card_type("2721"), None);
}

#[test]
fn test_detection_rejects_separators() {
    assert_eq!(detect_card_type("4242 4242"), None);
    assert_eq!(detect_card_type("37-82"), None);
}

// =============================================================================
// TYPING THE CARD NUMBER
// =============================================================================

#[test]
fn test_typing_amex_number() {
    let mut form = form();
    let mut shown = Vec::new();
    type_into(AMEX_1, |typed| {
        form.set_number(typed);
        shown.push(form.number_display().text().to_string());
    });

    assert_eq!(shown[0], "3");
    assert_eq!(shown[3], "3782 ");
    assert_eq!(shown[9], "3782 822463 ");
    assert_eq!(shown[14], "3782 822463 10005");
    assert_eq!(form.card_type(), Some(CardType::Amex));
    assert!(form.number().is_valid_and_complete());
}

#[test]
fn test_typing_past_full_length_is_ignored() {
    let mut form = form();
    form.set_number(VISA_1);
    form.set_number(&format!("{}9", VISA_1));
    assert_eq!(form.number().value(), VISA_1);
    assert_eq!(form.number_display().text(), "4242 4242 4242 4242");
}

#[test]
fn test_pasted_number_with_separators() {
    let mut form = form();
    form.set_number("5555-5555 5555.4444");
    assert_eq!(form.number().value(), MC_1);
    assert_eq!(form.card_type(), Some(CardType::MasterCard));
}

#[test]
fn test_switching_type_reformats_number() {
    let mut form = form();
    form.set_number("4111111111");
    assert_eq!(form.number_display().text(), "4111 1111 11");

    form.set_number("3411111111");
    assert_eq!(form.card_type(), Some(CardType::Amex));
    assert_eq!(form.number_display().text(), "3411 111111 ");
}

#[test]
fn test_cursor_follows_separators() {
    let mut form = form();
    form.set_number(VISA_1);
    let shown = form.number_display();

    assert_eq!(shown.raw_to_display(0), 0);
    assert_eq!(shown.raw_to_display(4), 5);
    assert_eq!(shown.raw_to_display(16), 19);
    for raw in 0..=16 {
        assert_eq!(shown.display_to_raw(shown.raw_to_display(raw)), raw);
    }
}

// =============================================================================
// EXPIRY
// =============================================================================

#[test]
fn test_typing_one_digit_month() {
    let mut form = form();
    let mut shown = Vec::new();
    type_into("930", |typed| {
        form.set_expiry(typed);
        shown.push(form.expiry_display().text().to_string());
    });

    assert_eq!(shown, ["09/YY", "09/3Y", "09/30"]);
    assert!(form.expiry().is_valid_and_complete());
}

#[test]
fn test_typing_two_digit_month() {
    let mut form = form();
    let mut shown = Vec::new();
    type_into("1225", |typed| {
        form.set_expiry(typed);
        shown.push(form.expiry_display().text().to_string());
    });

    assert_eq!(shown, ["1M/YY", "12/YY", "12/2Y", "12/25"]);
    assert!(form.expiry().is_valid_and_complete());
}

#[test]
fn test_expiry_extra_digits_dropped() {
    let mut form = form();
    form.set_expiry("93012");
    assert_eq!(form.expiry().value(), "930");
    form.set_expiry("093012");
    assert_eq!(form.expiry().value(), "0930");
}

#[test]
fn test_expiry_current_month_accepted() {
    let mut form = form();
    form.set_expiry("0922");
    assert!(form.expiry().is_input_valid());
    form.set_expiry("0822");
    assert!(!form.expiry().is_input_valid());
    form.set_expiry("1321");
    assert!(!form.expiry().is_input_valid());
    form.set_expiry("0030");
    assert!(!form.expiry().is_input_valid());
}

#[test]
fn test_expiry_cursor_mapping() {
    let shown = ExpiryDateTransformation::new().transform("930");
    assert_eq!(shown.text(), "09/30");
    assert_eq!(shown.raw_to_display(0), 0);
    assert_eq!(shown.raw_to_display(1), 2);
    assert_eq!(shown.raw_to_display(3), 5);
    assert_eq!(shown.display_to_raw(2), 1);
    assert_eq!(shown.display_to_raw(5), 3);
    assert_eq!(shown.display_to_raw(1), 0);
}

// =============================================================================
// SECURITY CODE
// =============================================================================

#[test]
fn test_cvv_length_tracks_card_type() {
    let mut form = form();
    form.set_number(AMEX_1);
    form.set_cvv("1234");
    assert!(form.cvv().is_valid_and_complete());

    form.set_number(VISA_1);
    assert_eq!(form.cvv().value(), "123");
    assert!(form.cvv().is_valid_and_complete());

    form.set_number(AMEX_2);
    assert_eq!(form.cvv().value(), "1234");
}

#[test]
fn test_cvv_display_unchanged() {
    let mut form = form();
    form.set_cvv("12");
    let shown = form.cvv_display();
    assert_eq!(shown.text(), "12");
    assert_eq!(shown.raw_to_display(2), 2);
    assert_eq!(shown.hint(), "");
}

// =============================================================================
// WHOLE FORM
// =============================================================================

#[test]
fn test_form_becomes_valid_on_last_keystroke() {
    let mut form = form();
    form.set_number(MC_2);
    form.set_expiry("12/29");
    form.set_cvv("32");
    assert!(!form.is_valid());

    form.set_cvv("321");
    assert!(form.is_valid());
}

#[test]
fn test_unknown_network_uses_default_rules() {
    let mut form = form();
    form.set_number(DISCOVER);
    form.set_expiry("1230");
    form.set_cvv("123");
    assert_eq!(form.card_type(), None);
    assert!(form.is_valid());
    assert_eq!(form.number_display().text(), "6011 1111 1111 1117");
}

#[test]
fn test_luhn_is_not_checked() {
    let mut form = form();
    form.set_number("4242424242424241");
    form.set_expiry("1230");
    form.set_cvv("123");
    assert!(form.is_valid());
}

#[test]
fn test_request_from_valid_form() {
    let mut form = form();
    form.set_number(AMEX_3);
    form.set_expiry("0130");
    form.set_cvv("0042");

    let request = form.to_request("https://ok", "https://ko").unwrap();
    assert_eq!(request.number, AMEX_3);
    assert_eq!(request.expiry_month, 1);
    assert_eq!(request.expiry_year, 30);
    assert_eq!(request.cvv, 42);
}

// =============================================================================
// BUILDING BLOCKS
// =============================================================================

#[test]
fn test_custom_field_rules() {
    let rules = FieldRules {
        filter: Filter::DigitsOnly.then(Filter::MaxLength(6)),
        completion: Validator::ExactLength(6),
        correctness: Validator::DigitsOnly,
    };
    let mut field = InputField::new(rules);
    field.set_value("12 34 56 78");
    assert_eq!(field.value(), "123456");
    assert!(field.is_valid_and_complete());
}

#[test]
fn test_word_blocks() {
    let mapping = BlockOffsetMapping::new(&[5, 3, 4, 5], ' ');
    assert_eq!(mapping.render("thesearesom"), "these are som");
    assert_eq!(mapping.render("thesearesomewords"), "these are some words");
    assert_eq!(mapping.raw_to_display(5), 6);
    assert_eq!(mapping.raw_to_display(17), 20);
    assert_eq!(mapping.display_to_raw(6), 5);
}

#[test]
fn test_empty_block_plan_is_identity() {
    let mapping = BlockOffsetMapping::new(&[], ' ');
    assert_eq!(mapping.render("anything"), "anything");
    for offset in [0, 3, 235] {
        assert_eq!(mapping.raw_to_display(offset), offset);
        assert_eq!(mapping.display_to_raw(offset), offset);
    }
}

#[test]
fn test_card_number_transformation_overflow() {
    let shown = card_number_transformation(None).transform("12345678901234567890");
    assert_eq!(shown.text(), "1234 5678 9012 34567890");
}
