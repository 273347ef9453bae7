//! Card type detection from the number typed so far.
//!
//! Detection runs on every keystroke, so it must work on partial numbers:
//! a type is reported as soon as the prefix identifies it, and the rest of
//! the input may be any digits. Input containing anything other than ASCII
//! digits never matches.
//!
//! # Performance
//!
//! Detection is O(n) in the digit check and O(1) in the prefix match.

use crate::CardType;

/// Detects the card type of a raw card number.
///
/// Types are tried in declaration order (Visa, Mastercard, Amex); the
/// first whose prefix rule matches the whole input wins.
///
/// | Type | Prefix |
/// |------|--------|
/// | Visa | 4 |
/// | Mastercard | 51-55, 2221-2720 |
/// | American Express | 34, 37 |
///
/// # Example
///
/// ```
/// use card_form::detect::detect_card_type;
/// use card_form::CardType;
///
/// assert_eq!(detect_card_type("4"), Some(CardType::Visa));
/// assert_eq!(detect_card_type("2720"), Some(CardType::MasterCard));
/// assert_eq!(detect_card_type("2721"), None);
/// assert_eq!(detect_card_type("37"), Some(CardType::Amex));
/// assert_eq!(detect_card_type(""), None);
/// ```
#[inline]
pub fn detect_card_type(number: &str) -> Option<CardType> {
    let bytes = number.as_bytes();
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    match bytes {
        // Visa: starts with 4
        [b'4', ..] => Some(CardType::Visa),

        // Mastercard: 51-55 or 2221-2720
        [b'5', b'1'..=b'5', ..] => Some(CardType::MasterCard),
        [b'2', b'2', b'2', b'1'..=b'9', ..] => Some(CardType::MasterCard), // 2221-2229
        [b'2', b'2', b'3'..=b'9', ..] => Some(CardType::MasterCard), // 2230-2299
        [b'2', b'3'..=b'6', ..] => Some(CardType::MasterCard), // 2300-2699
        [b'2', b'7', b'0'..=b'1', ..] => Some(CardType::MasterCard), // 2700-2719
        [b'2', b'7', b'2', b'0', ..] => Some(CardType::MasterCard), // 2720

        // American Express: 34 or 37
        [b'3', b'4' | b'7', ..] => Some(CardType::Amex),

        _ => None,
    }
}
