//! Masking for card data that ends up in logs or `Debug` output.
//!
//! PCI-DSS allows displaying at most the last 4 digits of a card number
//! to the customer; security codes are never shown. Everything in this
//! crate that may be printed (`Debug` impls, tracing fields, CLI output)
//! goes through these helpers.

/// Masks a card number showing only the last 4 digits.
///
/// Format: `****-****-****-1234`. Numbers of 4 digits or fewer, as seen
/// while the user is still typing, are masked completely.
///
/// # Example
///
/// ```
/// use card_form::mask::mask_number;
///
/// assert_eq!(mask_number("4242424242424242"), "****-****-****-4242");
/// assert_eq!(mask_number("424"), "***");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + (len / 4));

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[len - 4..]);
    result
}

/// Masks every character of a secret such as a CVV.
///
/// # Example
///
/// ```
/// use card_form::mask::mask_secret;
///
/// assert_eq!(mask_secret("1234"), "****");
/// ```
#[inline]
pub fn mask_secret(input: &str) -> String {
    "*".repeat(input.chars().count())
}
