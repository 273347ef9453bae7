//! Expiry date semantics for the MM/YY field.
//!
//! The field stores digits only. The user may type a one-digit month
//! (`"925"` for September 2025) or a two-digit one (`"0925"`, `"1225"`);
//! whether a month is one or two digits is decided by the first character,
//! see [`expiry_length_cap`].
//!
//! # Example
//!
//! ```
//! use card_form::expiry::{ExpiryDate, YearMonth};
//!
//! let expiry = ExpiryDate::parse_mmyy("0930").unwrap();
//! assert_eq!(expiry.month(), 9);
//! assert_eq!(expiry.year(), 30);
//!
//! let today = YearMonth::new(22, 9).unwrap();
//! assert!(!expiry.is_expired_at(today));
//! ```

use chrono::Datelike;
use std::fmt;

/// Hint shown in place of the expiry digits not typed yet.
pub const EXPIRY_HINT: &str = "MM/YY";

/// Maximum number of digits the expiry field accepts for the given input.
///
/// Input starting with `0` or `1` is read as a two-digit month (`MMYY`),
/// anything else as a one-digit month (`MYY`).
///
/// # Example
///
/// ```
/// use card_form::expiry::expiry_length_cap;
///
/// assert_eq!(expiry_length_cap("1"), 4);
/// assert_eq!(expiry_length_cap("0"), 4);
/// assert_eq!(expiry_length_cap("9"), 3);
/// assert_eq!(expiry_length_cap(""), 3);
/// ```
#[inline]
pub fn expiry_length_cap(value: &str) -> usize {
    if starts_with_month_digit(value) {
        4
    } else {
        3
    }
}

/// True if the input opens with a character that can begin a two-digit month.
#[inline]
pub(crate) fn starts_with_month_digit(value: &str) -> bool {
    value.starts_with('0') || value.starts_with('1')
}

/// A calendar month with a two-digit year, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Two-digit year (0-99)
    year: u8,
    /// Month (1-12)
    month: u8,
}

impl YearMonth {
    /// Creates a year/month pair.
    ///
    /// Returns `None` if the month is not 1-12 or the year is not two digits.
    pub fn new(year: u8, month: u8) -> Option<Self> {
        if !(1..=12).contains(&month) || year > 99 {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the two-digit year.
    #[inline]
    pub const fn year(&self) -> u8 {
        self.year
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }
}

/// Source of the current month for expiry checks.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current year and month.
    fn today(&self) -> YearMonth;
}

/// Reads the current month from the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> YearMonth {
        let now = chrono::Local::now();
        YearMonth {
            year: now.year().rem_euclid(100) as u8,
            month: now.month() as u8,
        }
    }
}

/// A clock stuck on one month. Useful for tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub YearMonth);

impl Clock for FixedClock {
    fn today(&self) -> YearMonth {
        self.0
    }
}

/// A parsed expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryDate {
    /// Month (1-12)
    month: u8,
    /// Two-digit year (e.g., 25)
    year: u8,
}

impl ExpiryDate {
    /// Parses raw `MMYY` or `MYY` digits.
    ///
    /// The month is everything but the last two characters, the year is
    /// the last two.
    ///
    /// # Example
    ///
    /// ```
    /// use card_form::expiry::{ExpiryDate, ExpiryError};
    ///
    /// assert_eq!(ExpiryDate::parse_mmyy("925").unwrap().month(), 9);
    /// assert_eq!(ExpiryDate::parse_mmyy("1225").unwrap().month(), 12);
    /// assert_eq!(ExpiryDate::parse_mmyy("1325"), Err(ExpiryError::InvalidMonth(13)));
    /// ```
    pub fn parse_mmyy(text: &str) -> Result<Self, ExpiryError> {
        if text.is_empty() {
            return Err(ExpiryError::Empty);
        }
        if !(3..=4).contains(&text.len()) || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ExpiryError::InvalidFormat);
        }

        let (month_str, year_str) = text.split_at(text.len() - 2);
        let month: u8 = month_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;
        if !(1..=12).contains(&month) {
            return Err(ExpiryError::InvalidMonth(month));
        }
        let year: u8 = year_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;

        Ok(Self { month, year })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the two-digit year.
    #[inline]
    pub const fn year(&self) -> u8 {
        self.year
    }

    /// Returns true if the card expired before `today`.
    ///
    /// A card is still usable during its expiry month.
    pub fn is_expired_at(&self, today: YearMonth) -> bool {
        (self.year, self.month) < (today.year, today.month)
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_short())
    }
}

/// Errors that can occur during expiry date parsing/validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// The input string is empty.
    Empty,
    /// Not three or four digits.
    InvalidFormat,
    /// Month is out of range (must be 1-12).
    InvalidMonth(u8),
    /// The date lies before the current month.
    Expired {
        /// The expiry month.
        month: u8,
        /// The two-digit expiry year.
        year: u8,
    },
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "expiry date is empty"),
            Self::InvalidFormat => {
                write!(f, "invalid expiry format (expected MMYY or MYY digits)")
            }
            Self::InvalidMonth(m) => {
                write!(f, "invalid month {}: must be 1-12", m)
            }
            Self::Expired { month, year } => {
                write!(f, "card expired ({:02}/{:02})", month, year)
            }
        }
    }
}

impl std::error::Error for ExpiryError {}

/// Parses complete expiry digits and rejects dates before `today`.
pub fn validate_expiry(text: &str, today: YearMonth) -> Result<ExpiryDate, ExpiryError> {
    let expiry = ExpiryDate::parse_mmyy(text)?;
    if expiry.is_expired_at(today) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }
    Ok(expiry)
}

/// Correctness check for the expiry field while the user types.
///
/// Input shorter than [`expiry_length_cap`] has not been judged yet and is
/// reported valid. Once the cap is reached the digits must form a month
/// 1-12 and a date no earlier than `today`.
///
/// # Example
///
/// ```
/// use card_form::expiry::{is_expiry_input_valid, YearMonth};
///
/// let today = YearMonth::new(22, 9).unwrap();
/// assert!(is_expiry_input_valid("08", today)); // not finished yet
/// assert!(is_expiry_input_valid("0922", today));
/// assert!(!is_expiry_input_valid("0822", today));
/// assert!(!is_expiry_input_valid("1301", today));
/// ```
pub fn is_expiry_input_valid(value: &str, today: YearMonth) -> bool {
    if value.chars().count() < expiry_length_cap(value) {
        return true;
    }
    validate_expiry(value, today).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sept_22() -> YearMonth {
        YearMonth::new(22, 9).unwrap()
    }

    #[test]
    fn test_length_cap() {
        assert_eq!(expiry_length_cap("0"), 4);
        assert_eq!(expiry_length_cap("1"), 4);
        assert_eq!(expiry_length_cap("12"), 4);
        assert_eq!(expiry_length_cap("2"), 3);
        assert_eq!(expiry_length_cap("9"), 3);
        assert_eq!(expiry_length_cap(""), 3);
    }

    #[test]
    fn test_parse_two_digit_month() {
        let expiry = ExpiryDate::parse_mmyy("0930").unwrap();
        assert_eq!(expiry.month(), 9);
        assert_eq!(expiry.year(), 30);

        let expiry = ExpiryDate::parse_mmyy("1299").unwrap();
        assert_eq!(expiry.month(), 12);
        assert_eq!(expiry.year(), 99);
    }

    #[test]
    fn test_parse_one_digit_month() {
        let expiry = ExpiryDate::parse_mmyy("925").unwrap();
        assert_eq!(expiry.month(), 9);
        assert_eq!(expiry.year(), 25);
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(ExpiryDate::parse_mmyy("0025"), Err(ExpiryError::InvalidMonth(0)));
        assert_eq!(ExpiryDate::parse_mmyy("025"), Err(ExpiryError::InvalidMonth(0)));
        assert_eq!(ExpiryDate::parse_mmyy("1301"), Err(ExpiryError::InvalidMonth(13)));
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(ExpiryDate::parse_mmyy(""), Err(ExpiryError::Empty));
        assert_eq!(ExpiryDate::parse_mmyy("12"), Err(ExpiryError::InvalidFormat));
        assert_eq!(ExpiryDate::parse_mmyy("12345"), Err(ExpiryError::InvalidFormat));
        assert_eq!(ExpiryDate::parse_mmyy("12/5"), Err(ExpiryError::InvalidFormat));
        assert_eq!(ExpiryDate::parse_mmyy("ab12"), Err(ExpiryError::InvalidFormat));
    }

    #[test]
    fn test_expired_comparison() {
        let today = sept_22();
        assert!(!ExpiryDate::parse_mmyy("0922").unwrap().is_expired_at(today));
        assert!(!ExpiryDate::parse_mmyy("1022").unwrap().is_expired_at(today));
        assert!(!ExpiryDate::parse_mmyy("0123").unwrap().is_expired_at(today));
        assert!(ExpiryDate::parse_mmyy("0822").unwrap().is_expired_at(today));
        assert!(ExpiryDate::parse_mmyy("1221").unwrap().is_expired_at(today));
        assert!(ExpiryDate::parse_mmyy("0820").unwrap().is_expired_at(today));
    }

    #[test]
    fn test_validate_expiry_errors() {
        let today = sept_22();
        assert_eq!(
            validate_expiry("0820", today),
            Err(ExpiryError::Expired { month: 8, year: 20 })
        );
        assert!(validate_expiry("0930", today).is_ok());
    }

    #[test]
    fn test_state_machine_incomplete_is_valid() {
        let today = sept_22();
        assert!(is_expiry_input_valid("", today));
        assert!(is_expiry_input_valid("0", today));
        assert!(is_expiry_input_valid("13", today));
        assert!(is_expiry_input_valid("130", today));
        assert!(is_expiry_input_valid("92", today));
    }

    #[test]
    fn test_state_machine_complete() {
        let today = sept_22();
        assert!(is_expiry_input_valid("0922", today));
        assert!(is_expiry_input_valid("922", today));
        assert!(!is_expiry_input_valid("0820", today));
        assert!(!is_expiry_input_valid("1301", today));
        assert!(!is_expiry_input_valid("0022", today));
        assert!(!is_expiry_input_valid("821", today));
    }

    #[test]
    fn test_format() {
        let expiry = ExpiryDate::parse_mmyy("325").unwrap();
        assert_eq!(expiry.format_short(), "03/25");
        assert_eq!(expiry.to_string(), "03/25");
    }

    #[test]
    fn test_year_month_new() {
        assert!(YearMonth::new(25, 1).is_some());
        assert!(YearMonth::new(25, 12).is_some());
        assert!(YearMonth::new(25, 0).is_none());
        assert!(YearMonth::new(25, 13).is_none());
        assert!(YearMonth::new(100, 1).is_none());
    }

    #[test]
    fn test_year_month_ordering() {
        let a = YearMonth::new(22, 12).unwrap();
        let b = YearMonth::new(23, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(sept_22());
        assert_eq!(clock.today(), sept_22());
    }

    #[test]
    fn test_system_clock_is_sane() {
        let today = SystemClock.today();
        assert!((1..=12).contains(&today.month()));
        assert!(today.year() <= 99);
    }
}
