//! Card networks supported by the entry form.
//!
//! Each [`CardType`] carries the block plan its number is conventionally
//! displayed in and the length of its security code. An undetermined type
//! (`None`) falls back to [`DEFAULT_NUMBER_BLOCKS`] and [`DEFAULT_CVV_LENGTH`].

use std::fmt;

/// Block plan used when no card type could be detected.
pub const DEFAULT_NUMBER_BLOCKS: &[usize] = &[4, 4, 4, 4];

/// Number length used when no card type could be detected.
pub const DEFAULT_NUMBER_LENGTH: usize = 16;

/// Security code length used when no card type could be detected.
pub const DEFAULT_CVV_LENGTH: usize = 3;

/// Card networks the form knows how to format and validate.
///
/// Declaration order is detection order, see [`crate::detect::detect_card_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardType {
    /// Visa - Prefix 4, blocks 4-4-4-4, CVV 3
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720, blocks 4-4-4-4, CVV 3
    MasterCard,
    /// American Express - Prefix 34, 37, blocks 4-6-5, CID 4
    Amex,
}

impl CardType {
    /// All supported types, in detection order.
    pub const ALL: [CardType; 3] = [CardType::Visa, CardType::MasterCard, CardType::Amex];

    /// Returns the blocks the card number is displayed in.
    #[inline]
    pub const fn number_blocks(&self) -> &'static [usize] {
        match self {
            Self::Visa | Self::MasterCard => &[4, 4, 4, 4],
            Self::Amex => &[4, 6, 5],
        }
    }

    /// Returns the full card number length (sum of the blocks).
    #[inline]
    pub const fn number_length(&self) -> usize {
        let blocks = self.number_blocks();
        let mut total = 0;
        let mut i = 0;
        while i < blocks.len() {
            total += blocks[i];
            i += 1;
        }
        total
    }

    /// Returns the security code length.
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }

    /// Returns a human-readable name for the card type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::MasterCard => "Mastercard",
            Self::Amex => "American Express",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Block plan for a possibly undetermined card type.
#[inline]
pub fn number_blocks(card_type: Option<CardType>) -> &'static [usize] {
    card_type.map_or(DEFAULT_NUMBER_BLOCKS, |t| t.number_blocks())
}

/// Number length for a possibly undetermined card type.
#[inline]
pub fn number_length(card_type: Option<CardType>) -> usize {
    card_type.map_or(DEFAULT_NUMBER_LENGTH, |t| t.number_length())
}

/// Security code length for a possibly undetermined card type.
#[inline]
pub fn cvv_length(card_type: Option<CardType>) -> usize {
    card_type.map_or(DEFAULT_CVV_LENGTH, |t| t.cvv_length())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_lengths() {
        assert_eq!(CardType::Visa.number_length(), 16);
        assert_eq!(CardType::MasterCard.number_length(), 16);
        assert_eq!(CardType::Amex.number_length(), 15);
    }

    #[test]
    fn test_cvv_lengths() {
        assert_eq!(CardType::Visa.cvv_length(), 3);
        assert_eq!(CardType::MasterCard.cvv_length(), 3);
        assert_eq!(CardType::Amex.cvv_length(), 4);
    }

    #[test]
    fn test_defaults_for_undetermined_type() {
        assert_eq!(number_blocks(None), &[4, 4, 4, 4]);
        assert_eq!(number_length(None), 16);
        assert_eq!(cvv_length(None), 3);
        assert_eq!(DEFAULT_NUMBER_BLOCKS.iter().sum::<usize>(), DEFAULT_NUMBER_LENGTH);
    }

    #[test]
    fn test_defaults_defer_to_type() {
        assert_eq!(number_blocks(Some(CardType::Amex)), &[4, 6, 5]);
        assert_eq!(number_length(Some(CardType::Amex)), 15);
        assert_eq!(cvv_length(Some(CardType::Amex)), 4);
    }

    #[test]
    fn test_card_type_names() {
        assert_eq!(CardType::Visa.name(), "Visa");
        assert_eq!(CardType::Amex.to_string(), "American Express");
        assert_eq!(CardType::MasterCard.to_string(), "Mastercard");
    }
}
