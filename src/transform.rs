//! Display transformations with cursor-safe offset mapping.
//!
//! The fields store raw digits only. What the user sees is a display string
//! with separators inserted between blocks (`"4242 4242 4242 4242"`,
//! `"09/25"`). Every transformation therefore comes with an
//! [`OffsetMapping`] that translates a cursor position between the raw and
//! the display string, so the caret lands where the user expects while
//! separators appear and disappear under it.
//!
//! Offsets are counted in characters, not bytes.
//!
//! # Example
//!
//! ```
//! use card_form::transform::{BlockOffsetMapping, OffsetMapping};
//!
//! let mapping = BlockOffsetMapping::new(&[4, 4, 4, 4], ' ');
//! assert_eq!(mapping.render("42424242"), "4242 4242 ");
//! assert_eq!(mapping.raw_to_display(5), 6);
//! assert_eq!(mapping.display_to_raw(6), 5);
//! ```

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::card::{self, CardType};
use crate::expiry::{starts_with_month_digit, EXPIRY_HINT};

/// Translates cursor offsets between raw and display coordinates.
pub trait OffsetMapping {
    /// Maps an offset in the raw text to the display text.
    fn raw_to_display(&self, offset: usize) -> usize;

    /// Maps an offset in the display text back to the raw text.
    fn display_to_raw(&self, offset: usize) -> usize;
}

impl<T: OffsetMapping + ?Sized> OffsetMapping for Arc<T> {
    #[inline]
    fn raw_to_display(&self, offset: usize) -> usize {
        (**self).raw_to_display(offset)
    }

    #[inline]
    fn display_to_raw(&self, offset: usize) -> usize {
        (**self).display_to_raw(offset)
    }
}

/// Leaves every offset where it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityMapping;

impl OffsetMapping for IdentityMapping {
    #[inline]
    fn raw_to_display(&self, offset: usize) -> usize {
        offset
    }

    #[inline]
    fn display_to_raw(&self, offset: usize) -> usize {
        offset
    }
}

/// Two mappings applied in sequence: raw -> `first` -> `second` -> display.
///
/// Display offsets go back through `second` first, then `first`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMapping<A, B> {
    first: A,
    second: B,
}

impl<A, B> ComposedMapping<A, B> {
    /// Chains `first` (closest to the raw text) with `second`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: OffsetMapping, B: OffsetMapping> OffsetMapping for ComposedMapping<A, B> {
    fn raw_to_display(&self, offset: usize) -> usize {
        self.second.raw_to_display(self.first.raw_to_display(offset))
    }

    fn display_to_raw(&self, offset: usize) -> usize {
        self.first.display_to_raw(self.second.display_to_raw(offset))
    }
}

/// Breaks text into blocks separated by a single separator character.
///
/// For block lengths `[b0, b1, ..]` block `i` covers raw offsets
/// `[b0 + .. + b(i-1), b0 + .. + bi)` and display offsets shifted right by
/// `i`, one wider to hold the separator that follows it. Ranges are
/// half-open, so an offset on a block boundary belongs to the next block.
/// Offsets past the last block are mapped as if they were in it.
///
/// An empty block plan maps and renders everything unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOffsetMapping {
    raw_ranges: Vec<Range<usize>>,
    display_ranges: Vec<Range<usize>>,
    separator: char,
}

impl BlockOffsetMapping {
    /// Precomputes the raw and display ranges for `block_lengths`.
    pub fn new(block_lengths: &[usize], separator: char) -> Self {
        let mut raw_ranges = Vec::with_capacity(block_lengths.len());
        let mut display_ranges = Vec::with_capacity(block_lengths.len());
        let mut start = 0;

        for (separators_before, &length) in block_lengths.iter().enumerate() {
            let end = start + length;
            raw_ranges.push(start..end);
            // the separator after the block belongs to the block's display range
            display_ranges.push(start + separators_before..end + separators_before + 1);
            start = end;
        }

        Self {
            raw_ranges,
            display_ranges,
            separator,
        }
    }

    /// Returns the separator character.
    #[inline]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns the number of blocks in the plan.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.raw_ranges.len()
    }

    /// Returns the raw length covered by all blocks.
    #[inline]
    pub fn planned_length(&self) -> usize {
        self.raw_ranges.last().map_or(0, |r| r.end)
    }

    /// Renders `text` with separators after every filled block.
    ///
    /// A separator follows a block once the block is complete, except after
    /// the last block. Characters beyond the last block are appended
    /// without further separators.
    ///
    /// # Example
    ///
    /// ```
    /// use card_form::transform::BlockOffsetMapping;
    ///
    /// let mapping = BlockOffsetMapping::new(&[5, 3, 4, 5], ' ');
    /// assert_eq!(mapping.render("thesearesom"), "these are som");
    /// assert_eq!(mapping.render("thesearesomewords!!"), "these are some words!!");
    /// ```
    pub fn render(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let last = self.raw_ranges.len().saturating_sub(1);

        let mut rendered = String::with_capacity(text.len() + self.raw_ranges.len());
        let mut consumed = 0;

        for (index, range) in self.raw_ranges.iter().enumerate() {
            if range.start >= len {
                break;
            }
            let end = range.end.min(len);
            rendered.extend(&chars[range.start..end]);
            consumed = end;

            if index < last && range.end <= len {
                rendered.push(self.separator);
            }
        }

        // overflow beyond the block plan
        if consumed < len {
            rendered.extend(&chars[consumed..]);
        }

        rendered
    }

    fn block_containing(&self, ranges: &[Range<usize>], offset: usize) -> usize {
        ranges
            .iter()
            .position(|range| range.contains(&offset))
            .unwrap_or_else(|| self.raw_ranges.len().saturating_sub(1))
    }
}

impl OffsetMapping for BlockOffsetMapping {
    fn raw_to_display(&self, offset: usize) -> usize {
        offset + self.block_containing(&self.raw_ranges, offset)
    }

    fn display_to_raw(&self, offset: usize) -> usize {
        offset.saturating_sub(self.block_containing(&self.display_ranges, offset))
    }
}

/// Accounts for a synthetic `0` rendered in front of the raw text.
///
/// Offsets past the start move one to the right; display offsets at or
/// before the synthetic character map to the start. Applied after any block
/// mapping, so separators are counted before the shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadingZeroMapping;

impl OffsetMapping for LeadingZeroMapping {
    #[inline]
    fn raw_to_display(&self, offset: usize) -> usize {
        if offset > 0 {
            offset + 1
        } else {
            offset
        }
    }

    #[inline]
    fn display_to_raw(&self, offset: usize) -> usize {
        if offset <= 1 {
            0
        } else {
            offset - 1
        }
    }
}

/// The display form of a raw field value.
#[derive(Clone)]
pub struct TransformedText {
    text: String,
    hint_start: usize,
    mapping: Arc<dyn OffsetMapping + Send + Sync>,
}

impl TransformedText {
    /// Wraps a rendered string and the mapping that produced it.
    pub fn new(text: String, mapping: Arc<dyn OffsetMapping + Send + Sync>) -> Self {
        let hint_start = text.chars().count();
        Self {
            text,
            hint_start,
            mapping,
        }
    }

    /// Appends placeholder characters that are shown but not typed.
    fn with_hint(mut self, hint: &str) -> Self {
        self.text.push_str(hint);
        self
    }

    /// Full display text, hint included.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Display text without the hint suffix.
    pub fn formatted(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.hint_start)
            .map_or(self.text.len(), |(i, _)| i);
        &self.text[..end]
    }

    /// Placeholder suffix to be drawn dimmed. Empty when fully typed.
    pub fn hint(&self) -> &str {
        &self.text[self.formatted().len()..]
    }

    /// Character offset where the hint begins.
    #[inline]
    pub fn hint_start(&self) -> usize {
        self.hint_start
    }

    /// Maps a raw cursor offset into the display text.
    #[inline]
    pub fn raw_to_display(&self, offset: usize) -> usize {
        self.mapping.raw_to_display(offset)
    }

    /// Maps a display cursor offset back into the raw text.
    #[inline]
    pub fn display_to_raw(&self, offset: usize) -> usize {
        self.mapping.display_to_raw(offset)
    }
}

impl fmt::Debug for TransformedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformedText")
            .field("text", &self.text)
            .field("hint_start", &self.hint_start)
            .finish()
    }
}

/// Turns a raw field value into its display form.
pub trait Transformation {
    /// Renders `raw` and pairs it with the matching offset mapping.
    fn transform(&self, raw: &str) -> TransformedText;
}

/// Leaves the text as typed (used for the CVV field).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransformation;

impl Transformation for NoTransformation {
    fn transform(&self, raw: &str) -> TransformedText {
        TransformedText::new(raw.to_string(), Arc::new(IdentityMapping))
    }
}

/// Block separation for a fixed block plan.
#[derive(Debug, Clone)]
pub struct SeparatedBlockTransformation {
    mapping: Arc<BlockOffsetMapping>,
}

impl SeparatedBlockTransformation {
    /// Creates a transformation for `block_lengths` joined by `separator`.
    pub fn new(block_lengths: &[usize], separator: char) -> Self {
        Self {
            mapping: Arc::new(BlockOffsetMapping::new(block_lengths, separator)),
        }
    }

    /// Returns the underlying block mapping.
    #[inline]
    pub fn mapping(&self) -> &BlockOffsetMapping {
        &self.mapping
    }
}

impl Transformation for SeparatedBlockTransformation {
    fn transform(&self, raw: &str) -> TransformedText {
        TransformedText::new(self.mapping.render(raw), self.mapping.clone())
    }
}

/// Card number display for a detected (or undetermined) card type.
///
/// # Example
///
/// ```
/// use card_form::transform::{card_number_transformation, Transformation};
/// use card_form::CardType;
///
/// let visa = card_number_transformation(Some(CardType::Visa));
/// assert_eq!(visa.transform("4242424242424242").text(), "4242 4242 4242 4242");
///
/// let amex = card_number_transformation(Some(CardType::Amex));
/// assert_eq!(amex.transform("378282246310005").text(), "3782 822463 10005");
/// ```
pub fn card_number_transformation(card_type: Option<CardType>) -> SeparatedBlockTransformation {
    SeparatedBlockTransformation::new(card::number_blocks(card_type), ' ')
}

/// MM/YY display for the expiry field.
///
/// A one-digit month gets a leading `0` on screen (typing `9` shows
/// `09/`), and the untyped part of `MM/YY` is appended as a hint.
///
/// # Example
///
/// ```
/// use card_form::transform::{ExpiryDateTransformation, Transformation};
///
/// let expiry = ExpiryDateTransformation::new();
/// let shown = expiry.transform("9");
/// assert_eq!(shown.text(), "09/YY");
/// assert_eq!(shown.formatted(), "09/");
/// assert_eq!(shown.hint(), "YY");
/// ```
#[derive(Debug, Clone)]
pub struct ExpiryDateTransformation {
    blocks: Arc<BlockOffsetMapping>,
}

impl ExpiryDateTransformation {
    /// Creates the `[2, 2]` / `'/'` expiry transformation.
    pub fn new() -> Self {
        Self {
            blocks: Arc::new(BlockOffsetMapping::new(&[2, 2], '/')),
        }
    }
}

impl Default for ExpiryDateTransformation {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformation for ExpiryDateTransformation {
    fn transform(&self, raw: &str) -> TransformedText {
        let prepend_zero = !raw.is_empty() && !starts_with_month_digit(raw);

        let transformed = if prepend_zero {
            let mut padded = String::with_capacity(raw.len() + 1);
            padded.push('0');
            padded.push_str(raw);
            TransformedText::new(
                self.blocks.render(&padded),
                Arc::new(ComposedMapping::new(self.blocks.clone(), LeadingZeroMapping)),
            )
        } else {
            TransformedText::new(self.blocks.render(raw), self.blocks.clone())
        };

        let shown = transformed.hint_start();
        let hint: String = EXPIRY_HINT.chars().skip(shown).collect();
        transformed.with_hint(&hint)
    }
}
