//! Fuzz target for block rendering and cursor mapping.
//!
//! Rendering must keep every input character, and mapping a raw offset to
//! the display and back must return the same offset.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use card_form::{BlockOffsetMapping, OffsetMapping};

#[derive(Debug, Arbitrary)]
struct Input {
    blocks: Vec<u8>,
    text: String,
}

fuzz_target!(|input: Input| {
    let blocks: Vec<usize> = input
        .blocks
        .iter()
        .take(8)
        .map(|&b| usize::from(b % 16) + 1)
        .collect();
    let mapping = BlockOffsetMapping::new(&blocks, '\u{2007}');

    let rendered = mapping.render(&input.text);
    let stripped: String = rendered.chars().filter(|&c| c != '\u{2007}').collect();
    let original: String = input.text.chars().filter(|&c| c != '\u{2007}').collect();
    assert_eq!(stripped, original);

    for offset in 0..=input.text.chars().count() {
        assert_eq!(mapping.display_to_raw(mapping.raw_to_display(offset)), offset);
    }
});
