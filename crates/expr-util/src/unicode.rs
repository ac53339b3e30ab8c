//! Unicode general-category classification, restricted to the major
//! category (the first letter of the two-letter Unicode category code,
//! e.g. `L` for all of `Lu`/`Ll`/`Lt`/`Lm`/`Lo`).
//!
//! `spec.md` §9 notes that "Identifier tests operate on major category
//! only" — so this module exposes a single major-category character per
//! code point rather than pulling in a full Unicode Character Database
//! crate for sub-category detail nothing here uses.

use unicode_categories::UnicodeCategories;

/// Unicode general-category major classes relevant to this crate.
pub const CAT_LETTER: char = 'L';
pub const CAT_NUMBER: char = 'N';
pub const CAT_SEPARATOR: char = 'Z';
pub const CAT_CONTROL: char = 'C';
pub const CAT_SYMBOL: char = 'S';
pub const CAT_PUNCTUATION: char = 'P';
pub const CAT_MARK: char = 'M';

/// Returns the major Unicode general category of `c`, as a single
/// character (`L`, `N`, `Z`, `C`, `S`, `P`, or `M`).
pub fn major_category(c: char) -> char {
    if c.is_letter() {
        CAT_LETTER
    } else if c.is_number() {
        CAT_NUMBER
    } else if c.is_separator() {
        CAT_SEPARATOR
    } else if c.is_other() {
        CAT_CONTROL
    } else if c.is_symbol() {
        CAT_SYMBOL
    } else if c.is_punctuation() {
        CAT_PUNCTUATION
    } else if c.is_mark() {
        CAT_MARK
    } else {
        // Unreachable for any valid `char` under Unicode's partition of
        // the general category, but avoid panicking on future additions.
        CAT_CONTROL
    }
}

/// Whether `c`'s major category appears in `categories` (a string such as
/// `"L"` or `"LN"`), or `c` is one of the explicit extra `characters`.
pub fn matches_class(c: char, categories: &str, characters: &str) -> bool {
    categories.contains(major_category(c)) || characters.contains(c)
}
