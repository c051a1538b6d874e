//! Parsing module
//!
//! Covers both directions of text handling: CLDR number patterns consumed by the
//! built-in locale providers, and user input turned into canonical numerals.
//! The main entry points are `parse_number_pattern` and `normalize`.

mod combinators;
mod tokens;
mod pattern;
pub mod normalize;
pub mod numeral;

pub use normalize::normalize;
pub use numeral::{numeral_to_f64, shift_decimal_left, shift_decimal_right, validate_numeral};
pub use pattern::parse_number_pattern;
