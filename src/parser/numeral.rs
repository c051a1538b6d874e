//! Strict grammar for canonical numerals
//!
//! After normalization a candidate must match `[-+]?\d+(\.\d+)?` in full.

use winnow::ascii::digit1;
use winnow::combinator::{eof, opt, terminated};
use winnow::token::{literal, one_of};
use winnow::{ModalResult, Parser};

use crate::error::ParseFailure;

/// Recognize a complete canonical numeral
pub fn parse_canonical_numeral<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    terminated(
        (opt(one_of(['-', '+'])), digit1, opt((literal("."), digit1))).take(),
        eof,
    )
    .parse_next(input)
}

/// Check that `candidate` is a canonical numeral
pub fn validate_numeral(candidate: &str) -> Result<&str, ParseFailure> {
    let mut input = candidate;
    parse_canonical_numeral(&mut input).map_err(|_| ParseFailure::new(candidate))
}

/// Convert a validated numeral to the nearest finite `f64`
pub fn numeral_to_f64(numeral: &str) -> Result<f64, ParseFailure> {
    numeral
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseFailure::new(numeral))
}

/// Move the decimal point of a validated numeral `places` digits to the left
///
/// `"12"` becomes `"0.12"` for two places. Working on the text keeps the
/// conversion to `f64` a single correctly rounded step.
pub fn shift_decimal_left(numeral: &str, places: usize) -> String {
    let (sign, unsigned) = match numeral.strip_prefix(['-', '+']) {
        Some(rest) => (&numeral[..1], rest),
        None => ("", numeral),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut result = String::with_capacity(numeral.len() + places + 2);
    result.push_str(sign);
    if integer.len() > places {
        let split = integer.len() - places;
        result.push_str(&integer[..split]);
        result.push('.');
        result.push_str(&integer[split..]);
    } else {
        result.push_str("0.");
        result.extend(std::iter::repeat_n('0', places - integer.len()));
        result.push_str(integer);
    }
    result.push_str(fraction);
    result
}

/// Move the decimal point of a plain decimal numeral `places` digits to the right
///
/// `"0.125"` becomes `"12.5"` for two places. Leading zeros of the integer part
/// are dropped and a fraction that runs out is padded with zeros.
pub fn shift_decimal_right(numeral: &str, places: usize) -> String {
    let (sign, unsigned) = match numeral.strip_prefix(['-', '+']) {
        Some(rest) => (&numeral[..1], rest),
        None => ("", numeral),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let moved = places.min(fraction.len());

    let mut digits = String::with_capacity(integer.len() + places);
    digits.push_str(integer);
    digits.push_str(&fraction[..moved]);
    digits.extend(std::iter::repeat_n('0', places - moved));
    let digits = digits.trim_start_matches('0');

    let mut result = String::with_capacity(numeral.len() + places + 1);
    result.push_str(sign);
    result.push_str(if digits.is_empty() { "0" } else { digits });
    if moved < fraction.len() {
        result.push('.');
        result.push_str(&fraction[moved..]);
    }
    result
}
