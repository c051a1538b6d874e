use winnow::Parser;
use winnow::token::literal;

use crate::parser::combinators::parse_subpattern;
use crate::types::*;

/// Parse a CLDR-style number pattern
///
/// Accepts a positive subpattern optionally followed by `;` and an explicit
/// negative subpattern. Returns the parsed pattern or an error message.
///
/// # Examples
/// ```
/// use locale_number::parser::parse_number_pattern;
/// use locale_number::types::AffixToken;
///
/// let pattern = parse_number_pattern("¤#,##0.00").unwrap();
/// assert_eq!(pattern.positive.prefix, vec![AffixToken::Currency]);
/// assert_eq!(pattern.positive.max_fraction_digits, 2);
/// ```
pub fn parse_number_pattern(input_str: &str) -> Result<PatternPair, String> {
    let mut input = input_str;

    let make_err_msg = |e, remaining: &str| -> String {
        format!("Pattern error: {e:?} at remaining input '{remaining}' in '{input_str}'")
    };

    let positive = parse_subpattern
        .parse_next(&mut input)
        .map_err(|e| make_err_msg(e, input))?;

    let mut negative = None;
    if input.starts_with(';') {
        literal(";")
            .parse_next(&mut input)
            .map_err(|e: winnow::error::ErrMode<winnow::error::ContextError>| {
                make_err_msg(e, input)
            })?;
        negative = Some(
            parse_subpattern
                .parse_next(&mut input)
                .map_err(|e| make_err_msg(e, input))?,
        );
    }

    if !input.is_empty() {
        return Err(format!(
            "Too many subpatterns or trailing characters: '{input}'"
        ));
    }

    Ok(PatternPair { positive, negative })
}
