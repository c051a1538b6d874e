use winnow::combinator::{opt, preceded};
use winnow::token::{literal, take_while};
use winnow::{ModalResult, Parser};

use crate::parser::tokens::parse_affix;
use crate::types::*;

/// Integer and fraction placeholders of a pattern, e.g. `#,##,##0.00#`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberPart {
    pub primary_grouping: Option<u8>,
    pub secondary_grouping: Option<u8>,
    pub min_integer_digits: u8,
    pub min_fraction_digits: u8,
    pub max_fraction_digits: u8,
}

fn count_u8(text: &str, pred: impl Fn(char) -> bool) -> u8 {
    text.chars().filter(|&c| pred(c)).count().min(u8::MAX as usize) as u8
}

/// Group sizes implied by the comma positions of the integer placeholders
fn grouping_sizes(integer: &str) -> (Option<u8>, Option<u8>) {
    let groups: Vec<&str> = integer.split(',').collect();
    if groups.len() < 2 {
        return (None, None);
    }

    let primary = count_u8(groups[groups.len() - 1], |c| c == '#' || c == '0');
    if primary == 0 {
        return (None, None);
    }

    let secondary = if groups.len() >= 3 {
        Some(count_u8(groups[groups.len() - 2], |c| c == '#' || c == '0')).filter(|&s| s > 0)
    } else {
        None
    };

    (Some(primary), secondary)
}

/// Parse the numeric placeholder part of a pattern
pub fn parse_number_part(input: &mut &str) -> ModalResult<NumberPart> {
    let integer = take_while(1.., ('#', '0', ',')).parse_next(input)?;
    let fraction = opt(preceded(literal("."), take_while(0.., ('#', '0')))).parse_next(input)?;

    let (primary_grouping, secondary_grouping) = grouping_sizes(integer);
    let fraction = fraction.unwrap_or("");

    Ok(NumberPart {
        primary_grouping,
        secondary_grouping,
        min_integer_digits: count_u8(integer, |c| c == '0'),
        min_fraction_digits: count_u8(fraction, |c| c == '0'),
        max_fraction_digits: count_u8(fraction, |_| true),
    })
}

/// Parse one side of a pattern: prefix, number placeholders, suffix
pub fn parse_subpattern(input: &mut &str) -> ModalResult<NumberPattern> {
    let (prefix, number, suffix) = (parse_affix, parse_number_part, parse_affix).parse_next(input)?;

    Ok(NumberPattern {
        prefix,
        suffix,
        primary_grouping: number.primary_grouping,
        secondary_grouping: number.secondary_grouping,
        min_integer_digits: number.min_integer_digits,
        min_fraction_digits: number.min_fraction_digits,
        max_fraction_digits: number.max_fraction_digits,
    })
}
