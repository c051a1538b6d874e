use winnow::combinator::{alt, delimited, repeat};
use winnow::token::{literal, take_while};
use winnow::{ModalResult, Parser};

use crate::types::AffixToken;

/// Characters with a meaning of their own inside a number pattern
fn is_pattern_special(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '#' | ',' | '.' | ';' | '\'' | '¤' | '%' | '-' | '+' | '@')
}

pub fn parse_currency_sign(input: &mut &str) -> ModalResult<AffixToken> {
    literal("¤").value(AffixToken::Currency).parse_next(input)
}

pub fn parse_percent_sign(input: &mut &str) -> ModalResult<AffixToken> {
    literal("%").value(AffixToken::Percent).parse_next(input)
}

pub fn parse_minus_sign(input: &mut &str) -> ModalResult<AffixToken> {
    literal("-").value(AffixToken::Minus).parse_next(input)
}

pub fn parse_plus_sign(input: &mut &str) -> ModalResult<AffixToken> {
    literal("+").value(AffixToken::Plus).parse_next(input)
}

/// Quoted literal like 'text'; '' stands for a single apostrophe
pub fn parse_quoted_literal(input: &mut &str) -> ModalResult<AffixToken> {
    delimited(literal("'"), take_while(0.., |c: char| c != '\''), literal("'"))
        .map(|text: &str| {
            if text.is_empty() {
                AffixToken::Literal("'".to_string())
            } else {
                AffixToken::Literal(text.to_string())
            }
        })
        .parse_next(input)
}

/// Run of unquoted literal characters (spaces, bidi marks, letters)
pub fn parse_plain_literal(input: &mut &str) -> ModalResult<AffixToken> {
    take_while(1.., |c: char| !is_pattern_special(c))
        .map(|text: &str| AffixToken::Literal(text.to_string()))
        .parse_next(input)
}

/// Parse a single affix token
pub fn parse_affix_token(input: &mut &str) -> ModalResult<AffixToken> {
    alt((
        parse_currency_sign,
        parse_percent_sign,
        parse_minus_sign,
        parse_plus_sign,
        parse_quoted_literal,
        parse_plain_literal,
    ))
    .parse_next(input)
}

/// Parse a prefix or suffix: zero or more affix tokens
pub fn parse_affix(input: &mut &str) -> ModalResult<Vec<AffixToken>> {
    repeat(0.., parse_affix_token).parse_next(input)
}
