//! Digit-level rendering used by the embedded locale provider, and the
//! affix assembly shared by every built-in provider
//!
//! Works on the shortest round-trip decimal digits of a value so that rounding
//! follows what a reader sees (half away from zero on `1.005` gives `1.01`).

use crate::types::{AffixToken, DigitMap, NumberPattern, NumberStyle, NumberSymbols, PatternPair};

const NBSP: char = '\u{00A0}';

/// A fully resolved request: locale data plus the fraction/grouping settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFormat {
    pub style: NumberStyle,
    pub digits: DigitMap,
    pub symbols: NumberSymbols,
    pub pattern: PatternPair,
    /// Currency symbol substituted for `¤`
    pub currency_symbol: Option<String>,
    pub min_fraction_digits: u8,
    pub max_fraction_digits: u8,
    pub use_grouping: bool,
    /// Integer digits required beyond the primary group before grouping applies
    pub min_grouping_digits: u8,
}

/// Unsigned decimal digits split at the decimal point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalDigits {
    pub integer: Vec<u8>,
    pub fraction: Vec<u8>,
}

impl DecimalDigits {
    /// Digits of `|value|` in shortest round-trip form
    pub fn from_f64(value: f64) -> Self {
        let text = format!("{}", value.abs());
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let to_digits = |s: &str| -> Vec<u8> {
            s.bytes()
                .filter(u8::is_ascii_digit)
                .map(|b| b - b'0')
                .collect()
        };
        let mut digits = Self {
            integer: to_digits(integer),
            fraction: to_digits(fraction),
        };
        digits.trim_integer();
        digits
    }

    /// Multiply by a power of ten by moving digits across the decimal point
    pub fn shift_right(&mut self, places: usize) {
        for _ in 0..places {
            let digit = if self.fraction.is_empty() {
                0
            } else {
                self.fraction.remove(0)
            };
            self.integer.push(digit);
        }
        self.trim_integer();
    }

    /// Round half away from zero to at most `max` fraction digits
    pub fn round(&mut self, max: usize) {
        if self.fraction.len() <= max {
            return;
        }

        let round_up = self.fraction[max] >= 5;
        self.fraction.truncate(max);
        if !round_up {
            return;
        }

        let mut carry = true;
        for digit in self.fraction.iter_mut().rev().chain(self.integer.iter_mut().rev()) {
            *digit += 1;
            if *digit == 10 {
                *digit = 0;
            } else {
                carry = false;
                break;
            }
        }
        if carry {
            self.integer.insert(0, 1);
        }
    }

    /// Drop trailing zeros beyond `min` and pad with zeros up to `min`
    pub fn fit_fraction(&mut self, min: usize) {
        while self.fraction.len() > min && self.fraction.last() == Some(&0) {
            self.fraction.pop();
        }
        while self.fraction.len() < min {
            self.fraction.push(0);
        }
    }

    pub fn pad_integer(&mut self, min: usize) {
        while self.integer.len() < min.max(1) {
            self.integer.insert(0, 0);
        }
    }

    fn trim_integer(&mut self) {
        let leading = self.integer.iter().take_while(|&&d| d == 0).count();
        self.integer.drain(..leading);
        if self.integer.is_empty() {
            self.integer.push(0);
        }
    }
}

/// Format the integer digits with locale glyphs and grouping separators
fn render_integer(digits: &[u8], format: &ResolvedFormat, pattern: &NumberPattern) -> String {
    let glyphs: Vec<char> = digits.iter().map(|&d| format.digits.glyph(d)).collect();

    let primary = pattern.primary_grouping.map(usize::from).unwrap_or(0);
    let secondary = pattern
        .secondary_grouping
        .map(usize::from)
        .unwrap_or(primary);
    let min_grouping = usize::from(format.min_grouping_digits.max(1));

    if !format.use_grouping || primary == 0 || glyphs.len() < primary + min_grouping {
        return glyphs.into_iter().collect();
    }

    let mut groups: Vec<String> = Vec::new();
    let mut end = glyphs.len();
    let mut size = primary;
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(glyphs[start..end].iter().collect());
        end = start;
        size = secondary.max(1);
    }
    groups.reverse();
    groups.join(&format.symbols.group)
}

fn render_affix(tokens: &[AffixToken], format: &ResolvedFormat, minus: &str, out: &mut String) {
    for token in tokens {
        match token {
            AffixToken::Literal(text) => out.push_str(text),
            AffixToken::Currency => {
                out.push_str(format.currency_symbol.as_deref().unwrap_or_default())
            }
            AffixToken::Percent => out.push_str(&format.symbols.percent),
            AffixToken::Minus => out.push_str(minus),
            AffixToken::Plus => out.push_str(&format.symbols.plus),
        }
    }
}

/// A currency symbol ending (or starting) with a letter is kept apart from the digits
fn needs_currency_spacing(symbol: Option<&str>, adjacent: Option<char>) -> bool {
    symbol.is_some() && adjacent.is_some_and(char::is_alphabetic)
}

/// Render a finite value according to a resolved format
///
/// # Examples
/// ```
/// use locale_number::formatter::render::{render_number, ResolvedFormat};
/// use locale_number::parser::parse_number_pattern;
/// use locale_number::types::{DigitMap, NumberStyle, NumberSymbols};
///
/// let format = ResolvedFormat {
///     style: NumberStyle::Decimal,
///     digits: DigitMap::ascii(),
///     symbols: NumberSymbols::default(),
///     pattern: parse_number_pattern("#,##0.###").unwrap(),
///     currency_symbol: None,
///     min_fraction_digits: 0,
///     max_fraction_digits: 2,
///     use_grouping: true,
///     min_grouping_digits: 1,
/// };
/// assert_eq!(render_number(-1234.567, &format), "-1,234.57");
/// ```
pub fn render_number(value: f64, format: &ResolvedFormat) -> String {
    let mut digits = DecimalDigits::from_f64(value);
    if format.style == NumberStyle::Percent {
        digits.shift_right(2);
    }
    digits.round(usize::from(format.max_fraction_digits));
    digits.fit_fraction(usize::from(format.min_fraction_digits));

    let negative = value.is_sign_negative();
    let pattern = match (&format.pattern.negative, negative) {
        (Some(explicit), true) => explicit,
        _ => &format.pattern.positive,
    };
    digits.pad_integer(usize::from(pattern.min_integer_digits));

    let mut number = render_integer(&digits.integer, format, &format.pattern.positive);
    if !digits.fraction.is_empty() {
        number.push_str(&format.symbols.decimal);
        number.extend(digits.fraction.iter().map(|&d| format.digits.glyph(d)));
    }

    wrap_affixes(&number, negative.then_some(format.symbols.minus.as_str()), format)
}

/// Place an unsigned numeral between the pattern affixes
///
/// `minus` is the sign to use when the value is negative. It fills the `-`
/// slot of an explicit negative subpattern, or precedes the positive prefix
/// when the pattern has none.
pub fn wrap_affixes(number: &str, minus: Option<&str>, format: &ResolvedFormat) -> String {
    let (pattern, implicit_minus) = match (&format.pattern.negative, minus) {
        (Some(explicit), Some(_)) => (explicit, false),
        (None, Some(_)) => (&format.pattern.positive, true),
        (_, None) => (&format.pattern.positive, false),
    };
    let minus = minus.unwrap_or_default();

    let symbol = format.currency_symbol.as_deref();
    let mut out = String::new();
    if implicit_minus {
        out.push_str(minus);
    }
    render_affix(&pattern.prefix, format, minus, &mut out);
    if pattern.prefix.last() == Some(&AffixToken::Currency)
        && needs_currency_spacing(symbol, symbol.and_then(|s| s.chars().last()))
    {
        out.push(NBSP);
    }
    out.push_str(number);
    if pattern.suffix.first() == Some(&AffixToken::Currency)
        && needs_currency_spacing(symbol, symbol.and_then(|s| s.chars().next()))
    {
        out.push(NBSP);
    }
    render_affix(&pattern.suffix, format, minus, &mut out);
    out
}
