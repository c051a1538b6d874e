//! Type definitions for locale-aware number parsing
//!
//! This module defines the options callers hand to an engine, the profile derived
//! from a locale, and the token model of a CLDR-style number pattern.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::LocaleError;

/// Upper bound accepted for `minimum_fraction_digits` / `maximum_fraction_digits`
pub const MAX_FRACTION_DIGITS: u8 = 20;

/// The presentation style of a formatted number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStyle {
    /// Plain decimal number (1,234.5)
    #[default]
    Decimal,
    /// Value scaled by 100 and shown with a percent sign (12%)
    Percent,
    /// Value shown with a currency symbol ($1,234.50)
    Currency,
}

/// Options an engine is created with
///
/// Keys deserialize in camelCase so the same table can be shared with
/// front-end configuration (`minimumFractionDigits`, `useGrouping`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NumberFormatOptions {
    /// BCP-47 locale tag, e.g. `ar-EG` or `hi-IN-u-nu-deva`
    pub locale: String,
    /// Presentation style
    #[serde(default)]
    pub style: NumberStyle,
    /// ISO 4217 currency code, required iff `style` is currency
    #[serde(default)]
    pub currency: Option<String>,
    /// Minimum number of fraction digits; locale/style default when absent
    #[serde(default)]
    pub minimum_fraction_digits: Option<u8>,
    /// Maximum number of fraction digits; locale/style default when absent
    #[serde(default)]
    pub maximum_fraction_digits: Option<u8>,
    /// Whether grouping separators are emitted when formatting
    #[serde(default = "default_use_grouping")]
    pub use_grouping: bool,
}

fn default_use_grouping() -> bool {
    true
}

impl NumberFormatOptions {
    /// Decimal options for the given locale
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            style: NumberStyle::Decimal,
            currency: None,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
            use_grouping: true,
        }
    }

    /// Currency options for the given locale and ISO 4217 code
    pub fn currency(locale: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(locale)
            .with_style(NumberStyle::Currency)
            .with_currency(code)
    }

    /// Percent options for the given locale
    pub fn percent(locale: impl Into<String>) -> Self {
        Self::new(locale).with_style(NumberStyle::Percent)
    }

    pub fn with_style(mut self, style: NumberStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(code.into());
        self
    }

    pub fn with_minimum_fraction_digits(mut self, digits: u8) -> Self {
        self.minimum_fraction_digits = Some(digits);
        self
    }

    pub fn with_maximum_fraction_digits(mut self, digits: u8) -> Self {
        self.maximum_fraction_digits = Some(digits);
        self
    }

    pub fn with_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    /// Load options from a TOML table
    ///
    /// ```
    /// use locale_number::{NumberFormatOptions, NumberStyle};
    ///
    /// let options = NumberFormatOptions::from_toml_str(
    ///     "locale = \"ar-EG\"\nstyle = \"currency\"\ncurrency = \"EGP\"\nminimumFractionDigits = 3",
    /// )
    /// .unwrap();
    /// assert_eq!(options.style, NumberStyle::Currency);
    /// assert_eq!(options.minimum_fraction_digits, Some(3));
    /// ```
    pub fn from_toml_str(toml_str: &str) -> Result<Self, LocaleError> {
        let options: Self =
            toml::from_str(toml_str).map_err(|e| LocaleError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Validates the fraction digit bounds and the currency requirement
    pub fn validate(&self) -> Result<(), LocaleError> {
        for (name, digits) in [
            ("minimumFractionDigits", self.minimum_fraction_digits),
            ("maximumFractionDigits", self.maximum_fraction_digits),
        ] {
            if let Some(d) = digits {
                if d > MAX_FRACTION_DIGITS {
                    return Err(LocaleError::InvalidOptions(format!(
                        "{name} must be between 0 and {MAX_FRACTION_DIGITS}, got {d}"
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.minimum_fraction_digits, self.maximum_fraction_digits)
        {
            if min > max {
                return Err(LocaleError::InvalidOptions(format!(
                    "minimumFractionDigits ({min}) exceeds maximumFractionDigits ({max})"
                )));
            }
        }

        if self.style == NumberStyle::Currency && self.currency.is_none() {
            return Err(LocaleError::UnsupportedCurrency(None));
        }

        Ok(())
    }
}

/// Bijection between a locale's ten numeral glyphs and the ASCII digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitMap {
    glyphs: [char; 10],
}

impl Default for DigitMap {
    fn default() -> Self {
        Self::ascii()
    }
}

impl DigitMap {
    /// The identity map for ASCII-numeral locales
    pub fn ascii() -> Self {
        Self {
            glyphs: ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'],
        }
    }

    /// Builds a map from the glyphs rendered for 0 through 9
    ///
    /// Returns `None` when two digits share a glyph.
    pub fn from_glyphs(glyphs: [char; 10]) -> Option<Self> {
        let distinct: BTreeSet<char> = glyphs.iter().copied().collect();
        (distinct.len() == 10).then_some(Self { glyphs })
    }

    /// Glyph used for the ASCII digit value `digit` (0-9)
    pub fn glyph(&self, digit: u8) -> char {
        self.glyphs[usize::from(digit % 10)]
    }

    /// The ten glyphs in digit order
    pub fn glyphs(&self) -> &[char; 10] {
        &self.glyphs
    }

    /// ASCII digit for a locale glyph, if it is one
    pub fn to_ascii(&self, glyph: char) -> Option<char> {
        self.glyphs
            .iter()
            .position(|&g| g == glyph)
            .map(|d| char::from(b'0' + d as u8))
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::ascii()
    }
}

/// Everything the normalizer needs to know about a locale, derived by probing
/// a [`LocaleDataProvider`](crate::locale::LocaleDataProvider)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleProfile {
    /// Decimal separator as rendered (one grapheme)
    pub decimal_separator: String,
    /// Grouping separator as rendered; empty when the locale does not group
    pub grouping_separator: String,
    /// Locale glyph to ASCII digit mapping
    pub digit_map: DigitMap,
    /// Text rendered before the numeral for currency or percent styles
    pub prefix: String,
    /// Text rendered after the numeral for currency or percent styles
    pub suffix: String,
    /// Minus sign with bidi controls removed
    pub minus_sign: String,
    /// Control characters discarded before parsing
    pub bidi_strip_set: BTreeSet<char>,
}

impl LocaleProfile {
    /// Removes every character of the bidi strip set
    pub fn strip_bidi(&self, text: &str) -> String {
        text.chars()
            .filter(|c| !self.bidi_strip_set.contains(c))
            .collect()
    }

    /// Prefix as a user would type it: no bidi marks, no surrounding spaces
    pub fn prefix_core(&self) -> String {
        self.strip_bidi(&self.prefix).trim().to_string()
    }

    /// Suffix as a user would type it: no bidi marks, no surrounding spaces
    pub fn suffix_core(&self) -> String {
        self.strip_bidi(&self.suffix).trim().to_string()
    }
}

/// Locale number symbols for one numbering system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal: String,
    pub group: String,
    pub minus: String,
    pub plus: String,
    pub percent: String,
}

impl Default for NumberSymbols {
    fn default() -> Self {
        Self {
            decimal: ".".to_string(),
            group: ",".to_string(),
            minus: "-".to_string(),
            plus: "+".to_string(),
            percent: "%".to_string(),
        }
    }
}

/// A piece of a pattern prefix or suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffixToken {
    /// Literal text, quoted or not
    Literal(String),
    /// Currency sign (¤), replaced by the currency symbol
    Currency,
    /// Percent sign (%), replaced by the locale percent symbol
    Percent,
    /// Minus sign (-), replaced by the locale minus symbol
    Minus,
    /// Plus sign (+), replaced by the locale plus symbol
    Plus,
}

/// One side (positive or negative) of a number pattern
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberPattern {
    pub prefix: Vec<AffixToken>,
    pub suffix: Vec<AffixToken>,
    /// Size of the group closest to the decimal point
    pub primary_grouping: Option<u8>,
    /// Size of every further group; falls back to the primary size
    pub secondary_grouping: Option<u8>,
    pub min_integer_digits: u8,
    pub min_fraction_digits: u8,
    pub max_fraction_digits: u8,
}

/// A complete pattern with an optional explicit negative side
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternPair {
    pub positive: NumberPattern,
    pub negative: Option<NumberPattern>,
}
