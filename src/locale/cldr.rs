//! Provider backed by ICU4X and its compiled CLDR data
//!
//! Digits, separators, signs and grouping come from `icu::decimal`, and
//! rounding happens on a `fixed_decimal::Decimal`. Style affixes (percent and
//! currency patterns, currency symbols) come from a [`LocaleRegistry`] overlay,
//! the embedded tables by default. A locale without a table of its own gets the
//! root patterns and the ISO code as its currency symbol.

use std::sync::Arc;

use fixed_decimal::{Decimal, SignedRoundingMode, UnsignedRoundingMode};
use icu::decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu::decimal::{DecimalFormatter, DecimalFormatterPreferences};
use icu::locale::Locale;

use super::{LanguageTag, LocaleDataProvider, LocaleRegistry, embedded_registry, parse_locale};
use crate::error::ProviderError;
use crate::formatter::render::{ResolvedFormat, wrap_affixes};
use crate::parser::shift_decimal_right;
use crate::types::{NumberFormatOptions, NumberStyle};

/// Provider formatting through `icu::decimal::DecimalFormatter`
///
/// ```
/// use locale_number::{IcuLocaleProvider, LocaleDataProvider, NumberFormatOptions};
///
/// let provider = IcuLocaleProvider::default();
/// let text = provider.render(-12345.5, &NumberFormatOptions::new("fi-FI")).unwrap();
/// assert_eq!(text, "\u{2212}12\u{00A0}345,5");
/// ```
#[derive(Debug, Clone)]
pub struct IcuLocaleProvider {
    affixes: Arc<LocaleRegistry>,
}

impl Default for IcuLocaleProvider {
    fn default() -> Self {
        Self {
            affixes: embedded_registry(),
        }
    }
}

impl IcuLocaleProvider {
    /// Provider taking style affixes and currency symbols from `registry`
    pub fn from_registry(registry: LocaleRegistry) -> Self {
        Self {
            affixes: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.affixes
    }

    fn resolve(
        &self,
        options: &NumberFormatOptions,
    ) -> Result<(Locale, ResolvedFormat), ProviderError> {
        let locale = parse_locale(&options.locale)
            .ok_or_else(|| ProviderError::UnknownLocale(options.locale.clone()))?;
        let tag = LanguageTag::from_locale(&locale);
        let entry = self.affixes.entry_for(&tag).unwrap_or_default();
        let resolved = self.affixes.resolve_entry(&tag, &entry, options)?;
        Ok((locale, resolved))
    }
}

/// Round `value` to the resolved fraction bounds and format it with ICU
fn format_decimal(
    value: f64,
    locale: &Locale,
    format: &ResolvedFormat,
) -> Result<String, ProviderError> {
    // f64 Display is the shortest round-trip form and never uses an exponent
    let mut numeral = value.to_string();
    if format.style == NumberStyle::Percent {
        numeral = shift_decimal_right(&numeral, 2);
    }

    let mut decimal = Decimal::try_from_str(&numeral)
        .map_err(|e| ProviderError::Data(format!("cannot represent {numeral}: {e:?}")))?;
    decimal.round_with_mode(
        -i16::from(format.max_fraction_digits),
        SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfExpand),
    );
    decimal.absolute.trim_end();
    decimal.absolute.pad_end(-i16::from(format.min_fraction_digits));

    let mut options = DecimalFormatterOptions::default();
    options.grouping_strategy = Some(if format.use_grouping {
        GroupingStrategy::Auto
    } else {
        GroupingStrategy::Never
    });
    let formatter = DecimalFormatter::try_new(DecimalFormatterPreferences::from(locale), options)
        .map_err(|e| ProviderError::Data(format!("no decimal data for {locale}: {e}")))?;

    Ok(formatter.format(&decimal).to_string())
}

/// Split ICU output into its sign and the unsigned numeral
fn split_sign(formatted: &str) -> (&str, &str) {
    let start = formatted.find(char::is_numeric).unwrap_or(0);
    formatted.split_at(start)
}

impl LocaleDataProvider for IcuLocaleProvider {
    fn render(&self, value: f64, options: &NumberFormatOptions) -> Result<String, ProviderError> {
        let (locale, resolved) = self.resolve(options)?;
        let formatted = format_decimal(value, &locale, &resolved)?;
        let (sign, number) = split_sign(&formatted);
        let minus = value.is_sign_negative().then_some(sign);
        Ok(wrap_affixes(number, minus, &resolved))
    }
}
