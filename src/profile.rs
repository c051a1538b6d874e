//! Locale profile derivation by probe-and-diff
//!
//! Nothing here knows any locale. Separators, digit glyphs, the minus sign and
//! style affixes are all read back from numbers rendered by a
//! [`LocaleDataProvider`] whose expected shape is known in advance.

use std::collections::BTreeSet;

use crate::error::LocaleError;
use crate::locale::LocaleDataProvider;
use crate::types::{DigitMap, LocaleProfile, NumberFormatOptions, NumberStyle};

/// Magnitude with at least two groups and one fraction digit
const SEPARATOR_PROBE: f64 = 12345678.9;
const SEPARATOR_PROBE_DIGITS: &str = "123456789";
/// Magnitude used to locate the numeral inside styled output
const AFFIX_PROBE: f64 = 1234.5;
const MINUS_PROBE: f64 = -1.0;

/// Directionality controls that can surround numerals and currency symbols
pub fn is_bidi_control(c: char) -> bool {
    matches!(
        c,
        '\u{061C}' | '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// Derives [`LocaleProfile`]s from a provider
pub struct LocaleProfileResolver<'p, P: ?Sized> {
    provider: &'p P,
}

impl<'p, P> LocaleProfileResolver<'p, P>
where
    P: LocaleDataProvider + ?Sized,
{
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Derive the profile for `options`
    ///
    /// Pure and deterministic for a given provider: resolving the same options
    /// twice yields equal profiles.
    pub fn resolve(&self, options: &NumberFormatOptions) -> Result<LocaleProfile, LocaleError> {
        if options.style == NumberStyle::Currency && options.currency.is_none() {
            return Err(LocaleError::UnsupportedCurrency(None));
        }

        let mut bidi_strip_set = BTreeSet::new();
        let digit_map = self.probe_digits(options, &mut bidi_strip_set)?;
        let (decimal_separator, grouping_separator) =
            self.probe_separators(options, &digit_map, &mut bidi_strip_set)?;
        let minus_sign = self.probe_minus_sign(options, &digit_map, &mut bidi_strip_set)?;
        let (prefix, suffix) = self.probe_affixes(options, &mut bidi_strip_set)?;

        let profile = LocaleProfile {
            decimal_separator,
            grouping_separator,
            digit_map,
            prefix,
            suffix,
            minus_sign,
            bidi_strip_set,
        };
        log::debug!(
            "Derived profile for {} ({:?}): decimal {:?}, group {:?}, prefix {:?}, suffix {:?}",
            options.locale,
            options.style,
            profile.decimal_separator,
            profile.grouping_separator,
            profile.prefix,
            profile.suffix
        );
        Ok(profile)
    }

    fn malformed(&self, options: &NumberFormatOptions, reason: impl Into<String>) -> LocaleError {
        LocaleError::MalformedProfile {
            locale: options.locale.clone(),
            reason: reason.into(),
        }
    }

    /// Render through the provider, recording bidi controls and returning the
    /// text without them
    fn probe(
        &self,
        value: f64,
        options: &NumberFormatOptions,
        bidi: &mut BTreeSet<char>,
    ) -> Result<(String, String), LocaleError> {
        let rendered = self
            .provider
            .render(value, options)
            .map_err(|e| LocaleError::from_provider(e, &options.locale))?;
        let visible = rendered
            .chars()
            .filter(|&c| {
                let control = is_bidi_control(c);
                if control {
                    bidi.insert(c);
                }
                !control
            })
            .collect();
        Ok((rendered, visible))
    }

    fn decimal_probe_options(
        options: &NumberFormatOptions,
        fraction_digits: u8,
        use_grouping: bool,
    ) -> NumberFormatOptions {
        NumberFormatOptions::new(options.locale.clone())
            .with_minimum_fraction_digits(fraction_digits)
            .with_maximum_fraction_digits(fraction_digits)
            .with_grouping(use_grouping)
    }

    fn probe_digits(
        &self,
        options: &NumberFormatOptions,
        bidi: &mut BTreeSet<char>,
    ) -> Result<DigitMap, LocaleError> {
        let probe_options = Self::decimal_probe_options(options, 0, false);
        let mut glyphs = ['0'; 10];
        for (digit, glyph) in glyphs.iter_mut().enumerate() {
            let (_, visible) = self.probe(digit as f64, &probe_options, bidi)?;
            let mut chars = visible.chars();
            *glyph = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(self.malformed(
                        options,
                        format!("digit {digit} rendered as {visible:?}, expected one glyph"),
                    ));
                }
            };
        }

        DigitMap::from_glyphs(glyphs)
            .ok_or_else(|| self.malformed(options, format!("digit glyphs {glyphs:?} are not distinct")))
    }

    fn probe_separators(
        &self,
        options: &NumberFormatOptions,
        digit_map: &DigitMap,
        bidi: &mut BTreeSet<char>,
    ) -> Result<(String, String), LocaleError> {
        let probe_options = Self::decimal_probe_options(options, 1, true);
        let (_, visible) = self.probe(SEPARATOR_PROBE, &probe_options, bidi)?;

        let mut digits = String::new();
        let mut runs: Vec<String> = Vec::new();
        let mut current = String::new();
        for c in visible.chars() {
            match digit_map.to_ascii(c) {
                Some(ascii) => {
                    if !current.is_empty() && !digits.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    digits.push(ascii);
                }
                None => current.push(c),
            }
        }

        if digits != SEPARATOR_PROBE_DIGITS {
            return Err(self.malformed(
                options,
                format!("probe {SEPARATOR_PROBE} rendered as {visible:?}"),
            ));
        }

        let decimal = runs
            .pop()
            .ok_or_else(|| self.malformed(options, "no decimal separator found"))?;
        let group = runs.first().cloned().unwrap_or_default();
        if runs.iter().any(|run| *run != group) {
            return Err(self.malformed(options, format!("inconsistent grouping in {visible:?}")));
        }
        if group == decimal {
            return Err(self.malformed(options, "grouping and decimal separators are identical"));
        }

        Ok((decimal, group))
    }

    fn probe_minus_sign(
        &self,
        options: &NumberFormatOptions,
        digit_map: &DigitMap,
        bidi: &mut BTreeSet<char>,
    ) -> Result<String, LocaleError> {
        let probe_options = Self::decimal_probe_options(options, 0, false);
        let (_, visible) = self.probe(MINUS_PROBE, &probe_options, bidi)?;
        let minus: String = visible
            .chars()
            .filter(|&c| digit_map.to_ascii(c).is_none())
            .collect();
        Ok(minus.trim().to_string())
    }

    /// Prefix and suffix of the styled probe around the decimal numeral
    fn probe_affixes(
        &self,
        options: &NumberFormatOptions,
        bidi: &mut BTreeSet<char>,
    ) -> Result<(String, String), LocaleError> {
        let reference = match options.style {
            NumberStyle::Decimal => return Ok((String::new(), String::new())),
            NumberStyle::Percent => AFFIX_PROBE * 100.0,
            NumberStyle::Currency => AFFIX_PROBE,
        };

        let decimal_options = Self::decimal_probe_options(options, 1, true);
        let styled_options = NumberFormatOptions {
            minimum_fraction_digits: Some(1),
            maximum_fraction_digits: Some(1),
            use_grouping: true,
            ..options.clone()
        };

        let (numeral, _) = self.probe(reference, &decimal_options, bidi)?;
        let (styled, _) = self.probe(AFFIX_PROBE, &styled_options, bidi)?;

        let start = styled.find(numeral.as_str()).ok_or_else(|| {
            self.malformed(
                options,
                format!("numeral {numeral:?} not found in styled probe {styled:?}"),
            )
        })?;
        let end = start + numeral.len();

        Ok((styled[..start].to_string(), styled[end..].to_string()))
    }
}

/// Derive the profile for `options` from `provider`
pub fn resolve_profile<P>(provider: &P, options: &NumberFormatOptions) -> Result<LocaleProfile, LocaleError>
where
    P: LocaleDataProvider + ?Sized,
{
    LocaleProfileResolver::new(provider).resolve(options)
}
