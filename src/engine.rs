//! The parse/format engine
//!
//! A [`NumberParser`] is bound to one set of [`NumberFormatOptions`]. Its
//! [`LocaleProfile`] is derived once at construction; afterwards the engine is
//! read-only and can be shared across threads.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{FormatError, LocaleError, ParseFailure};
use crate::formatter::format_number;
use crate::locale::{IcuLocaleProvider, LocaleDataProvider};
use crate::parser::{normalize, numeral_to_f64, shift_decimal_left, validate_numeral};
use crate::profile::resolve_profile;
use crate::types::{LocaleProfile, NumberFormatOptions, NumberStyle};

/// Profiles already derived for a provider, keyed by the full options
///
/// Derivation happens outside the lock; when two threads race on the same key
/// both results are equal, so the last write wins.
#[derive(Debug, Default)]
pub struct ProfileCache {
    profiles: RwLock<HashMap<NumberFormatOptions, Arc<LocaleProfile>>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached profile for `options`, deriving it from `provider` on a miss
    pub fn get_or_resolve<P>(
        &self,
        provider: &P,
        options: &NumberFormatOptions,
    ) -> Result<Arc<LocaleProfile>, LocaleError>
    where
        P: LocaleDataProvider + ?Sized,
    {
        if let Some(profile) = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(options)
        {
            log::trace!("Profile cache hit for {}", options.locale);
            return Ok(Arc::clone(profile));
        }

        let profile = Arc::new(resolve_profile(provider, options)?);
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(options.clone(), Arc::clone(&profile));
        Ok(profile)
    }

    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locale-aware number parser and formatter
///
/// # Examples
/// ```
/// use locale_number::{NumberFormatOptions, NumberParser};
///
/// let parser = NumberParser::new(NumberFormatOptions::new("de-DE")).unwrap();
/// assert_eq!(parser.parse("1.234,5").unwrap(), 1234.5);
/// assert_eq!(parser.format(1234.5).unwrap(), "1.234,5");
/// assert!(parser.parse("12,34,56").is_err());
/// ```
#[derive(Debug)]
pub struct NumberParser<P = IcuLocaleProvider> {
    options: NumberFormatOptions,
    provider: Arc<P>,
    profiles: Arc<ProfileCache>,
    profile: Arc<LocaleProfile>,
}

impl<P> Clone for NumberParser<P> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            provider: Arc::clone(&self.provider),
            profiles: Arc::clone(&self.profiles),
            profile: Arc::clone(&self.profile),
        }
    }
}

impl NumberParser<IcuLocaleProvider> {
    /// Create an engine backed by ICU4X locale data
    pub fn new(options: NumberFormatOptions) -> Result<Self, LocaleError> {
        Self::with_provider(options, IcuLocaleProvider::default())
    }
}

impl<P: LocaleDataProvider> NumberParser<P> {
    /// Create an engine backed by a custom provider
    pub fn with_provider(options: NumberFormatOptions, provider: P) -> Result<Self, LocaleError> {
        Self::build(options, Arc::new(provider), Arc::new(ProfileCache::new()))
    }

    fn build(
        options: NumberFormatOptions,
        provider: Arc<P>,
        profiles: Arc<ProfileCache>,
    ) -> Result<Self, LocaleError> {
        options.validate()?;
        let profile = profiles.get_or_resolve(provider.as_ref(), &options)?;
        log::debug!(
            "Created number parser for {} ({:?})",
            options.locale,
            options.style
        );
        Ok(Self {
            options,
            provider,
            profiles,
            profile,
        })
    }

    /// Engine for other options sharing this engine's provider and profile cache
    pub fn with_options(&self, options: NumberFormatOptions) -> Result<Self, LocaleError> {
        Self::build(options, Arc::clone(&self.provider), Arc::clone(&self.profiles))
    }

    /// Parse locale-formatted text into a number
    ///
    /// Anything that is not a complete number in this engine's locale and
    /// style is a [`ParseFailure`]; the failure carries the normalized text.
    pub fn parse(&self, text: &str) -> Result<f64, ParseFailure> {
        let candidate = normalize(text, &self.profile);
        let numeral = validate_numeral(&candidate).inspect_err(|_| {
            log::debug!("Rejected {:?} as {:?} for {}", text, candidate, self.options.locale);
        })?;

        match self.options.style {
            NumberStyle::Percent => numeral_to_f64(&shift_decimal_left(numeral, 2)),
            NumberStyle::Decimal | NumberStyle::Currency => numeral_to_f64(numeral),
        }
    }

    /// Format a finite number
    pub fn format(&self, value: f64) -> Result<String, FormatError> {
        format_number(value, &self.options, self.provider.as_ref())
    }

    /// The derived locale profile
    pub fn profile(&self) -> &LocaleProfile {
        &self.profile
    }

    pub fn options(&self) -> &NumberFormatOptions {
        &self.options
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Create an engine for `options` backed by ICU4X locale data
///
/// # Examples
/// ```
/// use locale_number::{create_number_parser, LocaleError, NumberFormatOptions};
///
/// let parser = create_number_parser(NumberFormatOptions::currency("ar-EG", "EGP")).unwrap();
/// assert_eq!(parser.parse("\u{200F}١٬٢٣٤٫٥٠\u{00A0}ج.م.\u{200F}").unwrap(), 1234.5);
///
/// let err = create_number_parser(NumberFormatOptions::new("ar-EG").with_style(
///     locale_number::NumberStyle::Currency,
/// ));
/// assert_eq!(err.unwrap_err(), LocaleError::UnsupportedCurrency(None));
/// ```
pub fn create_number_parser(
    options: NumberFormatOptions,
) -> Result<NumberParser<IcuLocaleProvider>, LocaleError> {
    NumberParser::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::error::ProviderError;
    use crate::locale::EmbeddedLocaleProvider;

    struct CountingProvider {
        inner: IcuLocaleProvider,
        calls: AtomicUsize,
    }

    impl LocaleDataProvider for CountingProvider {
        fn render(&self, value: f64, options: &NumberFormatOptions) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.render(value, options)
        }
    }

    #[test]
    fn test_profile_is_cached_across_engines() {
        let provider = CountingProvider {
            inner: IcuLocaleProvider::default(),
            calls: AtomicUsize::new(0),
        };
        let parser = NumberParser::with_provider(NumberFormatOptions::new("fr-FR"), provider).unwrap();
        let after_first = parser.provider().calls.load(Ordering::SeqCst);
        assert!(after_first > 0);

        let again = parser.with_options(NumberFormatOptions::new("fr-FR")).unwrap();
        assert_eq!(again.provider().calls.load(Ordering::SeqCst), after_first);
        assert_eq!(again.profile(), parser.profile());
        assert_eq!(parser.profiles.len(), 1);

        let other = parser.with_options(NumberFormatOptions::percent("fr-FR")).unwrap();
        assert!(other.provider().calls.load(Ordering::SeqCst) > after_first);
        assert_eq!(parser.profiles.len(), 2);
    }

    #[test]
    fn test_invalid_options_fail_construction() {
        let options = NumberFormatOptions::new("en-US")
            .with_minimum_fraction_digits(4)
            .with_maximum_fraction_digits(2);
        assert!(matches!(
            create_number_parser(options),
            Err(LocaleError::InvalidOptions(_))
        ));

        let options = NumberFormatOptions::new("en-US").with_maximum_fraction_digits(21);
        assert!(matches!(
            create_number_parser(options),
            Err(LocaleError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_percent_parse_is_exact() {
        let parser = create_number_parser(NumberFormatOptions::percent("en-US")).unwrap();
        assert_eq!(parser.parse("12%").unwrap(), 0.12);
        assert_eq!(parser.parse("7%").unwrap(), 0.07);
        assert_eq!(parser.parse("-0.5%").unwrap(), -0.005);
        assert_eq!(parser.parse("1,200%").unwrap(), 12.0);
    }

    #[test]
    fn test_parse_failure_carries_candidate() {
        let parser = create_number_parser(NumberFormatOptions::new("en-US")).unwrap();
        assert_eq!(parser.parse("12.34.56"), Err(ParseFailure::new("12.34.56")));
        assert_eq!(parser.parse("  "), Err(ParseFailure::new("")));
    }

    #[test]
    fn test_engine_is_shareable() {
        let parser = Arc::new(create_number_parser(NumberFormatOptions::new("de-DE")).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = Arc::clone(&parser);
                std::thread::spawn(move || {
                    let value = f64::from(i) * 1000.5;
                    let text = parser.format(value).unwrap();
                    parser.parse(&text).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), i as f64 * 1000.5);
        }
    }

    #[test]
    fn test_table_provider_can_back_an_engine() {
        let parser = NumberParser::with_provider(
            NumberFormatOptions::new("de-DE"),
            EmbeddedLocaleProvider::default(),
        )
        .unwrap();
        assert_eq!(parser.parse("1.234,5").unwrap(), 1234.5);

        let default = create_number_parser(NumberFormatOptions::new("de-DE")).unwrap();
        assert_eq!(parser.profile(), default.profile());
    }
}
