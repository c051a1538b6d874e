//! Locale data for number rendering
//!
//! This module defines the [`LocaleDataProvider`] capability the engine probes
//! and two built-in providers:
//!
//! - [`IcuLocaleProvider`] formats with ICU4X and its compiled CLDR data, using
//!   the embedded tables only for style affixes and currency symbols.
//! - [`EmbeddedLocaleProvider`] renders entirely from CLDR-shaped tables
//!   embedded as TOML. Extra tables can be layered on top at runtime.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};

use icu::locale::Locale;
use icu::locale::extensions::unicode::Key;
use serde::Deserialize;

use crate::error::{DataError, ProviderError};
use crate::formatter::render::{ResolvedFormat, render_number};
use crate::parser::parse_number_pattern;
use crate::types::{DigitMap, MAX_FRACTION_DIGITS, NumberFormatOptions, NumberStyle, NumberSymbols};

mod cldr;

pub use cldr::IcuLocaleProvider;

/// Parse a tag into an ICU locale after normalizing `_` separators
pub(crate) fn parse_locale(tag: &str) -> Option<Locale> {
    let normalized = tag.trim().replace('_', "-");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<Locale>().ok()
}

/// A locale-aware number rendering primitive
///
/// This is the only place locale behavior enters the engine: profiles are
/// derived by rendering known numbers through it.
pub trait LocaleDataProvider {
    /// Render `value` as locale-formatted text
    fn render(&self, value: f64, options: &NumberFormatOptions) -> Result<String, ProviderError>;
}

impl<P: LocaleDataProvider + ?Sized> LocaleDataProvider for Arc<P> {
    fn render(&self, value: f64, options: &NumberFormatOptions) -> Result<String, ProviderError> {
        (**self).render(value, options)
    }
}

/// A parsed BCP-47 tag, reduced to what number rendering needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    /// Lowercase language subtag, e.g. `ar`
    pub language: String,
    /// Titlecase script subtag, e.g. `Latn`
    pub script: Option<String>,
    /// Uppercase region subtag, e.g. `EG`
    pub region: Option<String>,
    /// Value of the `-u-nu-` extension keyword
    pub numbering_system: Option<String>,
}

impl LanguageTag {
    /// Parse a BCP-47 tag; `_` is accepted as a separator
    ///
    /// Returns `None` for malformed tags.
    pub fn parse(tag: &str) -> Option<Self> {
        parse_locale(tag).map(|locale| Self::from_locale(&locale))
    }

    /// Reduce an ICU locale to the parts number rendering needs
    pub fn from_locale(locale: &Locale) -> Self {
        Self {
            language: locale.id.language.to_string(),
            script: locale.id.script.as_ref().map(ToString::to_string),
            region: locale.id.region.as_ref().map(ToString::to_string),
            numbering_system: "nu"
                .parse::<Key>()
                .ok()
                .and_then(|nu| locale.extensions.unicode.keywords.get(&nu))
                .map(ToString::to_string),
        }
    }

    /// Keys to look up, most general first
    pub fn lookup_chain(&self) -> Vec<String> {
        let mut chain = vec![self.language.clone()];
        if let Some(region) = &self.region {
            chain.push(format!("{}-{}", self.language, region));
        }
        if let Some(script) = &self.script {
            chain.push(format!("{}-{}", self.language, script));
            if let Some(region) = &self.region {
                chain.push(format!("{}-{}-{}", self.language, script, region));
            }
        }
        chain
    }

    /// Canonical key form without extensions
    pub fn key(&self) -> String {
        self.lookup_chain().pop().unwrap_or_default()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())?;
        if let Some(nu) = &self.numbering_system {
            write!(f, "-u-nu-{nu}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SymbolsEntry {
    decimal: Option<String>,
    group: Option<String>,
    minus: Option<String>,
    plus: Option<String>,
    percent: Option<String>,
}

impl SymbolsEntry {
    fn overlay(&mut self, other: &SymbolsEntry) {
        let fields = [
            (&mut self.decimal, &other.decimal),
            (&mut self.group, &other.group),
            (&mut self.minus, &other.minus),
            (&mut self.plus, &other.plus),
            (&mut self.percent, &other.percent),
        ];
        for (mine, theirs) in fields {
            if theirs.is_some() {
                mine.clone_from(theirs);
            }
        }
    }

    fn apply_to(&self, symbols: &mut NumberSymbols) {
        let fields = [
            (&mut symbols.decimal, &self.decimal),
            (&mut symbols.group, &self.group),
            (&mut symbols.minus, &self.minus),
            (&mut symbols.plus, &self.plus),
            (&mut symbols.percent, &self.percent),
        ];
        for (target, value) in fields {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PatternsEntry {
    decimal: Option<String>,
    percent: Option<String>,
    currency: Option<String>,
}

impl PatternsEntry {
    fn overlay(&mut self, other: &PatternsEntry) {
        let fields = [
            (&mut self.decimal, &other.decimal),
            (&mut self.percent, &other.percent),
            (&mut self.currency, &other.currency),
        ];
        for (mine, theirs) in fields {
            if theirs.is_some() {
                mine.clone_from(theirs);
            }
        }
    }

    fn for_style(&self, style: NumberStyle) -> Option<&str> {
        match style {
            NumberStyle::Decimal => self.decimal.as_deref(),
            NumberStyle::Percent => self.percent.as_deref(),
            NumberStyle::Currency => self.currency.as_deref(),
        }
    }

    fn all(&self) -> impl Iterator<Item = &str> {
        [&self.decimal, &self.percent, &self.currency]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }
}

/// One locale table; every field is optional so regional tables only carry
/// their differences from the language table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LocaleEntry {
    numbering: Option<String>,
    min_grouping: Option<u8>,
    symbols: HashMap<String, SymbolsEntry>,
    patterns: HashMap<String, PatternsEntry>,
    currency_symbols: HashMap<String, String>,
}

impl LocaleEntry {
    fn overlay(&mut self, other: &LocaleEntry) {
        if other.numbering.is_some() {
            self.numbering.clone_from(&other.numbering);
        }
        if other.min_grouping.is_some() {
            self.min_grouping = other.min_grouping;
        }
        for (system, symbols) in &other.symbols {
            self.symbols.entry(system.clone()).or_default().overlay(symbols);
        }
        for (system, patterns) in &other.patterns {
            self.patterns.entry(system.clone()).or_default().overlay(patterns);
        }
        for (code, symbol) in &other.currency_symbols {
            self.currency_symbols.insert(code.clone(), symbol.clone());
        }
    }
}

/// Raw TOML layout
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LocaleData {
    numbering: HashMap<String, String>,
    currencies: HashMap<String, u8>,
    locales: HashMap<String, LocaleEntry>,
}

/// Validated locale tables
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    numbering: HashMap<String, DigitMap>,
    currencies: HashMap<String, u8>,
    locales: HashMap<String, LocaleEntry>,
}

type DataResult<T> = Result<T, DataError>;

impl LocaleRegistry {
    /// Parse and validate locale tables from TOML
    pub fn from_toml_str(toml_str: &str) -> DataResult<Self> {
        let mut registry = Self::default();
        registry.merge_toml_str(toml_str)?;
        Ok(registry)
    }

    /// Layer additional tables over the current ones
    pub fn merge_toml_str(&mut self, toml_str: &str) -> DataResult<()> {
        let data: LocaleData = toml::from_str(toml_str)?;

        for (system, glyphs) in data.numbering {
            let glyphs: Vec<char> = glyphs.chars().collect();
            let digits = <[char; 10]>::try_from(glyphs)
                .ok()
                .and_then(DigitMap::from_glyphs)
                .ok_or_else(|| DataError::Invalid {
                    entry: format!("numbering.{system}"),
                    reason: "expected ten distinct digit glyphs".to_string(),
                })?;
            self.numbering.insert(system, digits);
        }

        for (code, digits) in data.currencies {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(DataError::Invalid {
                    entry: format!("currencies.{code}"),
                    reason: "currency codes are three uppercase letters".to_string(),
                });
            }
            self.currencies.insert(code, digits);
        }

        for (tag, entry) in data.locales {
            let key = LanguageTag::parse(&tag)
                .map(|t| t.key())
                .ok_or_else(|| DataError::Invalid {
                    entry: format!("locales.{tag}"),
                    reason: "not a valid locale tag".to_string(),
                })?;

            for patterns in entry.patterns.values() {
                for pattern in patterns.all() {
                    parse_number_pattern(pattern).map_err(|reason| DataError::Invalid {
                        entry: format!("locales.{tag}"),
                        reason,
                    })?;
                }
            }
            if let Some(system) = &entry.numbering {
                if !self.numbering.contains_key(system) {
                    return Err(DataError::Invalid {
                        entry: format!("locales.{tag}"),
                        reason: format!("unknown numbering system '{system}'"),
                    });
                }
            }

            self.locales.entry(key).or_default().overlay(&entry);
        }

        Ok(())
    }

    /// Locale keys with a table of their own
    pub fn locales(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.locales.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// ISO 4217 minor unit digits for a currency code
    ///
    /// Any well-formed code (three ASCII letters) is accepted. Codes without a
    /// table entry use two digits. Returns `None` for malformed codes.
    pub fn currency_digits(&self, code: &str) -> Option<u8> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let code = code.to_ascii_uppercase();
        Some(self.currencies.get(&code).copied().unwrap_or(2))
    }

    fn entry_for(&self, tag: &LanguageTag) -> Option<LocaleEntry> {
        let mut found = false;
        let mut merged = LocaleEntry::default();
        for key in tag.lookup_chain() {
            if let Some(entry) = self.locales.get(&key) {
                merged.overlay(entry);
                found = true;
            }
        }
        found.then_some(merged)
    }
}

// Global registry for the embedded tables
static EMBEDDED_REGISTRY: OnceLock<Arc<LocaleRegistry>> = OnceLock::new();

fn embedded_registry() -> Arc<LocaleRegistry> {
    EMBEDDED_REGISTRY
        .get_or_init(|| {
            let data = include_str!("locale/locale_data.toml");
            match LocaleRegistry::from_toml_str(data) {
                Ok(registry) => Arc::new(registry),
                Err(e) => {
                    log::error!("Failed to load embedded locale data: {}", e);
                    Arc::new(LocaleRegistry::default())
                }
            }
        })
        .clone()
}

/// Provider backed by the embedded locale tables
#[derive(Debug, Clone)]
pub struct EmbeddedLocaleProvider {
    registry: Arc<LocaleRegistry>,
}

impl Default for EmbeddedLocaleProvider {
    fn default() -> Self {
        Self {
            registry: embedded_registry(),
        }
    }
}

impl EmbeddedLocaleProvider {
    /// Provider over the embedded tables with `toml_str` layered on top
    ///
    /// ```
    /// use locale_number::locale::{EmbeddedLocaleProvider, LocaleDataProvider};
    /// use locale_number::types::NumberFormatOptions;
    ///
    /// let provider = EmbeddedLocaleProvider::with_extra_data(
    ///     "[locales.en-ZA.symbols.latn]\ndecimal = \",\"\ngroup = \"\\u00A0\"",
    /// )
    /// .unwrap();
    /// let text = provider.render(1234.5, &NumberFormatOptions::new("en-ZA")).unwrap();
    /// assert_eq!(text, "1\u{00A0}234,5");
    /// ```
    pub fn with_extra_data(toml_str: &str) -> Result<Self, DataError> {
        let mut registry = (*embedded_registry()).clone();
        registry.merge_toml_str(toml_str).inspect_err(|e| {
            log::warn!("Rejected extra locale data: {}", e);
        })?;
        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    /// Provider over a registry built elsewhere
    pub fn from_registry(registry: LocaleRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// List all locale identifiers with a table of their own
    pub fn list_available_locales(&self) -> Vec<String> {
        self.registry.locales()
    }

    /// Resolve options into everything needed to render a number
    pub fn resolve(
        &self,
        options: &NumberFormatOptions,
    ) -> Result<ResolvedFormat, ProviderError> {
        let tag = LanguageTag::parse(&options.locale)
            .ok_or_else(|| ProviderError::UnknownLocale(options.locale.clone()))?;
        let entry = self
            .registry
            .entry_for(&tag)
            .ok_or_else(|| ProviderError::UnknownLocale(options.locale.clone()))?;
        self.registry.resolve_entry(&tag, &entry, options)
    }
}

impl LocaleRegistry {
    /// Build a resolved format from an already merged locale table
    fn resolve_entry(
        &self,
        tag: &LanguageTag,
        entry: &LocaleEntry,
        options: &NumberFormatOptions,
    ) -> Result<ResolvedFormat, ProviderError> {
        let system = match tag.numbering_system.as_deref() {
            Some(requested) if self.numbering.contains_key(requested) => requested,
            requested => {
                if let Some(requested) = requested {
                    log::debug!("Ignoring unknown numbering system '{}'", requested);
                }
                entry.numbering.as_deref().unwrap_or("latn")
            }
        };
        let digits = self
            .numbering
            .get(system)
            .copied()
            .or_else(|| (system == "latn").then(DigitMap::ascii))
            .ok_or_else(|| ProviderError::Data(format!("unknown numbering system '{system}'")))?;

        let mut symbols = NumberSymbols::default();
        let mut patterns = PatternsEntry {
            decimal: Some("#,##0.###".to_string()),
            percent: Some("#,##0%".to_string()),
            currency: Some("¤#,##0.00".to_string()),
        };
        for layer in ["latn", system] {
            if let Some(layer_symbols) = entry.symbols.get(layer) {
                layer_symbols.apply_to(&mut symbols);
            }
            if let Some(layer_patterns) = entry.patterns.get(layer) {
                patterns.overlay(layer_patterns);
            }
        }

        let pattern_text = patterns.for_style(options.style).unwrap_or("#,##0.###");
        let pattern = parse_number_pattern(pattern_text).map_err(ProviderError::Data)?;

        let (currency_symbol, default_digits) = match options.style {
            NumberStyle::Currency => {
                let code = options
                    .currency
                    .as_deref()
                    .ok_or(ProviderError::MissingCurrency)?;
                let digits = self
                    .currency_digits(code)
                    .ok_or_else(|| ProviderError::UnknownCurrency(code.to_string()))?;
                let upper = code.to_ascii_uppercase();
                let symbol = entry
                    .currency_symbols
                    .get(&upper)
                    .cloned()
                    .unwrap_or(upper);
                (Some(symbol), (digits, digits))
            }
            _ => (
                None,
                (
                    pattern.positive.min_fraction_digits,
                    pattern.positive.max_fraction_digits,
                ),
            ),
        };

        let (min_fraction_digits, max_fraction_digits) = resolve_fraction_digits(
            options.minimum_fraction_digits,
            options.maximum_fraction_digits,
            default_digits,
        )?;

        Ok(ResolvedFormat {
            style: options.style,
            digits,
            symbols,
            pattern,
            currency_symbol,
            min_fraction_digits,
            max_fraction_digits,
            use_grouping: options.use_grouping,
            min_grouping_digits: entry.min_grouping.unwrap_or(1),
        })
    }
}

/// Combine requested fraction digits with the style defaults
///
/// A lone minimum raises the default maximum, a lone maximum lowers the
/// default minimum.
fn resolve_fraction_digits(
    min: Option<u8>,
    max: Option<u8>,
    (default_min, default_max): (u8, u8),
) -> Result<(u8, u8), ProviderError> {
    let out_of_range = |d: u8| d > MAX_FRACTION_DIGITS;
    if min.is_some_and(out_of_range) || max.is_some_and(out_of_range) {
        return Err(ProviderError::InvalidOptions(format!(
            "fraction digits must be between 0 and {MAX_FRACTION_DIGITS}"
        )));
    }

    match (min, max) {
        (None, None) => Ok((default_min, default_max)),
        (Some(min), None) => Ok((min, default_max.max(min))),
        (None, Some(max)) => Ok((default_min.min(max), max)),
        (Some(min), Some(max)) if min <= max => Ok((min, max)),
        (Some(min), Some(max)) => Err(ProviderError::InvalidOptions(format!(
            "minimumFractionDigits ({min}) exceeds maximumFractionDigits ({max})"
        ))),
    }
}

impl LocaleDataProvider for EmbeddedLocaleProvider {
    fn render(
        &self,
        value: f64,
        options: &NumberFormatOptions,
    ) -> Result<String, ProviderError> {
        let resolved = self.resolve(options)?;
        Ok(render_number(value, &resolved))
    }
}

/// Group locale keys by language, e.g. `ar` -> [`ar`, `ar-MA`]
pub fn locales_by_language(provider: &EmbeddedLocaleProvider) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for key in provider.list_available_locales() {
        let language = key.split('-').next().unwrap_or(&key).to_string();
        grouped.entry(language).or_default().push(key);
    }
    grouped
}
