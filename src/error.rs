//! Error types
//!
//! Construction-time failures abort engine creation, formatting failures are
//! caller errors, and parse failures are ordinary return values.

use thiserror::Error;

/// Fatal errors raised while creating an engine or resolving a locale profile
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The locale tag is malformed or unknown to the provider
    #[error("invalid locale tag '{0}'")]
    InvalidLocale(String),

    /// Currency style without a currency code, or with one the provider rejects
    #[error("unsupported currency: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnsupportedCurrency(Option<String>),

    /// Fraction digit bounds out of range or inconsistent
    #[error("invalid number format options: {0}")]
    InvalidOptions(String),

    /// The provider's output does not have the shape probing relies on
    #[error("locale '{locale}' produced an unusable profile: {reason}")]
    MalformedProfile {
        /// The locale tag being resolved
        locale: String,
        /// What was wrong with the probe output
        reason: String,
    },
}

/// Errors raised by [`NumberParser::format`](crate::engine::NumberParser::format)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// NaN or an infinity was passed in
    #[error("cannot format non-finite value {0}")]
    InvalidNumber(f64),

    /// The provider refused to render the value
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Input text that could not be read as a number
///
/// Carries the normalized text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{rejected}' is not a number")]
pub struct ParseFailure {
    /// Canonical candidate string produced by normalization
    pub rejected: String,
}

impl ParseFailure {
    pub fn new(rejected: impl Into<String>) -> Self {
        Self {
            rejected: rejected.into(),
        }
    }
}

/// Errors at the [`LocaleDataProvider`](crate::locale::LocaleDataProvider) boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("locale not found: {0}")]
    UnknownLocale(String),

    #[error("currency style requires a currency code")]
    MissingCurrency,

    #[error("currency not found: {0}")]
    UnknownCurrency(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Locale data exists but cannot be used, e.g. an unparsable pattern
    #[error("bad locale data: {0}")]
    Data(String),
}

/// Errors while loading locale tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("error parsing locale data: {0}")]
    Parse(String),

    #[error("locale data entry '{entry}' is invalid: {reason}")]
    Invalid { entry: String, reason: String },
}

impl From<toml::de::Error> for DataError {
    fn from(err: toml::de::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

impl LocaleError {
    /// Maps a provider failure raised while resolving `locale`
    pub fn from_provider(err: ProviderError, locale: &str) -> Self {
        match err {
            ProviderError::UnknownLocale(tag) => LocaleError::InvalidLocale(tag),
            ProviderError::MissingCurrency => LocaleError::UnsupportedCurrency(None),
            ProviderError::UnknownCurrency(code) => LocaleError::UnsupportedCurrency(Some(code)),
            ProviderError::InvalidOptions(reason) => LocaleError::InvalidOptions(reason),
            ProviderError::Data(reason) => LocaleError::MalformedProfile {
                locale: locale.to_string(),
                reason,
            },
        }
    }
}
