//! Number formatting module
//!
//! Formatting is a thin delegation to a [`LocaleDataProvider`]: the provider owns
//! affix placement, spacing and bidi marks. The main entry point is the
//! `format_number` function; `render` holds the digit-level rendering used by the
//! embedded provider and the affix assembly both built-in providers share.

pub mod render;

use crate::error::FormatError;
use crate::locale::LocaleDataProvider;
use crate::types::NumberFormatOptions;

/// Format a number with a provider and a set of options
///
/// # Arguments
/// * `value` - The numeric value to format, must be finite
/// * `options` - Locale, style and digit options
/// * `provider` - The locale data provider that renders the text
///
/// # Examples
/// ```
/// use locale_number::formatter::format_number;
/// use locale_number::locale::EmbeddedLocaleProvider;
/// use locale_number::types::NumberFormatOptions;
///
/// let provider = EmbeddedLocaleProvider::default();
/// let options = NumberFormatOptions::new("de-DE");
/// assert_eq!(format_number(1234.5, &options, &provider).unwrap(), "1.234,5");
/// ```
pub fn format_number<P>(
    value: f64,
    options: &NumberFormatOptions,
    provider: &P,
) -> Result<String, FormatError>
where
    P: LocaleDataProvider + ?Sized,
{
    if !value.is_finite() {
        return Err(FormatError::InvalidNumber(value));
    }

    Ok(provider.render(value, options)?)
}
