//! Locale text to canonical numeral
//!
//! Normalization only rewrites characters; deciding whether the result is a
//! number is left to [`crate::parser::numeral`].

use crate::types::LocaleProfile;

const MINUS_SIGN: char = '\u{2212}';

/// Take a sign written at the start of `rest`, mapping locale minus signs to `-`
fn take_sign(rest: &mut &str, profile: &LocaleProfile) -> Option<char> {
    let minus = profile.minus_sign.as_str();
    let (sign, len) = if !minus.is_empty() && rest.starts_with(minus) {
        ('-', minus.len())
    } else if rest.starts_with('-') {
        ('-', 1)
    } else if rest.starts_with(MINUS_SIGN) {
        ('-', MINUS_SIGN.len_utf8())
    } else if rest.starts_with('+') {
        ('+', 1)
    } else {
        return None;
    };

    *rest = rest[len..].trim_start();
    Some(sign)
}

fn strip_leading<'a>(rest: &'a str, affix: &str) -> &'a str {
    if affix.is_empty() {
        return rest;
    }
    rest.strip_prefix(affix).map_or(rest, str::trim_start)
}

fn strip_trailing<'a>(rest: &'a str, affix: &str) -> &'a str {
    if affix.is_empty() {
        return rest;
    }
    rest.strip_suffix(affix).map_or(rest, str::trim_end)
}

/// Normalize locale-formatted text into a canonical candidate numeral
///
/// Bidi controls are dropped, the style prefix and suffix are removed when
/// present, whitespace is trimmed, digit glyphs become ASCII digits, grouping
/// separators disappear and the decimal separator becomes `.`. A sign found
/// before or just after the prefix is moved to the front.
///
/// # Examples
/// ```
/// use locale_number::create_number_parser;
/// use locale_number::parser::normalize;
/// use locale_number::types::NumberFormatOptions;
///
/// let parser = create_number_parser(NumberFormatOptions::new("ar-EG")).unwrap();
/// assert_eq!(normalize("١٬٢٣٤٫٥", parser.profile()), "1234.5");
/// ```
pub fn normalize(raw: &str, profile: &LocaleProfile) -> String {
    let stripped = profile.strip_bidi(raw);
    let prefix = profile.prefix_core();
    let suffix = profile.suffix_core();

    let mut rest = stripped.trim();
    let mut sign = take_sign(&mut rest, profile);
    rest = strip_leading(rest, &prefix);
    if sign.is_none() {
        sign = take_sign(&mut rest, profile);
    }
    rest = strip_trailing(rest, &suffix).trim();

    let mut canonical = String::with_capacity(rest.len() + 1);
    if let Some(sign) = sign {
        canonical.push(sign);
    }

    let group_is_space = profile
        .grouping_separator
        .chars()
        .all(char::is_whitespace)
        && !profile.grouping_separator.is_empty();

    let translated: String = rest
        .chars()
        .filter(|c| !(group_is_space && c.is_whitespace()))
        .map(|c| profile.digit_map.to_ascii(c).unwrap_or(c))
        .collect();

    let ungrouped = if profile.grouping_separator.is_empty() || group_is_space {
        translated
    } else {
        translated.replace(profile.grouping_separator.as_str(), "")
    };

    if profile.decimal_separator.is_empty() || profile.decimal_separator == "." {
        canonical.push_str(&ungrouped);
    } else {
        canonical.push_str(&ungrouped.replace(profile.decimal_separator.as_str(), "."));
    }

    canonical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DigitMap;

    fn profile(decimal: &str, group: &str) -> LocaleProfile {
        LocaleProfile {
            decimal_separator: decimal.to_string(),
            grouping_separator: group.to_string(),
            minus_sign: "-".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_separators() {
        let p = profile(",", ".");
        assert_eq!(normalize(" 1.234.567,89 ", &p), "1234567.89");
        assert_eq!(normalize("-0,5", &p), "-0.5");
    }

    #[test]
    fn test_space_grouping_accepts_any_space() {
        let p = profile(",", "\u{202F}");
        assert_eq!(normalize("1\u{202F}234 567,5", &p), "1234567.5");
    }

    #[test]
    fn test_affixes_and_signs() {
        let mut p = profile(".", ",");
        p.prefix = "$".to_string();
        assert_eq!(normalize("$1,234.50", &p), "1234.50");
        assert_eq!(normalize("-$1,234.50", &p), "-1234.50");
        assert_eq!(normalize("$-1,234.50", &p), "-1234.50");
        assert_eq!(normalize("1,234.50", &p), "1234.50");
        assert_eq!(normalize("\u{2212}7", &p), "-7");
    }

    #[test]
    fn test_digit_map_and_bidi() {
        let mut p = profile("\u{066B}", "\u{066C}");
        p.digit_map = DigitMap::from_glyphs([
            '٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩',
        ])
        .unwrap();
        p.bidi_strip_set.insert('\u{061C}');
        assert_eq!(normalize("\u{061C}-١٬٢٣٤٫٥", &p), "-1234.5");
    }

    #[test]
    fn test_residue_is_kept() {
        let p = profile(".", ",");
        assert_eq!(normalize("12.34.56", &p), "12.34.56");
        assert_eq!(normalize("   ", &p), "");
        assert_eq!(normalize("--5", &p), "--5");
    }
}
