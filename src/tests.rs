use crate::parser::*;
use crate::types::*;

#[test]
fn test_simple_decimal_pattern() {
    let result = parse_number_pattern("#,##0.###").unwrap();
    assert!(result.positive.prefix.is_empty());
    assert!(result.positive.suffix.is_empty());
    assert_eq!(result.positive.primary_grouping, Some(3));
    assert_eq!(result.positive.secondary_grouping, None);
    assert_eq!(result.positive.min_integer_digits, 1);
    assert_eq!(result.positive.min_fraction_digits, 0);
    assert_eq!(result.positive.max_fraction_digits, 3);
    assert!(result.negative.is_none());
}

#[test]
fn test_explicit_negative_subpattern() {
    let result = parse_number_pattern("¤\u{00A0}#,##0.00;¤\u{00A0}-#,##0.00").unwrap();
    assert_eq!(
        result.positive.prefix,
        vec![
            AffixToken::Currency,
            AffixToken::Literal("\u{00A0}".to_string())
        ]
    );
    let negative = result.negative.as_ref().unwrap();
    assert_eq!(
        negative.prefix,
        vec![
            AffixToken::Currency,
            AffixToken::Literal("\u{00A0}".to_string()),
            AffixToken::Minus
        ]
    );
    assert_eq!(negative.min_fraction_digits, 2);
}

#[test]
fn test_suffix_tokens() {
    let result = parse_number_pattern("#,##0\u{00A0}%").unwrap();
    assert_eq!(
        result.positive.suffix,
        vec![
            AffixToken::Literal("\u{00A0}".to_string()),
            AffixToken::Percent
        ]
    );
    assert_eq!(result.positive.max_fraction_digits, 0);

    let result = parse_number_pattern("\u{200F}#,##0.00\u{00A0}¤").unwrap();
    assert_eq!(
        result.positive.prefix,
        vec![AffixToken::Literal("\u{200F}".to_string())]
    );
    assert_eq!(result.positive.suffix.last(), Some(&AffixToken::Currency));
}

#[test]
fn test_quoted_literals() {
    let result = parse_number_pattern("'#'0' pcs'").unwrap();
    assert_eq!(
        result.positive.prefix,
        vec![AffixToken::Literal("#".to_string())]
    );
    assert_eq!(
        result.positive.suffix,
        vec![AffixToken::Literal(" pcs".to_string())]
    );

    let result = parse_number_pattern("0''").unwrap();
    assert_eq!(
        result.positive.suffix,
        vec![AffixToken::Literal("'".to_string())]
    );
}

#[test]
fn test_secondary_grouping() {
    let result = parse_number_pattern("¤#,##,##0.00").unwrap();
    assert_eq!(result.positive.primary_grouping, Some(3));
    assert_eq!(result.positive.secondary_grouping, Some(2));
}

#[test]
fn test_invalid_patterns() {
    assert!(parse_number_pattern("").is_err());
    assert!(parse_number_pattern("%").is_err());
    assert!(parse_number_pattern("0;0;0").is_err());
    assert!(parse_number_pattern("0.00;").is_err());
}

#[test]
fn test_options_from_toml() {
    let options = NumberFormatOptions::from_toml_str(
        r#"
        locale = "fr-FR"
        style = "percent"
        maximumFractionDigits = 1
        useGrouping = false
        "#,
    )
    .unwrap();
    assert_eq!(options.locale, "fr-FR");
    assert_eq!(options.style, NumberStyle::Percent);
    assert_eq!(options.maximum_fraction_digits, Some(1));
    assert_eq!(options.minimum_fraction_digits, None);
    assert!(!options.use_grouping);

    let defaults = NumberFormatOptions::from_toml_str("locale = \"en\"").unwrap();
    assert_eq!(defaults, NumberFormatOptions::new("en"));

    assert!(NumberFormatOptions::from_toml_str("locale = \"en\"\nrounding = 2").is_err());
    assert!(NumberFormatOptions::from_toml_str("style = \"decimal\"").is_err());
}

#[test]
fn test_digit_map() {
    let ascii = DigitMap::ascii();
    assert!(ascii.is_identity());
    assert_eq!(ascii.to_ascii('7'), Some('7'));
    assert_eq!(ascii.to_ascii('x'), None);

    let arab = DigitMap::from_glyphs(['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩']).unwrap();
    assert!(!arab.is_identity());
    assert_eq!(arab.glyph(3), '٣');
    assert_eq!(arab.to_ascii('٩'), Some('9'));

    assert!(DigitMap::from_glyphs(['0', '1', '2', '3', '4', '5', '6', '7', '8', '0']).is_none());
}
