use locale_number::{FormatError, NumberFormatOptions, create_number_parser};

fn fmt(options: NumberFormatOptions, value: f64) -> String {
    create_number_parser(options).unwrap().format(value).unwrap()
}

#[test]
fn test_basic_decimal() {
    assert_eq!(fmt(NumberFormatOptions::new("en-US"), 1234567.891), "1,234,567.891");
    assert_eq!(fmt(NumberFormatOptions::new("en-US"), 0.1234), "0.123");
    assert_eq!(fmt(NumberFormatOptions::new("en-US"), -42.0), "-42");
    assert_eq!(fmt(NumberFormatOptions::new("de-DE"), 1234567.891), "1.234.567,891");
    assert_eq!(fmt(NumberFormatOptions::new("fr-FR"), 1234567.891), "1\u{202F}234\u{202F}567,891");
    assert_eq!(fmt(NumberFormatOptions::new("de-CH"), 1234567.891), "1’234’567.891");
}

#[test]
fn test_fraction_digit_options() {
    let options = NumberFormatOptions::new("en-US").with_minimum_fraction_digits(2);
    assert_eq!(fmt(options.clone(), 5.0), "5.00");
    assert_eq!(fmt(options, 5.12345), "5.123");

    let options = NumberFormatOptions::new("en-US").with_maximum_fraction_digits(0);
    assert_eq!(fmt(options.clone(), 2.5), "3");
    assert_eq!(fmt(options, -2.5), "-3");

    let options = NumberFormatOptions::new("en-US")
        .with_minimum_fraction_digits(1)
        .with_maximum_fraction_digits(4);
    assert_eq!(fmt(options, 3.14159), "3.1416");
}

#[test]
fn test_grouping_toggle() {
    let options = NumberFormatOptions::new("en-US").with_grouping(false);
    assert_eq!(fmt(options.clone(), 1234567.0), "1234567");

    // parsing still accepts grouped input
    let parser = create_number_parser(options).unwrap();
    assert_eq!(parser.parse("1,234,567").unwrap(), 1234567.0);
}

#[test]
fn test_minimum_grouping_digits() {
    assert_eq!(fmt(NumberFormatOptions::new("es-ES"), 1234.0), "1234");
    assert_eq!(fmt(NumberFormatOptions::new("es-ES"), 12345.0), "12.345");
    assert_eq!(fmt(NumberFormatOptions::new("es-MX"), 12345.0), "12,345");
    assert_eq!(fmt(NumberFormatOptions::new("pl-PL"), 1234.0), "1234");
    assert_eq!(fmt(NumberFormatOptions::new("pl-PL"), 12345.0), "12\u{00A0}345");
}

#[test]
fn test_indian_grouping() {
    assert_eq!(fmt(NumberFormatOptions::new("en-IN"), 12345678.9), "1,23,45,678.9");
    assert_eq!(fmt(NumberFormatOptions::new("hi-IN-u-nu-deva"), 1234567.0), "१२,३४,५६७");
    assert_eq!(
        fmt(NumberFormatOptions::currency("en-IN", "INR"), 1234567.0),
        "₹12,34,567.00"
    );
}

#[test]
fn test_minus_signs() {
    assert_eq!(fmt(NumberFormatOptions::new("sv-SE"), -1234.5), "\u{2212}1\u{00A0}234,5");
    assert_eq!(fmt(NumberFormatOptions::new("he-IL"), -3.0), "\u{200E}-3");
    assert_eq!(fmt(NumberFormatOptions::new("ar-EG"), -3.0), "\u{061C}-٣");
}

#[test]
fn test_currency() {
    assert_eq!(fmt(NumberFormatOptions::currency("en-US", "USD"), 1234.5), "$1,234.50");
    assert_eq!(fmt(NumberFormatOptions::currency("en-US", "USD"), -1234.5), "-$1,234.50");
    assert_eq!(fmt(NumberFormatOptions::currency("en-US", "JPY"), 1234.5), "¥1,235");
    assert_eq!(fmt(NumberFormatOptions::currency("en-US", "KWD"), 1.5), "KWD\u{00A0}1.500");
    assert_eq!(fmt(NumberFormatOptions::currency("en-US", "chf"), 1.5), "CHF\u{00A0}1.50");
    assert_eq!(fmt(NumberFormatOptions::currency("de-DE", "EUR"), 1234.5), "1.234,50\u{00A0}€");
    assert_eq!(fmt(NumberFormatOptions::currency("ja-JP", "JPY"), 1234.0), "￥1,234");
    assert_eq!(fmt(NumberFormatOptions::currency("nl-NL", "EUR"), -5.0), "€\u{00A0}-5,00");
    assert_eq!(fmt(NumberFormatOptions::currency("en-CA", "CAD"), 5.0), "$5.00");
    assert_eq!(fmt(NumberFormatOptions::currency("en-US", "CAD"), 5.0), "CA$5.00");
}

#[test]
fn test_percent() {
    assert_eq!(fmt(NumberFormatOptions::percent("en-US"), 0.256), "26%");
    assert_eq!(fmt(NumberFormatOptions::percent("de-DE"), 0.256), "26\u{00A0}%");
    assert_eq!(fmt(NumberFormatOptions::percent("tr-TR"), 0.5), "%50");
    assert_eq!(
        fmt(NumberFormatOptions::percent("en-US").with_maximum_fraction_digits(1), 0.2567),
        "25.7%"
    );
    assert_eq!(fmt(NumberFormatOptions::percent("ar-EG"), 0.5), "٥٠٪\u{061C}");
}

#[test]
fn test_non_finite_values() {
    let parser = create_number_parser(NumberFormatOptions::new("en-US")).unwrap();
    assert!(matches!(parser.format(f64::NAN), Err(FormatError::InvalidNumber(_))));
    assert!(matches!(parser.format(f64::INFINITY), Err(FormatError::InvalidNumber(_))));
}

#[test]
fn test_with_options_shares_provider() {
    let parser = create_number_parser(NumberFormatOptions::new("it-IT")).unwrap();
    let currency = parser
        .with_options(NumberFormatOptions::currency("it-IT", "EUR"))
        .unwrap();
    assert_eq!(currency.format(1234.5).unwrap(), "1.234,50\u{00A0}€");
    assert_eq!(currency.options().currency.as_deref(), Some("EUR"));
}
