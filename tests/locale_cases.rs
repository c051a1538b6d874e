use locale_number::{NumberFormatOptions, create_number_parser};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct TestCase {
    options: NumberFormatOptions,
    value: f64,
    formatted: Option<String>,
    #[serde(default)]
    inputs: Vec<String>,
    #[serde(default)]
    rejects: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TestCases {
    cases: Vec<TestCase>,
}

fn run_test_case(case: &TestCase) -> Result<(), String> {
    let parser = create_number_parser(case.options.clone())
        .map_err(|e| format!("Engine creation error for {:?}: {}", case.options, e))?;

    if let Some(expected) = &case.formatted {
        let result = parser
            .format(case.value)
            .map_err(|e| format!("Format error for {}: {}", case.value, e))?;
        if &result != expected {
            return Err(format!(
                "\n✗ Format mismatch for value: {}\nLocale:     \"{}\"\nExpected:   {:?}\nActual:     {:?}",
                case.value, case.options.locale, expected, result
            ));
        }
        let reparsed = parser
            .parse(&result)
            .map_err(|e| format!("Formatted output {:?} does not parse: {}", result, e))?;
        if reparsed != case.value {
            return Err(format!(
                "\n✗ Round trip of {:?} gave {} instead of {}",
                result, reparsed, case.value
            ));
        }
    }

    for input in &case.inputs {
        match parser.parse(input) {
            Ok(value) if value == case.value => {}
            Ok(value) => {
                return Err(format!(
                    "\n✗ Parse mismatch for input: {:?}\nLocale:     \"{}\"\nExpected:   {}\nActual:     {}",
                    input, case.options.locale, case.value, value
                ));
            }
            Err(e) => {
                return Err(format!(
                    "\n✗ Parse failure for input: {:?}\nLocale:     \"{}\"\nError:      {}",
                    input, case.options.locale, e
                ));
            }
        }
    }

    for reject in &case.rejects {
        if let Ok(value) = parser.parse(reject) {
            return Err(format!(
                "\n✗ Expected {:?} to be rejected for \"{}\", got {}",
                reject, case.options.locale, value
            ));
        }
    }

    Ok(())
}

#[test]
fn test_locale_cases() {
    let toml_path: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("cases.toml");

    let toml_content = fs::read_to_string(&toml_path)
        .unwrap_or_else(|e| panic!("Failed to read TOML file {}: {}", toml_path.display(), e));

    let test_suite: TestCases = toml::from_str(&toml_content)
        .unwrap_or_else(|e| panic!("Failed to parse TOML file {}: {}", toml_path.display(), e));

    let mut failures = Vec::new();
    for (i, case) in test_suite.cases.iter().enumerate() {
        if let Err(msg) = run_test_case(case) {
            failures.push(format!("[Case {}] {}", i + 1, msg));
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        test_suite.cases.len(),
        failures.join("\n")
    );
}
