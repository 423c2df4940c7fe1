//! Lenient rate scanning over raw response text.
//!
//! The payload is never parsed as a document. The first `"<CODE>":<number>`
//! pair anywhere in the text wins, so a code that also appears as a key in an
//! unrelated section earlier in the body shadows the real rate. Frankfurter
//! payloads only carry the requested codes under `rates`, which keeps this
//! safe in practice.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Returns the rate recorded for `code` in `body`, or `None` when no
/// `"<code>":<number>` pair is present or the number does not parse.
pub fn extract_rate(body: &str, code: &str) -> Option<Decimal> {
    let pattern = format!(
        r#""{}"\s*:\s*(\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)"#,
        regex::escape(code)
    );
    let re = Regex::new(&pattern).ok()?;
    let number = re.captures(body)?.get(1)?.as_str();

    let rate = Decimal::from_str(number)
        .or_else(|_| Decimal::from_scientific(number))
        .ok();
    if rate.is_none() {
        debug!(code, number, "Matched rate is not a valid decimal");
    }
    rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    #[test]
    fn test_extracts_nested_rate() {
        let body = r#"{"base":"USD","rates":{"INR":83.12}}"#;
        assert_eq!(extract_rate(body, "INR"), Some(d("83.12")));
    }

    #[test]
    fn test_missing_code_is_not_found() {
        let body = r#"{"base":"USD","rates":{"EUR":0.92}}"#;
        assert_eq!(extract_rate(body, "INR"), None);
        assert_eq!(extract_rate("", "INR"), None);
        assert_eq!(extract_rate("<html>Bad Gateway</html>", "INR"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let body = r#"{"INR":1.0,"rates":{"EUR":0.92,"INR":83.12}}"#;
        assert_eq!(extract_rate(body, "INR"), Some(d("1.0")));
    }

    #[test]
    fn test_string_value_is_not_a_rate() {
        // "base":"USD" must not be read as a rate for USD.
        let body = r#"{"amount":1.0,"base":"USD","date":"2024-01-15","rates":{"USD":1.08}}"#;
        assert_eq!(extract_rate(body, "USD"), Some(d("1.08")));
        assert_eq!(extract_rate(r#"{"base":"USD"}"#, "USD"), None);
    }

    #[test]
    fn test_tolerates_whitespace_and_pretty_printing() {
        let body = "{\n  \"rates\": {\n    \"JPY\" : 149.5\n  }\n}";
        assert_eq!(extract_rate(body, "JPY"), Some(d("149.5")));
    }

    #[test]
    fn test_integer_and_scientific_values() {
        assert_eq!(extract_rate(r#"{"rates":{"JPY":150}}"#, "JPY"), Some(d("150")));
        assert_eq!(
            extract_rate(r#"{"rates":{"USD":6.1e-5}}"#, "USD"),
            Some(d("0.000061"))
        );
    }

    #[test]
    fn test_code_is_matched_literally() {
        let body = r#"{"rates":{"INRX":2.0,"INR":83.0}}"#;
        assert_eq!(extract_rate(body, "INR"), Some(d("83.0")));
    }
}
