//! Input normalisation for text and price fields.
//!
//! Every text field is trimmed on the way in, validated, then HTML-escaped
//! before it reaches storage. Prices arrive as text (form bodies carry no
//! types) and are checked untrimmed against a float grammar before being
//! parsed, so `" 3 "` is not a price.

use regex::Regex;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

/// Optional sign, digits with an optional fraction (or a bare fraction), optional exponent.
static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap());

/// Escape the characters that are significant in HTML.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            other => out.push(other),
        }
    }
    out
}

/// Non-empty and made only of ASCII letters and digits.
pub fn is_alphanumeric(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Parse a non-negative, finite price from its text form.
pub fn parse_price(input: &str) -> Option<f64> {
    if !FLOAT.is_match(input) {
        return None;
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

fn error(code: &'static str, message: &'static str, value: &str) -> ValidationError {
    let mut err = ValidationError::new(code).with_message(Cow::Borrowed(message));
    err.add_param(Cow::Borrowed("value"), &value);
    err
}

pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(error("length", "title must not be empty", title));
    }
    Ok(())
}

pub(crate) fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if !is_alphanumeric(user_id) {
        return Err(error(
            "alphanumeric",
            "userId must contain only letters and digits",
            user_id,
        ));
    }
    Ok(())
}

pub(crate) fn validate_price(price: &str) -> Result<(), ValidationError> {
    if parse_price(price).is_none() {
        return Err(error(
            "float",
            "price must be a number greater than or equal to 0",
            price,
        ));
    }
    Ok(())
}

fn scalar_to_text<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) | Value::Object(_) => {
            Err(de::Error::custom("expected a text value, found a list or object"))
        }
    }
}

/// Deserialize any scalar as text, as sent; `null` reads as empty.
pub(crate) fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_text(Value::deserialize(deserializer)?)
}

/// [`scalar_text`] for fields that may be absent.
pub(crate) fn optional_scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(deserializer).map(Some)
}

/// [`scalar_text`] with surrounding whitespace removed.
pub(crate) fn trimmed_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(deserializer).map(|text| text.trim().to_string())
}

/// [`trimmed_text`] for fields that may be absent.
pub(crate) fn optional_trimmed_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    trimmed_text(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_replaces_html_characters() {
        assert_eq!(escape("<b>hi</b>"), "&lt;b&gt;hi&lt;&#x2F;b&gt;");
        assert_eq!(escape(r#"a&b"c'd\e`f"#), "a&amp;b&quot;c&#x27;d&#x5C;e&#96;f");
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn test_is_alphanumeric() {
        assert!(is_alphanumeric("user42"));
        assert!(is_alphanumeric("ABC"));
        assert!(!is_alphanumeric(""));
        assert!(!is_alphanumeric("user-42"));
        assert!(!is_alphanumeric("user 42"));
        assert!(!is_alphanumeric("usér"));
    }

    #[test]
    fn test_parse_price_accepts_float_forms() {
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price("12.5"), Some(12.5));
        assert_eq!(parse_price("+3"), Some(3.0));
        assert_eq!(parse_price(".5"), Some(0.5));
        assert_eq!(parse_price("4."), Some(4.0));
        assert_eq!(parse_price("1e2"), Some(100.0));
        assert_eq!(parse_price("-0"), Some(0.0));
    }

    #[test]
    fn test_parse_price_rejects_invalid() {
        for input in ["", ".", "+", "-", "-1", "abc", "1.2.3", "inf", "NaN", "1e999", " 1"] {
            assert_eq!(parse_price(input), None, "input {input:?}");
        }
    }

    #[test]
    fn test_validators_report_codes() {
        assert!(validate_title("Lamp").is_ok());
        assert_eq!(validate_title("").unwrap_err().code, "length");
        assert_eq!(validate_user_id("a-b").unwrap_err().code, "alphanumeric");
        assert_eq!(validate_price("-1").unwrap_err().code, "float");
    }

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "trimmed_text")]
        text: String,
        #[serde(default, deserialize_with = "optional_trimmed_text")]
        maybe: Option<String>,
        #[serde(default, deserialize_with = "optional_scalar_text")]
        raw: Option<String>,
    }

    #[test]
    fn test_trimmed_text_converts_scalars() {
        let fields: Fields = serde_json::from_str(r#"{"text": "  hi  ", "maybe": 5}"#).unwrap();
        assert_eq!(fields.text, "hi");
        assert_eq!(fields.maybe.as_deref(), Some("5"));

        let fields: Fields = serde_json::from_str(r#"{"text": true}"#).unwrap();
        assert_eq!(fields.text, "true");
        assert_eq!(fields.maybe, None);

        assert!(serde_json::from_str::<Fields>(r#"{"text": [1]}"#).is_err());
    }

    #[test]
    fn test_scalar_text_keeps_whitespace() {
        let fields: Fields = serde_json::from_str(r#"{"raw": " 3 "}"#).unwrap();
        assert_eq!(fields.raw.as_deref(), Some(" 3 "));
        assert!(validate_price(fields.raw.as_deref().unwrap_or_default()).is_err());

        let fields: Fields = serde_json::from_str(r#"{"raw": 3}"#).unwrap();
        assert_eq!(fields.raw.as_deref(), Some("3"));
    }
}
