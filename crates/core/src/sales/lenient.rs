//! Lenient field coercion for wire payloads.
//!
//! Clients send numbers as JSON numbers, numeric strings ("12", "1,250.50"),
//! booleans or nothing at all. These deserializers never reject a value: they
//! coerce it the way a form post would be read, falling back to zero or empty.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces any JSON value to an integer.
#[must_use]
pub fn int_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| {
            decimal_value(value)
                .trunc()
                .try_into()
                .unwrap_or_default()
        }),
        Value::String(s) => leading_int(s),
        Value::Bool(b) => i64::from(*b),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Null | Value::Object(_) => 0,
    }
}

/// Coerces any JSON value to a decimal amount.
#[must_use]
pub fn decimal_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .unwrap_or_default()
        }
        Value::String(s) => parse_amount(s),
        Value::Bool(b) => Decimal::from(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => Decimal::ZERO,
    }
}

/// Coerces any scalar JSON value to text; `null`, arrays and objects become empty.
#[must_use]
pub fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Parses the leading integer of `s` ("12abc" → 12, "abc" → 0).
#[must_use]
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = digits[..end].parse::<i64>().unwrap_or(if end == 0 { 0 } else { i64::MAX });

    if negative { -magnitude } else { magnitude }
}

/// Parses an amount, ignoring thousands separators and trailing garbage
/// ("1,250.50" → 1250.50, "12.5kg" → 12.5, "" → 0).
#[must_use]
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '-' | '+' if i == 0 => {}
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    let candidate = cleaned[..end].trim_end_matches('.');
    Decimal::from_str(candidate).unwrap_or_default()
}

/// Deserializes an integer leniently; missing or `null` is 0.
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, int_value))
}

/// Deserializes a decimal leniently; missing or `null` is 0.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(Decimal::ZERO, decimal_value))
}

/// Deserializes text leniently; missing or `null` is empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(text_value).unwrap_or_default())
}

/// Deserializes optional text leniently; `null` stays `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_null()).as_ref().map(text_value))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!(12), 12)]
    #[case(json!(12.9), 12)]
    #[case(json!(-3.5), -3)]
    #[case(json!("42"), 42)]
    #[case(json!("12abc"), 12)]
    #[case(json!(" -7 "), -7)]
    #[case(json!("abc"), 0)]
    #[case(json!(true), 1)]
    #[case(json!(null), 0)]
    #[case(json!({"a": 1}), 0)]
    fn test_int_value(#[case] value: Value, #[case] expected: i64) {
        assert_eq!(int_value(&value), expected);
    }

    #[rstest]
    #[case(json!(100), dec!(100))]
    #[case(json!(99.95), dec!(99.95))]
    #[case(json!("1,250.50"), dec!(1250.50))]
    #[case(json!("12.5kg"), dec!(12.5))]
    #[case(json!("5."), dec!(5))]
    #[case(json!("-4.25"), dec!(-4.25))]
    #[case(json!(""), dec!(0))]
    #[case(json!("n/a"), dec!(0))]
    #[case(json!(false), dec!(0))]
    fn test_decimal_value(#[case] value: Value, #[case] expected: Decimal) {
        assert_eq!(decimal_value(&value), expected);
    }

    #[rstest]
    #[case(json!("draft"), "draft")]
    #[case(json!(7), "7")]
    #[case(json!(true), "1")]
    #[case(json!(false), "")]
    #[case(json!(null), "")]
    fn test_text_value(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(text_value(&value), expected);
    }

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "int")]
        qty: i64,
        #[serde(default, deserialize_with = "decimal")]
        price: Decimal,
        #[serde(default, deserialize_with = "optional_text")]
        currency: Option<String>,
    }

    #[test]
    fn test_deserializers_fill_defaults() {
        let form: Form = serde_json::from_value(json!({})).unwrap();
        assert_eq!(form.qty, 0);
        assert_eq!(form.price, Decimal::ZERO);
        assert_eq!(form.currency, None);

        let form: Form =
            serde_json::from_value(json!({"qty": "3", "price": "10.50", "currency": null}))
                .unwrap();
        assert_eq!(form.qty, 3);
        assert_eq!(form.price, dec!(10.50));
        assert_eq!(form.currency, None);
    }
}
