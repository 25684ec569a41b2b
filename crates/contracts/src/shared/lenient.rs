//! Lenient deserializers for numbers coming from loosely typed sources.
//!
//! Missing, null or non-numeric values become zero instead of failing the
//! whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer view of a JSON value; anything non-numeric is 0
pub fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Bool(b) => *b as i64,
        _ => 0,
    }
}

/// Float view of a JSON value; anything non-numeric is 0.0
pub fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, coerce_i64))
}

pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0.0, coerce_f64))
}

/// Identifier given either as a string or a number
pub fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_i64() {
        assert_eq!(coerce_i64(&json!(5)), 5);
        assert_eq!(coerce_i64(&json!(" 7 ")), 7);
        assert_eq!(coerce_i64(&json!("3.9")), 3);
        assert_eq!(coerce_i64(&json!(2.5)), 2);
        assert_eq!(coerce_i64(&json!("abc")), 0);
        assert_eq!(coerce_i64(&json!(null)), 0);
        assert_eq!(coerce_i64(&json!([1])), 0);
    }

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64(&json!(12.5)), 12.5);
        assert_eq!(coerce_f64(&json!("12,5")), 12.5);
        assert_eq!(coerce_f64(&json!("n/a")), 0.0);
        assert_eq!(coerce_f64(&json!({})), 0.0);
    }
}
