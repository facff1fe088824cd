//! Forgiving deserializers for upstream records.
//!
//! The vacancy API is not strict about field types: identifiers arrive as
//! strings or integers, flags as booleans or `0`/`1`, and sub-objects may be
//! `null`. A malformed field becomes `None` instead of failing the record.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

pub fn lenient_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

pub fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrInt {
        Str(String),
        Int(i64),
        Other(IgnoredAny),
    }

    Ok(match StrOrInt::deserialize(deserializer)? {
        StrOrInt::Str(s) if !s.is_empty() => Some(s),
        StrOrInt::Int(i) => Some(i.to_string()),
        _ => None,
    })
}

pub fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
        String(String),
        Other(IgnoredAny),
    }

    Ok(match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(b) => Some(b),
        BoolOrInt::Int(i) => Some(i != 0),
        BoolOrInt::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        BoolOrInt::Other(_) => None,
    })
}

/// Loose truthiness of a JSON value: null, false, zero and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "lenient_id")]
        id: Option<String>,
        #[serde(default, deserialize_with = "lenient_bool")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "lenient")]
        name: Option<String>,
    }

    #[test]
    fn coerces_ids_and_flags() {
        let record: Record =
            serde_json::from_value(json!({ "id": 42, "flag": 1, "name": 7 })).unwrap();
        assert_eq!(record.id.as_deref(), Some("42"));
        assert_eq!(record.flag, Some(true));
        assert_eq!(record.name, None);
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let record: Record =
            serde_json::from_value(json!({ "id": null, "flag": "maybe" })).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.flag, None);
        assert_eq!(record.name, None);
    }

    #[test]
    fn truthiness_follows_json_emptiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(4.2)));
        assert!(is_truthy(&json!({ "total": 4 })));
    }
}
