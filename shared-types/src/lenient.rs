//! Deserializers for the loosely typed fields ClickUp sends.
//!
//! The upstream API is inconsistent about identifiers (numbers for users,
//! strings for tasks) and happily returns `null` where a value is expected.
//! These helpers fold those variations into one canonical form at the
//! boundary so nothing downstream has to care.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// A string field that may arrive as a string, a number or `null`.
/// `null` and non-scalar values become the empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string(deserializer)?.unwrap_or_default())
}

/// Like [`string`] but keeps the distinction between absent and present.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(canonical_string))
}

/// A field that falls back to `None` when it is `null` or has the wrong shape.
pub fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| decode(v, std::any::type_name::<T>())))
}

/// A field that falls back to its default when it is `null` or has the
/// wrong shape.
pub fn value_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(or_none(deserializer)?.unwrap_or_default())
}

/// A list decoded element by element. Elements that fail to decode are
/// skipped; anything other than an array yields an empty list.
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(optional_items(deserializer)?.unwrap_or_default())
}

/// Like [`items`] but `null`, absent and non-array values stay `None`.
pub fn optional_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let type_name = std::any::type_name::<T>();
    let values = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values,
        None | Some(Value::Null) => return Ok(None),
        Some(other) => {
            warn!("Expected a list of {}, got {}", type_name, other);
            return Ok(None);
        }
    };

    Ok(Some(
        values
            .into_iter()
            .filter_map(|v| decode(v, type_name))
            .collect(),
    ))
}

fn decode<T: DeserializeOwned>(value: Value, type_name: &str) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!("Skipping malformed {}: {}", type_name, e);
            None
        }
    }
}

fn canonical_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
