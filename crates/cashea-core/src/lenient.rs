//! Field projection for loosely typed source documents.
//!
//! Source files are hand-exported JSON and field types drift between files:
//! ids show up as numbers or strings, coordinates as numeric strings. A file
//! counts as malformed only when it is not valid JSON. Each helper here reads
//! whatever value sits in the field and keeps it when it can be coerced,
//! falling back to `None` otherwise, so deserializing a document from a
//! [`Value`] never fails on field types.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Project a whole document, treating a non-object top level as empty.
#[must_use]
pub fn document<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if value.is_object() {
        serde_json::from_value(value).unwrap_or_default()
    } else {
        T::default()
    }
}

/// Coerce a scalar to `f64` the way a JavaScript numeric comparison would.
///
/// Numeric strings are trimmed and parsed, an empty string is zero, booleans
/// are 1 and 0. Anything that would coerce to `NaN` or infinity is `None`.
#[must_use]
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

#[allow(clippy::cast_possible_truncation)]
fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Option::<Value>::deserialize(deserializer)
}

/// Any non-null value, kept verbatim.
///
/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn passthrough<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw(deserializer)?.filter(|v| !v.is_null()))
}

/// Strings as-is, numbers and booleans rendered as text.
///
/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(raw(deserializer)?.and_then(to_text))
}

/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(raw(deserializer)?.as_ref().and_then(to_number))
}

/// Integral numbers or strings holding one.
///
/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(raw(deserializer)?.as_ref().and_then(to_integer))
}

/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(raw(deserializer)?.and_then(|v| v.as_bool()))
}

/// A nested object, projected with [`document`]; any other value is `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(raw(deserializer)?
        .filter(Value::is_object)
        .map(document))
}

/// An array of objects. Elements that are not objects project as empty
/// documents so the element count is preserved.
///
/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match raw(deserializer)? {
        Some(Value::Array(values)) => Some(values.into_iter().map(document).collect()),
        _ => None,
    })
}
