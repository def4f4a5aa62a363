//! Part values and their text rendering

use std::{borrow::Cow, collections::HashMap};

pub use serde_json::Value;

use crate::error::FilterError;

/// Mapping of placeholder keys to replacement values
pub type Parts = HashMap<String, Value>;

/// Render a resolved value into the text placed in the output
///
/// Strings are used as-is, numbers and booleans through their display form,
/// `null` as empty text. Arrays and objects render as compact JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Borrow a value as text for a string transform
///
/// Scalars coerce to text; arrays and objects are rejected.
pub fn as_text(value: &Value) -> Result<Cow<'_, str>, FilterError> {
    match value {
        Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
        Value::Null => Ok(Cow::Borrowed("")),
        Value::Bool(b) => Ok(Cow::Owned(b.to_string())),
        Value::Number(n) => Ok(Cow::Owned(n.to_string())),
        Value::Array(_) => Err(FilterError::UnsupportedValue("array".to_string())),
        Value::Object(_) => Err(FilterError::UnsupportedValue("object".to_string())),
    }
}

/// Build a [`Parts`] map from string pairs
pub fn parts_from<I, K, V>(pairs: I) -> Parts
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}
