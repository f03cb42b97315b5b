//! Adapter from `serde_json` trees to the raw response model.
//!
//! JSON objects become [`NamedList`]s in document order (the crate enables
//! `serde_json/preserve_order`), arrays become [`Value::List`]. Dates stay
//! strings; decoders coerce them where a date is expected.

use crate::error::DecodeError;
use crate::named_list::{NamedList, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(NamedList::from_iter(map)),
        }
    }
}

impl TryFrom<serde_json::Value> for NamedList {
    type Error = DecodeError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Object(map) => Ok(NamedList::from_iter(map)),
            other => Err(DecodeError::Json(format!(
                "expected a JSON object at the top level, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl NamedList {
    /// Parse a JSON response body into a named list.
    ///
    /// # Errors
    /// Returns `DecodeError::Json` if the text is not valid JSON or its top
    /// level is not an object.
    pub fn from_json_str(body: &str) -> Result<Self, DecodeError> {
        let json: serde_json::Value = serde_json::from_str(body)?;
        Self::try_from(json)
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
