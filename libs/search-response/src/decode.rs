//! Typed reads over one named entry of a response section.

use chrono::{DateTime, Utc};

use crate::error::DecodeError;
use crate::named_list::{NamedList, Value};

/// Reads keys of `list`, the payload of entry `entry` within `section`,
/// turning absent or mistyped values into [`DecodeError`]s that carry that
/// location. `null` values are treated as absent.
#[derive(Clone, Copy, Debug)]
pub struct EntryReader<'a> {
    section: &'static str,
    entry: &'a str,
    list: &'a NamedList,
}

impl<'a> EntryReader<'a> {
    pub fn new(section: &'static str, entry: &'a str, list: &'a NamedList) -> Self {
        Self {
            section,
            entry,
            list,
        }
    }

    pub fn section(&self) -> &'static str {
        self.section
    }

    pub fn entry(&self) -> &'a str {
        self.entry
    }

    pub fn list(&self) -> &'a NamedList {
        self.list
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.list.get(key).filter(|v| !v.is_null())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn required(&self, key: &'static str) -> Result<&'a Value, DecodeError> {
        self.get(key)
            .ok_or_else(|| DecodeError::missing(self.section, self.entry, key))
    }

    pub fn i64(&self, key: &'static str) -> Result<i64, DecodeError> {
        let value = self.required(key)?;
        value
            .as_i64()
            .ok_or_else(|| self.invalid(key, "integer", value))
    }

    pub fn opt_i64(&self, key: &'static str) -> Result<Option<i64>, DecodeError> {
        self.optional(key, "integer", Value::as_i64)
    }

    pub fn f64(&self, key: &'static str) -> Result<f64, DecodeError> {
        let value = self.required(key)?;
        value.as_f64().ok_or_else(|| self.invalid(key, "number", value))
    }

    pub fn opt_f64(&self, key: &'static str) -> Result<Option<f64>, DecodeError> {
        self.optional(key, "number", Value::as_f64)
    }

    pub fn date(&self, key: &'static str) -> Result<DateTime<Utc>, DecodeError> {
        let value = self.required(key)?;
        value.as_date().ok_or_else(|| self.invalid(key, "date", value))
    }

    pub fn opt_date(&self, key: &'static str) -> Result<Option<DateTime<Utc>>, DecodeError> {
        self.optional(key, "date", Value::as_date)
    }

    pub fn opt_str(&self, key: &'static str) -> Result<Option<&'a str>, DecodeError> {
        self.optional(key, "string", Value::as_str)
    }

    pub fn opt_bool(&self, key: &'static str) -> Result<Option<bool>, DecodeError> {
        self.optional(key, "boolean", Value::as_bool)
    }

    fn optional<T>(
        &self,
        key: &'static str,
        expected: &'static str,
        read: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, DecodeError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => read(value)
                .map(Some)
                .ok_or_else(|| self.invalid(key, expected, value)),
        }
    }

    pub fn invalid(
        &self,
        key: impl Into<String>,
        expected: &'static str,
        found: &Value,
    ) -> DecodeError {
        DecodeError::invalid(self.section, self.entry, key, expected, found)
    }

    pub fn unrecognized(&self, reason: &'static str) -> DecodeError {
        DecodeError::unrecognized(self.section, self.entry, reason)
    }
}

/// View `value` as ordered `(label, value)` pairs.
///
/// Named lists are read directly. With `allow_flat`, a list of alternating
/// string labels and values (`["0.0", 3, "1.0", 0]`) is accepted too, which
/// is how JSON responses encode named lists in flat mode.
pub fn pairs<'v>(
    section: &'static str,
    entry: &str,
    key: &str,
    value: &'v Value,
    allow_flat: bool,
) -> Result<Vec<(&'v str, &'v Value)>, DecodeError> {
    match value {
        Value::Map(list) => Ok(list.iter().collect()),
        Value::List(items) if allow_flat => {
            if items.len() % 2 != 0 {
                return Err(DecodeError::invalid(
                    section,
                    entry,
                    key,
                    "flat named list",
                    value,
                ));
            }
            items
                .chunks_exact(2)
                .enumerate()
                .map(|(i, pair)| match &pair[0] {
                    Value::Str(label) => Ok((label.as_str(), &pair[1])),
                    other => Err(DecodeError::invalid(
                        section,
                        entry,
                        format!("{key}[{}]", i * 2),
                        "label",
                        other,
                    )),
                })
                .collect()
        }
        other => Err(DecodeError::invalid(
            section,
            entry,
            key,
            "named list",
            other,
        )),
    }
}

/// Iterate the entries of a section that must all be named lists.
pub fn named_entries<'a>(
    section: &'static str,
    list: &'a NamedList,
) -> impl Iterator<Item = Result<EntryReader<'a>, DecodeError>> + 'a {
    list.iter().map(move |(name, value)| match value {
        Value::Map(inner) => Ok(EntryReader::new(section, name, inner)),
        other => Err(DecodeError::invalid(
            section,
            name,
            name,
            "named list",
            other,
        )),
    })
}
