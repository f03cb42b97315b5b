//! Raw response model produced by the upstream wire parser.
//!
//! A search response arrives as an ordered, self-describing tree: every
//! section is a [`NamedList`] of `(name, value)` pairs whose values are
//! scalars, nested lists, nested named lists or already-materialized
//! document lists. Decoders in this crate only ever read this tree.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::document::DocumentList;

/// Ordered sequence of `(name, value)` pairs.
///
/// Names are not required to be unique; [`NamedList::get`] returns the first
/// match, [`NamedList::get_all`] every match in payload order.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct NamedList {
    entries: Vec<(String, Value)>,
}

impl NamedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry, keeping insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Builder-style variant of [`NamedList::push`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Every value stored under `name`, in payload order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Entry at position `index`.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<(&str, &Value)> {
        self.entries
            .get(index)
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for NamedList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for NamedList {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A single value in the raw response tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(DateTime<Utc>),
    List(Vec<Value>),
    Map(NamedList),
    /// A `<result>`-style document list already materialized by the parser.
    Docs(DocumentList),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Integer view. Numeric strings are accepted, floats are not.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Floating point view over integers, floats and numeric strings.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // counts and bounds stay far below 2^52
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Timestamp view over dates and RFC 3339 strings such as
    /// `2005-02-13T15:26:37Z`.
    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Str(s) => parse_date(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_named_list(&self) -> Option<&NamedList> {
        match self {
            Value::Map(list) => Some(list),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render a scalar as a bucket or group label.
    ///
    /// Integral floats keep their trailing `.0` (`95000.0`), dates render in
    /// UTC with a `Z` suffix. Returns `None` for nulls and containers.
    #[must_use]
    pub fn to_label(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::Bool(b) => Some(b.to_string()),
            Value::Date(d) => Some(format_date(d)),
            Value::Null | Value::List(_) | Value::Map(_) | Value::Docs(_) => None,
        }
    }

    /// Short type name used in decode errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::List(_) => "list",
            Value::Map(_) => "named list",
            Value::Docs(_) => "document list",
        }
    }

    /// Kind plus a rendering of scalars, e.g. `string "abc"`.
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::Str(s) => format!("string \"{s}\""),
            other => match other.to_label() {
                Some(label) => format!("{} {label}", other.kind()),
                None => other.kind().to_owned(),
            },
        }
    }
}

/// Parse an RFC 3339 timestamp into UTC.
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Render a timestamp the way the server does: seconds precision unless
/// sub-second digits are present, always with a `Z` suffix.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<NamedList> for Value {
    fn from(list: NamedList) -> Self {
        Value::Map(list)
    }
}

impl From<DocumentList> for Value {
    fn from(docs: DocumentList) -> Self {
        Value::Docs(docs)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order_and_duplicates() {
        let list = NamedList::new()
            .with("b", 1)
            .with("a", 2)
            .with("b", 3);

        let keys: Vec<_> = list.keys().collect();
        assert_eq!(keys, vec!["b", "a", "b"]);
        assert_eq!(list.get("b"), Some(&Value::Int(1)));
        let all: Vec<_> = list.get_all("b").collect();
        assert_eq!(all, vec![&Value::Int(1), &Value::Int(3)]);
        assert_eq!(list.entry(1), Some(("a", &Value::Int(2))));
        assert!(list.get("missing").is_none());
    }

    #[test]
    fn numeric_coercions() {
        assert_eq!(Value::from("42").as_i64(), Some(42));
        assert_eq!(Value::Float(1.5).as_i64(), None);
        assert_eq!(Value::from("0.0").as_f64(), Some(0.0));
        assert_eq!(Value::Int(5).as_f64(), Some(5.0));
        assert_eq!(Value::from("+1YEAR").as_f64(), None);
    }

    #[test]
    fn date_coercions() {
        let parsed = Value::from("2005-02-13T15:26:37Z").as_date().unwrap();
        assert_eq!(format_date(&parsed), "2005-02-13T15:26:37Z");
        assert_eq!(Value::Date(parsed).as_date(), Some(parsed));
        assert!(Value::from("0.0").as_date().is_none());
        assert!(Value::Float(0.0).as_date().is_none());
    }

    #[test]
    fn labels_keep_float_formatting() {
        assert_eq!(Value::Float(95000.0).to_label().as_deref(), Some("95000.0"));
        assert_eq!(Value::Float(0.25).to_label().as_deref(), Some("0.25"));
        assert_eq!(Value::Int(7).to_label().as_deref(), Some("7"));
        assert_eq!(Value::Null.to_label(), None);
        assert_eq!(Value::List(vec![]).to_label(), None);
    }

    #[test]
    fn describe_includes_kind() {
        assert_eq!(Value::from("abc").describe(), "string \"abc\"");
        assert_eq!(Value::Int(3).describe(), "int 3");
        assert_eq!(Value::Map(NamedList::new()).describe(), "named list");
    }
}
