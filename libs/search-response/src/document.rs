//! Plain search hits: ordered field/value records plus the total match count.

use crate::decode::EntryReader;
use crate::error::DecodeError;
use crate::keys;
use crate::named_list::{NamedList, Value};

/// One matched record. Fields keep payload order; multi-valued fields are
/// stored as [`Value::List`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    fields: NamedList,
}

impl Document {
    #[must_use]
    pub fn new(fields: NamedList) -> Self {
        Self { fields }
    }

    /// Value stored for `name`, as sent by the server.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// First value of a possibly multi-valued field.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<&Value> {
        match self.fields.get(name)? {
            Value::List(items) => items.first(),
            single => Some(single),
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys()
    }

    #[must_use]
    pub fn fields(&self) -> &NamedList {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Ordered page of documents with the server-side totals.
///
/// `len()` is the number of documents returned in this page, while
/// `num_found()` is the number of documents that matched overall.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentList {
    num_found: i64,
    start: i64,
    max_score: Option<f64>,
    docs: Vec<Document>,
}

impl DocumentList {
    #[must_use]
    pub fn new(num_found: i64, start: i64, max_score: Option<f64>, docs: Vec<Document>) -> Self {
        Self {
            num_found,
            start,
            max_score,
            docs,
        }
    }

    #[must_use]
    pub fn num_found(&self) -> i64 {
        self.num_found
    }

    #[must_use]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[must_use]
    pub fn max_score(&self) -> Option<f64> {
        self.max_score
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.docs.get(index)
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }
}

impl<'a> IntoIterator for &'a DocumentList {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

/// Decode a document list stored under `key` of an entry.
///
/// Accepts either a parser-materialized [`Value::Docs`] or the JSON shape
/// `{numFound, start, maxScore?, docs: [...]}`.
pub(crate) fn decode_document_list(
    section: &'static str,
    entry: &str,
    key: &str,
    value: &Value,
) -> Result<DocumentList, DecodeError> {
    match value {
        Value::Docs(docs) => Ok(docs.clone()),
        Value::Map(map) => {
            let reader = EntryReader::new(section, entry, map);
            let num_found = reader.i64(keys::NUM_FOUND)?;
            let start = reader.opt_i64(keys::START)?.unwrap_or(0);
            let max_score = reader.opt_f64(keys::MAX_SCORE)?;
            let docs = match reader.get(keys::DOCS) {
                None => Vec::new(),
                Some(Value::List(items)) => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::Map(fields) => Ok(Document::new(fields.clone())),
                        other => Err(reader.invalid(format!("{}[{i}]", keys::DOCS), "document", other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Some(other) => return Err(reader.invalid(keys::DOCS, "list of documents", other)),
            };
            Ok(DocumentList::new(num_found, start, max_score, docs))
        }
        other => Err(DecodeError::invalid(section, entry, key, "document list", other)),
    }
}
