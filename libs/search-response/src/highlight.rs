use crate::error::DecodeError;
use crate::keys;
use crate::named_list::{NamedList, Value};

/// Highlighted snippets of one document, field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentHighlights {
    id: String,
    fields: Vec<(String, Vec<String>)>,
}

impl DocumentHighlights {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Snippets for `field`, if the field produced any.
    #[must_use]
    pub fn snippets(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, snippets)| snippets.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, snippets)| (name.as_str(), snippets.as_slice()))
    }
}

/// The `highlighting` section: snippets keyed by document id, in payload order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlighting {
    documents: Vec<DocumentHighlights>,
}

impl Highlighting {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DocumentHighlights> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Shorthand for `get(id)?.snippets(field)`.
    #[must_use]
    pub fn snippets(&self, id: &str, field: &str) -> Option<&[String]> {
        self.get(id)?.snippets(field)
    }

    #[must_use]
    pub fn documents(&self) -> &[DocumentHighlights] {
        &self.documents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

pub(crate) fn decode_highlighting(section: &NamedList) -> Result<Highlighting, DecodeError> {
    let documents = section
        .iter()
        .map(|(id, fields)| {
            let fields = fields.as_named_list().ok_or_else(|| {
                DecodeError::invalid(keys::HIGHLIGHTING, id, id, "named list", fields)
            })?;
            let fields = fields
                .iter()
                .map(|(field, snippets)| {
                    decode_snippets(id, field, snippets).map(|s| (field.to_owned(), s))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, DecodeError>(DocumentHighlights {
                id: id.to_owned(),
                fields,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Highlighting { documents })
}

fn decode_snippets(id: &str, field: &str, value: &Value) -> Result<Vec<String>, DecodeError> {
    let invalid =
        |found: &Value| DecodeError::invalid(keys::HIGHLIGHTING, id, field, "snippet list", found);
    match value {
        Value::Str(s) => Ok(vec![s.clone()]),
        Value::List(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned).ok_or_else(|| invalid(item)))
            .collect(),
        other => Err(invalid(other)),
    }
}
