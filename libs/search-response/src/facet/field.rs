use chrono::{DateTime, Utc};

use super::decode_counts;
use crate::config::DecoderConfig;
use crate::decode::named_entries;
use crate::error::DecodeError;
use crate::keys;
use crate::named_list::NamedList;

/// One `(value, count)` bucket of a facet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Count {
    value: String,
    count: i64,
}

impl Count {
    #[must_use]
    pub fn new(value: impl Into<String>, count: i64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }

    /// Bucket label: a field value, a range start or a query.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn count(&self) -> i64 {
        self.count
    }
}

/// Buckets of a field facet, or of a legacy date facet.
///
/// Date facets additionally carry the `gap` and `end` the server used to
/// build the buckets; both are `None` for plain field facets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetField {
    name: String,
    values: Vec<Count>,
    gap: Option<String>,
    end: Option<DateTime<Utc>>,
}

impl FacetField {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Count>) -> Self {
        Self {
            name: name.into(),
            values,
            gap: None,
            end: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[Count] {
        &self.values
    }

    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Bucket with the given label, if any.
    #[must_use]
    pub fn get(&self, value: &str) -> Option<&Count> {
        self.values.iter().find(|c| c.value == value)
    }

    #[must_use]
    pub fn gap(&self) -> Option<&str> {
        self.gap.as_deref()
    }

    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

pub fn decode_field_facets(
    section: &NamedList,
    config: &DecoderConfig,
) -> Result<Vec<FacetField>, DecodeError> {
    section
        .iter()
        .map(|(name, value)| {
            let values =
                decode_counts(keys::FACET_FIELDS, name, name, value, config.flat_named_lists)?;
            Ok(FacetField::new(name, values))
        })
        .collect()
}

pub fn decode_facet_queries(
    section: &NamedList,
    _config: &DecoderConfig,
) -> Result<Vec<Count>, DecodeError> {
    section
        .iter()
        .map(|(query, count)| {
            count.as_i64().map(|c| Count::new(query, c)).ok_or_else(|| {
                DecodeError::invalid(keys::FACET_QUERIES, query, query, "count", count)
            })
        })
        .collect()
}

/// Legacy date facets.
///
/// Buckets come from a nested `counts` entry when present; otherwise every
/// entry that is not date-facet metadata (`gap`, `start`, `end`, ...) is a
/// bucket. This section predates range facets and is kept for servers that
/// still emit it.
pub fn decode_date_facets(
    section: &NamedList,
    config: &DecoderConfig,
) -> Result<Vec<FacetField>, DecodeError> {
    named_entries(keys::FACET_DATES, section)
        .map(|reader| {
            let reader = reader?;
            let gap = reader.opt_str(keys::GAP)?.map(str::to_owned);
            let end = reader.opt_date(keys::END)?;

            let values = match reader.get(keys::COUNTS) {
                Some(counts) => decode_counts(
                    reader.section(),
                    reader.entry(),
                    keys::COUNTS,
                    counts,
                    config.flat_named_lists,
                )?,
                None => reader
                    .list()
                    .iter()
                    .filter(|(key, _)| !keys::DATE_FACET_META.contains(key))
                    .map(|(label, count)| {
                        count
                            .as_i64()
                            .map(|c| Count::new(label, c))
                            .ok_or_else(|| reader.invalid(label, "count", count))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            };

            Ok(FacetField {
                name: reader.entry().to_owned(),
                values,
                gap,
                end,
            })
        })
        .collect()
}
