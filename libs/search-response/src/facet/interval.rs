//! Interval facets from the `facet_intervals` section.
//!
//! These overlap with [`RangeFacet::Interval`](super::RangeFacet::Interval),
//! which comes from `facet_ranges`. The two sections are emitted by different
//! server facet APIs, can appear together, and are decoded independently.

use crate::config::DecoderConfig;
use crate::decode::pairs;
use crate::error::DecodeError;
use crate::keys;
use crate::named_list::{NamedList, Value};

/// One interval bucket: the literal interval expression (`"[0,10]"`,
/// `"(10,100]"`) or a user-supplied label, and its count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalCount {
    key: String,
    count: i64,
}

impl IntervalCount {
    #[must_use]
    pub fn new(key: impl Into<String>, count: i64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn count(&self) -> i64 {
        self.count
    }
}

/// Interval buckets of one field, in the order the intervals were requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalFacet {
    field: String,
    intervals: Vec<IntervalCount>,
}

impl IntervalFacet {
    #[must_use]
    pub fn new(field: impl Into<String>, intervals: Vec<IntervalCount>) -> Self {
        Self {
            field: field.into(),
            intervals,
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn intervals(&self) -> &[IntervalCount] {
        &self.intervals
    }
}

/// Each field maps to its buckets, either directly or wrapped in an
/// `intervals` entry.
pub fn decode_interval_facets(
    section: &NamedList,
    config: &DecoderConfig,
) -> Result<Vec<IntervalFacet>, DecodeError> {
    section
        .iter()
        .map(|(field, value)| {
            let (key, buckets) = match value {
                Value::Map(inner) => match inner.get(keys::INTERVALS) {
                    Some(nested @ (Value::Map(_) | Value::List(_))) => (keys::INTERVALS, nested),
                    _ => (field, value),
                },
                _ => (field, value),
            };
            let intervals = pairs(
                keys::FACET_INTERVALS,
                field,
                key,
                buckets,
                config.flat_named_lists,
            )?
            .into_iter()
            .map(|(label, count)| {
                count
                    .as_i64()
                    .map(|c| IntervalCount::new(label, c))
                    .ok_or_else(|| {
                        DecodeError::invalid(
                            keys::FACET_INTERVALS,
                            field,
                            format!("{key}[{label}]"),
                            "count",
                            count,
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
            Ok(IntervalFacet::new(field, intervals))
        })
        .collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn price() -> NamedList {
        NamedList::new()
            .with("[0,10]", 3)
            .with("(10,100]", 4)
            .with("(100,*]", 9)
    }

    #[test]
    fn decodes_direct_buckets() {
        let section = NamedList::new().with("price", price());
        let facets = decode_interval_facets(&section, &DecoderConfig::default()).unwrap();
        assert_eq!(facets[0].field(), "price");
        let keys: Vec<_> = facets[0].intervals().iter().map(IntervalCount::key).collect();
        assert_eq!(keys, vec!["[0,10]", "(10,100]", "(100,*]"]);
    }

    #[test]
    fn decodes_wrapped_buckets() {
        let section = NamedList::new().with("price", NamedList::new().with("intervals", price()));
        let facets = decode_interval_facets(&section, &DecoderConfig::default()).unwrap();
        assert_eq!(facets[0].intervals().len(), 3);
        assert_eq!(facets[0].intervals()[2], IntervalCount::new("(100,*]", 9));
    }

    #[test]
    fn interval_labelled_intervals_is_a_bucket() {
        let section = NamedList::new().with("price", NamedList::new().with("intervals", 5));
        let facets = decode_interval_facets(&section, &DecoderConfig::default()).unwrap();
        assert_eq!(facets[0].intervals(), &[IntervalCount::new("intervals", 5)]);
    }

    #[test]
    fn bad_count_fails_the_section() {
        let section = NamedList::new()
            .with("price", price())
            .with("popularity", NamedList::new().with("bad", "x"));
        let err = decode_interval_facets(&section, &DecoderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("facet_intervals/popularity"));
    }
}
