//! Facet sections under `facet_counts`.
//!
//! Each decoder takes one sub-section (a [`NamedList`] keyed by field or
//! query) and produces its typed facets in payload order. Decoding is all or
//! nothing per sub-section: one malformed entry fails the whole section.

mod field;
mod interval;
mod range;

pub use field::{Count, FacetField};
pub use interval::{IntervalCount, IntervalFacet};
pub use range::{DateRange, IntervalRange, NumericRange, RangeFacet, RangeKind, classify};

pub(crate) use field::{decode_date_facets, decode_facet_queries, decode_field_facets};
pub(crate) use interval::decode_interval_facets;
pub(crate) use range::decode_range_facets;

use crate::decode::pairs;
use crate::error::DecodeError;
use crate::named_list::Value;

/// Decode `(label, count)` buckets stored under `key` of an entry.
fn decode_counts(
    section: &'static str,
    entry: &str,
    key: &str,
    value: &Value,
    allow_flat: bool,
) -> Result<Vec<Count>, DecodeError> {
    pairs(section, entry, key, value, allow_flat)?
        .into_iter()
        .map(|(label, count)| {
            count.as_i64().map(|c| Count::new(label, c)).ok_or_else(|| {
                DecodeError::invalid(section, entry, format!("{key}[{label}]"), "count", count)
            })
        })
        .collect()
}
