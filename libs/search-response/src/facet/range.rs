//! Range facets and the payload-driven choice of their subtype.
//!
//! The server does not tag range facets with a type. Which variant an entry
//! becomes is decided by [`classify`] from the shape of its `start`/`end`
//! values, once per entry, so one response may mix numeric and date ranges.

use chrono::{DateTime, Utc};

use super::{Count, decode_counts};
use crate::config::DecoderConfig;
use crate::decode::{EntryReader, named_entries};
use crate::error::DecodeError;
use crate::keys;
use crate::named_list::NamedList;

/// Subtype of a range facet entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeKind {
    Numeric,
    Date,
    Interval,
}

/// Pick the subtype of one `facet_ranges` entry.
///
/// - `start`/`end` where every bound present reads as a timestamp ->
///   [`RangeKind::Date`] (decoding then reports a missing bound by name);
/// - any other `start`/`end` -> [`RangeKind::Numeric`] (decoding then
///   requires both to be numbers);
/// - no bounds but an `intervals` sub-section -> [`RangeKind::Interval`];
/// - otherwise `None`.
#[must_use]
pub fn classify(entry: &NamedList) -> Option<RangeKind> {
    let bound = |key| entry.get(key).filter(|v| !v.is_null());
    match (bound(keys::START), bound(keys::END)) {
        (None, None) => bound(keys::INTERVALS).map(|_| RangeKind::Interval),
        (start, end) => {
            if [start, end].into_iter().flatten().all(|v| v.as_date().is_some()) {
                Some(RangeKind::Date)
            } else {
                Some(RangeKind::Numeric)
            }
        }
    }
}

/// Range facet with uniform numeric buckets.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericRange {
    name: String,
    start: f64,
    end: f64,
    gap: Option<f64>,
    before: Option<i64>,
    after: Option<i64>,
    between: Option<i64>,
    counts: Vec<Count>,
    intervals: Vec<Count>,
}

impl NumericRange {
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn gap(&self) -> Option<f64> {
        self.gap
    }
}

/// Range facet with date buckets; `gap` is date math such as `+1YEAR`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    name: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    gap: Option<String>,
    before: Option<i64>,
    after: Option<i64>,
    between: Option<i64>,
    counts: Vec<Count>,
    intervals: Vec<Count>,
}

impl DateRange {
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn gap(&self) -> Option<&str> {
        self.gap.as_deref()
    }
}

/// Range facet made only of named, possibly non-uniform intervals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalRange {
    name: String,
    counts: Vec<Count>,
    intervals: Vec<Count>,
}

/// A decoded `facet_ranges` entry.
#[derive(Clone, Debug, PartialEq)]
pub enum RangeFacet {
    Numeric(NumericRange),
    Date(DateRange),
    Interval(IntervalRange),
}

impl RangeFacet {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            RangeFacet::Numeric(r) => &r.name,
            RangeFacet::Date(r) => &r.name,
            RangeFacet::Interval(r) => &r.name,
        }
    }

    #[must_use]
    pub fn kind(&self) -> RangeKind {
        match self {
            RangeFacet::Numeric(_) => RangeKind::Numeric,
            RangeFacet::Date(_) => RangeKind::Date,
            RangeFacet::Interval(_) => RangeKind::Interval,
        }
    }

    /// Uniform gap buckets, in payload order.
    #[must_use]
    pub fn counts(&self) -> &[Count] {
        match self {
            RangeFacet::Numeric(r) => &r.counts,
            RangeFacet::Date(r) => &r.counts,
            RangeFacet::Interval(r) => &r.counts,
        }
    }

    /// Named interval buckets, in payload order. Disjoint from [`counts`](Self::counts).
    #[must_use]
    pub fn intervals(&self) -> &[Count] {
        match self {
            RangeFacet::Numeric(r) => &r.intervals,
            RangeFacet::Date(r) => &r.intervals,
            RangeFacet::Interval(r) => &r.intervals,
        }
    }

    /// Documents below `start`; never set for interval ranges.
    #[must_use]
    pub fn before(&self) -> Option<i64> {
        match self {
            RangeFacet::Numeric(r) => r.before,
            RangeFacet::Date(r) => r.before,
            RangeFacet::Interval(_) => None,
        }
    }

    /// Documents above `end`; never set for interval ranges.
    #[must_use]
    pub fn after(&self) -> Option<i64> {
        match self {
            RangeFacet::Numeric(r) => r.after,
            RangeFacet::Date(r) => r.after,
            RangeFacet::Interval(_) => None,
        }
    }

    /// Documents between `start` and `end`; never set for interval ranges.
    #[must_use]
    pub fn between(&self) -> Option<i64> {
        match self {
            RangeFacet::Numeric(r) => r.between,
            RangeFacet::Date(r) => r.between,
            RangeFacet::Interval(_) => None,
        }
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<&NumericRange> {
        match self {
            RangeFacet::Numeric(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&DateRange> {
        match self {
            RangeFacet::Date(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_interval(&self) -> Option<&IntervalRange> {
        match self {
            RangeFacet::Interval(r) => Some(r),
            _ => None,
        }
    }
}

/// Buckets shared by every subtype.
struct Buckets {
    counts: Vec<Count>,
    intervals: Vec<Count>,
}

/// `before`/`after`/`between` totals of bounded ranges.
struct Outside {
    before: Option<i64>,
    after: Option<i64>,
    between: Option<i64>,
}

pub fn decode_range_facets(
    section: &NamedList,
    config: &DecoderConfig,
) -> Result<Vec<RangeFacet>, DecodeError> {
    named_entries(keys::FACET_RANGES, section)
        .map(|reader| decode_range(&reader?, config))
        .collect()
}

fn decode_range(reader: &EntryReader<'_>, config: &DecoderConfig) -> Result<RangeFacet, DecodeError> {
    let kind = classify(reader.list())
        .ok_or_else(|| reader.unrecognized("range facet has neither start/end nor intervals"))?;
    tracing::trace!(facet = reader.entry(), ?kind, "Classified range facet");

    let name = reader.entry().to_owned();
    let buckets = read_buckets(reader, config)?;

    let facet = match kind {
        RangeKind::Numeric => {
            let outside = read_outside(reader)?;
            RangeFacet::Numeric(NumericRange {
                name,
                start: reader.f64(keys::START)?,
                end: reader.f64(keys::END)?,
                gap: reader.opt_f64(keys::GAP)?,
                before: outside.before,
                after: outside.after,
                between: outside.between,
                counts: buckets.counts,
                intervals: buckets.intervals,
            })
        }
        RangeKind::Date => {
            let outside = read_outside(reader)?;
            RangeFacet::Date(DateRange {
                name,
                start: reader.date(keys::START)?,
                end: reader.date(keys::END)?,
                gap: reader.opt_str(keys::GAP)?.map(str::to_owned),
                before: outside.before,
                after: outside.after,
                between: outside.between,
                counts: buckets.counts,
                intervals: buckets.intervals,
            })
        }
        RangeKind::Interval => RangeFacet::Interval(IntervalRange {
            name,
            counts: buckets.counts,
            intervals: buckets.intervals,
        }),
    };
    Ok(facet)
}

fn read_buckets(reader: &EntryReader<'_>, config: &DecoderConfig) -> Result<Buckets, DecodeError> {
    let read = |key: &'static str| match reader.get(key) {
        Some(value) => decode_counts(
            reader.section(),
            reader.entry(),
            key,
            value,
            config.flat_named_lists,
        ),
        None => Ok(Vec::new()),
    };
    Ok(Buckets {
        counts: read(keys::COUNTS)?,
        intervals: read(keys::INTERVALS)?,
    })
}

fn read_outside(reader: &EntryReader<'_>) -> Result<Outside, DecodeError> {
    Ok(Outside {
        before: reader.opt_i64(keys::BEFORE)?,
        after: reader.opt_i64(keys::AFTER)?,
        between: reader.opt_i64(keys::BETWEEN)?,
    })
}
