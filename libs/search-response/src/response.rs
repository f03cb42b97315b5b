//! The `QueryResponse` facade.
//!
//! Wraps the raw response and hands out typed views of its sections. Each
//! section is decoded the first time it is asked for and cached, errors
//! included, so later calls are free and always agree with the first one.

use std::sync::OnceLock;

use crate::config::DecoderConfig;
use crate::document::{DocumentList, decode_document_list};
use crate::error::DecodeError;
use crate::facet::{
    Count, FacetField, IntervalFacet, RangeFacet, decode_date_facets, decode_facet_queries,
    decode_field_facets, decode_interval_facets, decode_range_facets,
};
use crate::group::{GroupResponse, decode_group_response};
use crate::header::{ResponseHeader, decode_header};
use crate::highlight::{Highlighting, decode_highlighting};
use crate::keys;
use crate::named_list::{NamedList, Value};

type Cached<T> = OnceLock<Result<T, DecodeError>>;
type FacetDecoder<T> = fn(&NamedList, &DecoderConfig) -> Result<Vec<T>, DecodeError>;

/// A search response with lazily decoded, typed sections.
///
/// Absent sections read as empty (or `None`); only malformed data is an
/// error. A section that fails to decode does not affect the others.
///
/// ```
/// use search_response::QueryResponse;
///
/// let response = QueryResponse::from_json(
///     r#"{"facet_counts": {"facet_intervals": {"price": {"[0,10]": 3}}}}"#,
/// )?;
/// let facets = response.interval_facets()?;
/// assert_eq!(facets[0].intervals()[0].count(), 3);
/// assert!(response.group_response()?.is_none());
/// # Ok::<(), search_response::DecodeError>(())
/// ```
#[derive(Debug)]
pub struct QueryResponse {
    raw: NamedList,
    config: DecoderConfig,
    header: Cached<Option<ResponseHeader>>,
    results: Cached<Option<DocumentList>>,
    facet_queries: Cached<Vec<Count>>,
    facet_fields: Cached<Vec<FacetField>>,
    facet_dates: Cached<Vec<FacetField>>,
    facet_ranges: Cached<Vec<RangeFacet>>,
    interval_facets: Cached<Vec<IntervalFacet>>,
    group_response: Cached<Option<GroupResponse>>,
    highlighting: Cached<Option<Highlighting>>,
}

impl QueryResponse {
    /// Wrap a raw response, decoding with the default configuration.
    #[must_use]
    pub fn new(raw: NamedList) -> Self {
        Self::build(raw, DecoderConfig::default())
    }

    /// Wrap a raw response with a custom configuration.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidConfig` if `config` fails validation.
    pub fn with_config(raw: NamedList, config: DecoderConfig) -> Result<Self, DecodeError> {
        config.validate()?;
        Ok(Self::build(raw, config))
    }

    /// Parse a JSON response body (`wt=json`).
    ///
    /// # Errors
    /// Returns `DecodeError::Json` if the body is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self, DecodeError> {
        NamedList::from_json_str(body).map(Self::new)
    }

    fn build(raw: NamedList, config: DecoderConfig) -> Self {
        Self {
            raw,
            config,
            header: OnceLock::new(),
            results: OnceLock::new(),
            facet_queries: OnceLock::new(),
            facet_fields: OnceLock::new(),
            facet_dates: OnceLock::new(),
            facet_ranges: OnceLock::new(),
            interval_facets: OnceLock::new(),
            group_response: OnceLock::new(),
            highlighting: OnceLock::new(),
        }
    }

    /// The untouched raw response.
    #[must_use]
    pub fn raw(&self) -> &NamedList {
        &self.raw
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The `responseHeader` section.
    ///
    /// # Errors
    /// Returns an error if the header lacks `status` or has mistyped fields.
    pub fn header(&self) -> Result<Option<&ResponseHeader>, DecodeError> {
        cached(&self.header, || {
            let header = self
                .section(keys::RESPONSE_HEADER)
                .and_then(|s| s.map(decode_header).transpose());
            traced(keys::RESPONSE_HEADER, header, |h| usize::from(h.is_some()))
        })
        .map(Option::as_ref)
    }

    /// The main result list (`response`).
    ///
    /// # Errors
    /// Returns an error if the section is not a valid document list.
    pub fn results(&self) -> Result<Option<&DocumentList>, DecodeError> {
        cached(&self.results, || {
            let results = self
                .value(keys::RESPONSE)
                .map(|v| decode_document_list(keys::RESPONSE, keys::RESPONSE, keys::RESPONSE, v))
                .transpose();
            traced(keys::RESPONSE, results, |r| r.as_ref().map_or(0, DocumentList::len))
        })
        .map(Option::as_ref)
    }

    /// Query facets (`facet_counts/facet_queries`).
    ///
    /// # Errors
    /// Returns an error if any query count is not an integer.
    pub fn facet_queries(&self) -> Result<&[Count], DecodeError> {
        cached(&self.facet_queries, || {
            self.facets(keys::FACET_QUERIES, decode_facet_queries)
        })
        .map(Vec::as_slice)
    }

    /// Field facets (`facet_counts/facet_fields`).
    ///
    /// # Errors
    /// Returns an error if any field's buckets are malformed.
    pub fn facet_fields(&self) -> Result<&[FacetField], DecodeError> {
        cached(&self.facet_fields, || {
            self.facets(keys::FACET_FIELDS, decode_field_facets)
        })
        .map(Vec::as_slice)
    }

    /// Legacy date facets (`facet_counts/facet_dates`).
    ///
    /// Servers that still emit this section also emit the same data under
    /// `facet_ranges`; prefer [`facet_ranges`](Self::facet_ranges).
    ///
    /// # Errors
    /// Returns an error if a bucket count or the `end` date is malformed.
    pub fn facet_dates(&self) -> Result<&[FacetField], DecodeError> {
        cached(&self.facet_dates, || {
            self.facets(keys::FACET_DATES, decode_date_facets)
        })
        .map(Vec::as_slice)
    }

    /// Range facets (`facet_counts/facet_ranges`), each classified as
    /// numeric, date or interval from its own payload.
    ///
    /// # Errors
    /// Returns an error if an entry is unrecognizable or has malformed bounds
    /// or counts.
    pub fn facet_ranges(&self) -> Result<&[RangeFacet], DecodeError> {
        cached(&self.facet_ranges, || {
            self.facets(keys::FACET_RANGES, decode_range_facets)
        })
        .map(Vec::as_slice)
    }

    /// Interval facets (`facet_counts/facet_intervals`).
    ///
    /// # Errors
    /// Returns an error if any interval count is not an integer.
    pub fn interval_facets(&self) -> Result<&[IntervalFacet], DecodeError> {
        cached(&self.interval_facets, || {
            self.facets(keys::FACET_INTERVALS, decode_interval_facets)
        })
        .map(Vec::as_slice)
    }

    /// Grouped results (`grouped`).
    ///
    /// # Errors
    /// Returns an error if a command or group is malformed, or nesting
    /// exceeds [`DecoderConfig::max_group_depth`].
    pub fn group_response(&self) -> Result<Option<&GroupResponse>, DecodeError> {
        cached(&self.group_response, || {
            let grouped = self
                .section(keys::GROUPED)
                .and_then(|s| s.map(|s| decode_group_response(s, &self.config)).transpose());
            traced(keys::GROUPED, grouped, |g| g.as_ref().map_or(0, |g| g.values().len()))
        })
        .map(Option::as_ref)
    }

    /// Highlighted snippets (`highlighting`).
    ///
    /// # Errors
    /// Returns an error if a snippet is not a string.
    pub fn highlighting(&self) -> Result<Option<&Highlighting>, DecodeError> {
        cached(&self.highlighting, || {
            let highlighting = self
                .section(keys::HIGHLIGHTING)
                .and_then(|s| s.map(decode_highlighting).transpose());
            traced(keys::HIGHLIGHTING, highlighting, |h| h.as_ref().map_or(0, Highlighting::len))
        })
        .map(Option::as_ref)
    }

    /// Cursor to pass as `cursorMark` for the next page of a deep-paging query.
    #[must_use]
    pub fn next_cursor_mark(&self) -> Option<&str> {
        self.value(keys::NEXT_CURSOR_MARK).and_then(Value::as_str)
    }

    fn value(&self, key: &str) -> Option<&Value> {
        self.raw.get(key).filter(|v| !v.is_null())
    }

    /// Top-level section `key`, which must be a named list when present.
    fn section(&self, key: &'static str) -> Result<Option<&NamedList>, DecodeError> {
        self.value(key)
            .map(|v| {
                v.as_named_list()
                    .ok_or_else(|| DecodeError::invalid(key, key, key, "named list", v))
            })
            .transpose()
    }

    /// Sub-section `key` of `facet_counts`, decoded with `decode`.
    fn facets<T>(&self, key: &'static str, decode: FacetDecoder<T>) -> Result<Vec<T>, DecodeError> {
        let decoded = self.section(keys::FACET_COUNTS).and_then(|facet_counts| {
            let Some(value) = facet_counts.and_then(|f| f.get(key)).filter(|v| !v.is_null()) else {
                return Ok(Vec::new());
            };
            let section = value
                .as_named_list()
                .ok_or_else(|| DecodeError::invalid(keys::FACET_COUNTS, key, key, "named list", value))?;
            decode(section, &self.config)
        });
        traced(key, decoded, Vec::len)
    }
}

fn cached<T>(
    cell: &OnceLock<Result<T, DecodeError>>,
    init: impl FnOnce() -> Result<T, DecodeError>,
) -> Result<&T, DecodeError> {
    cell.get_or_init(init).as_ref().map_err(Clone::clone)
}

fn traced<T>(
    section: &'static str,
    result: Result<T, DecodeError>,
    entries: impl FnOnce(&T) -> usize,
) -> Result<T, DecodeError> {
    match &result {
        Ok(value) => tracing::debug!(section, entries = entries(value), "Decoded response section"),
        Err(error) => tracing::warn!(section, %error, "Failed to decode response section"),
    }
    result
}
