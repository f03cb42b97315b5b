#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Typed decoding of search server query responses.
//!
//! A response arrives as an ordered, loosely-typed [`NamedList`] (built by a
//! wire parser, or from JSON via [`NamedList::from_json_str`]). Wrap it in a
//! [`QueryResponse`] and read its sections as typed values: field, query,
//! date, range and interval facets, grouped results, highlighting, the main
//! result list and the response header.
//!
//! Range facets carry no type tag on the wire; [`classify`] infers numeric,
//! date or interval from each entry's own payload.

pub mod config;
mod decode;
pub mod document;
pub mod error;
pub mod facet;
pub mod group;
pub mod header;
pub mod highlight;
mod json;
pub mod keys;
pub mod named_list;
pub mod response;

pub use config::DecoderConfig;
pub use document::{Document, DocumentList};
pub use error::DecodeError;
pub use facet::{
    Count, DateRange, FacetField, IntervalCount, IntervalFacet, IntervalRange, NumericRange,
    RangeFacet, RangeKind, classify,
};
pub use group::{Group, GroupCommand, GroupResponse, GroupResult};
pub use header::ResponseHeader;
pub use highlight::{DocumentHighlights, Highlighting};
pub use named_list::{NamedList, Value, format_date, parse_date};
pub use response::QueryResponse;
