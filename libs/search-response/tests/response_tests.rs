#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

//! Integration tests for the response facade: header, results, highlighting and cursors

mod common;

use common::{QUERY_RESPONSE, RANGE_FACETS, from_json, load};
use search_response::{DecodeError, QueryResponse, Value, parse_date};
use serde_json::json;

#[test]
fn test_header() {
    let response = load(QUERY_RESPONSE);
    let header = response.header().unwrap().unwrap();
    assert_eq!(header.status(), 0);
    assert_eq!(header.q_time(), Some(7));
    assert!(header.partial_results());
    assert_eq!(header.param("sort"), Some("id asc"));
    assert_eq!(header.param("rows"), None);
}

#[test]
fn test_results() {
    let response = load(QUERY_RESPONSE);
    let results = response.results().unwrap().unwrap();
    assert_eq!(results.num_found(), 2);
    assert_eq!(results.start(), 0);
    assert_eq!(results.max_score(), Some(1.25));

    let first = results.get(0).unwrap();
    assert_eq!(first.field_value("id"), Some(&Value::from("SP2514N")));
    assert_eq!(first.first_value("cat"), Some(&Value::from("electronics")));
    assert_eq!(first.field_value("price").and_then(Value::as_f64), Some(92.0));
    assert_eq!(
        first.field_value("manufacturedate_dt").and_then(Value::as_date),
        parse_date("2006-02-13T15:26:37Z")
    );

    let ids: Vec<_> = results
        .iter()
        .filter_map(|d| d.field_value("id").and_then(Value::as_str))
        .collect();
    assert_eq!(ids, vec!["SP2514N", "6H500F0"]);
}

#[test]
fn test_highlighting() {
    let response = load(QUERY_RESPONSE);
    let highlighting = response.highlighting().unwrap().unwrap();
    assert_eq!(highlighting.len(), 2);
    assert_eq!(
        highlighting.snippets("SP2514N", "name").unwrap(),
        &["<em>Samsung</em> SpinPoint P120 SP2514N".to_owned()]
    );
    assert_eq!(highlighting.get("6H500F0").unwrap().fields().count(), 0);
}

#[test]
fn test_next_cursor_mark() {
    assert_eq!(load(QUERY_RESPONSE).next_cursor_mark(), Some("AoEnNkg1MDBGMA=="));
    assert_eq!(load(RANGE_FACETS).next_cursor_mark(), None);
}

#[test]
fn test_sections_fail_independently() {
    let response = from_json(json!({
        "responseHeader": { "QTime": 3 },
        "response": { "numFound": 1, "docs": [{ "id": "a" }] },
        "facet_counts": { "facet_intervals": { "price": { "[0,10]": "many" } } }
    }));

    let err = response.header().unwrap_err();
    assert_eq!(err.section(), Some("responseHeader"));
    assert!(response.interval_facets().is_err());

    assert_eq!(response.results().unwrap().unwrap().len(), 1);
    assert!(response.facet_ranges().unwrap().is_empty());
    assert_eq!(response.header().unwrap_err(), err);
}

#[test]
fn test_invalid_json_body() {
    let err = QueryResponse::from_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, DecodeError::Json(ref msg) if msg.contains("an array")));

    let err = QueryResponse::from_json("{ not json").unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)));
}

#[test]
fn test_raw_access() {
    let response = load(QUERY_RESPONSE);
    let keys: Vec<_> = response.raw().keys().collect();
    assert_eq!(
        keys,
        vec!["responseHeader", "response", "highlighting", "nextCursorMark"]
    );
}
