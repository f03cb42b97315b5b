#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for search-response integration tests

use search_response::{DecoderConfig, NamedList, QueryResponse};

pub const RANGE_FACETS: &str = include_str!("../fixtures/range_facets.json");
pub const DATE_FACETS: &str = include_str!("../fixtures/date_facets.json");
pub const GROUP_RESPONSE: &str = include_str!("../fixtures/group_response.json");
pub const SIMPLE_GROUP_RESPONSE: &str = include_str!("../fixtures/simple_group_response.json");
pub const INTERVAL_FACETS: &str = include_str!("../fixtures/interval_facets.json");
pub const INTERVAL_RANGE_FACETS: &str = include_str!("../fixtures/interval_range_facets.json");
pub const MULTIPLE_RANGE_FACETS: &str = include_str!("../fixtures/multiple_range_facets.json");
pub const QUERY_RESPONSE: &str = include_str!("../fixtures/query_response.json");

pub fn load(fixture: &str) -> QueryResponse {
    QueryResponse::from_json(fixture).expect("fixture must be a JSON object")
}

pub fn load_with(fixture: &str, config: DecoderConfig) -> QueryResponse {
    let raw = NamedList::from_json_str(fixture).expect("fixture must be a JSON object");
    QueryResponse::with_config(raw, config).expect("config must be valid")
}

pub fn from_json(json: serde_json::Value) -> QueryResponse {
    QueryResponse::new(NamedList::try_from(json).expect("payload must be a JSON object"))
}
