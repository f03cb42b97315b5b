#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for grouped results

mod common;

use common::{GROUP_RESPONSE, SIMPLE_GROUP_RESPONSE, from_json, load, load_with};
use search_response::{DecodeError, DecoderConfig, DocumentList, Group, GroupCommand, GroupResult, Value};
use serde_json::json;

#[test]
fn test_field_function_and_query_commands() {
    let response = load(GROUP_RESPONSE);
    let grouped = response.group_response().unwrap().unwrap();

    let names: Vec<_> = grouped.values().iter().map(GroupCommand::name).collect();
    assert_eq!(names, vec!["acco_id", "sum(price, price)", "country:fr"]);

    let acco = &grouped.values()[0];
    assert_eq!(acco.matches(), 30_000_000);
    assert_eq!(acco.ngroups(), Some(5687));
    assert_eq!(acco.values().len(), 10);
    assert_eq!(acco.values()[0].group_value(), Some("116_ar"));
    assert_eq!(acco.values()[9].group_value(), Some("708_hi"));
    let found: Vec<_> = acco
        .values()
        .iter()
        .map(|g| g.documents().map_or(0, DocumentList::num_found))
        .collect();
    assert_eq!(found, vec![2236, 2234, 1020, 1030, 2236, 2234, 4984, 4984, 4627, 4627]);

    let sum = grouped.command("sum(price, price)").unwrap();
    let sums: Vec<_> = sum.values().iter().filter_map(Group::group_value).collect();
    assert_eq!(
        sums,
        vec![
            "95000.0", "91400.0", "104800.0", "99400.0", "109600.0", "102400.0", "116800.0",
            "107800.0", "136200.0", "131400.0",
        ]
    );
    assert_eq!(sum.matches(), 30_000_000);
    assert_eq!(sum.ngroups(), None);
    assert_eq!(sum.values().len(), 10);
    assert_eq!(sum.values()[0].group_value(), Some("95000.0"));
    assert_eq!(sum.values()[0].documents().unwrap().num_found(), 43666);

    let query = grouped.command("country:fr").unwrap();
    assert_eq!(query.ngroups(), None);
    assert_eq!(query.values().len(), 1);
    assert_eq!(query.values()[0].group_value(), Some("country:fr"));
    assert_eq!(query.values()[0].documents().unwrap().num_found(), 57074);
}

#[test]
fn test_group_documents_are_kept() {
    let response = load(GROUP_RESPONSE);
    let grouped = response.group_response().unwrap().unwrap();
    for command in grouped.values() {
        for group in command.values() {
            let docs = group.documents().unwrap();
            assert_eq!(docs.len(), 2, "{}", command.name());
        }
    }

    let first = grouped.values()[0].values()[0].documents().unwrap();
    assert_eq!(
        first.get(0).unwrap().field_value("acco_id"),
        Some(&Value::from("116_AR"))
    );
}

#[test]
fn test_simple_format_is_one_group() {
    let response = load(SIMPLE_GROUP_RESPONSE);
    let grouped = response.group_response().unwrap().unwrap();
    assert_eq!(grouped.values().len(), 1);

    let command = &grouped.values()[0];
    assert_eq!(command.ngroups(), Some(5687));
    assert_eq!(command.values().len(), 1);

    let group = &command.values()[0];
    assert_eq!(group.group_value(), Some("acco_id"));
    let docs = group.documents().unwrap();
    assert_eq!(docs.num_found(), command.matches());
    assert_eq!(docs.len(), 10);

    let ids: Vec<_> = docs
        .iter()
        .filter_map(|d| d.field_value("acco_id").and_then(Value::as_str))
        .collect();
    assert_eq!(
        ids,
        vec![
            "116_AR", "116_HI", "953_AR", "953_HI", "954_AR", "954_HI", "546_AR", "546_HI",
            "708_AR", "708_HI",
        ]
    );
}

#[test]
fn test_nested_groups() {
    let response = from_json(json!({
        "grouped": {
            "country": {
                "matches": 12,
                "groups": [
                    {
                        "groupValue": "fr",
                        "matches": 9,
                        "ngroups": 2,
                        "groups": [
                            { "groupValue": "paris", "doclist": { "numFound": 6, "start": 0, "docs": [] } },
                            { "groupValue": "lyon", "doclist": { "numFound": 3, "start": 0, "docs": [] } }
                        ]
                    },
                    { "groupValue": "de", "doclist": { "numFound": 3, "start": 0, "docs": [] } }
                ]
            }
        }
    }));

    let grouped = response.group_response().unwrap().unwrap();
    let country = &grouped.values()[0];
    assert_eq!(country.values().len(), 2);

    let GroupResult::Nested(france) = country.values()[0].result() else {
        panic!("expected nested groups under `fr`");
    };
    assert_eq!(france.matches(), 9);
    assert_eq!(france.ngroups(), Some(2));
    let cities: Vec<_> = france.values().iter().filter_map(Group::group_value).collect();
    assert_eq!(cities, vec!["paris", "lyon"]);

    assert_eq!(country.values()[1].documents().unwrap().num_found(), 3);
}

#[test]
fn test_nested_command_under_null_group_value() {
    let response = from_json(json!({
        "grouped": {
            "country": {
                "matches": 3,
                "groups": [{
                    "groupValue": null,
                    "matches": 3,
                    "groups": [{ "groupValue": "paris", "doclist": { "numFound": 3, "docs": [] } }]
                }]
            }
        }
    }));

    let grouped = response.group_response().unwrap().unwrap();
    let group = &grouped.values()[0].values()[0];
    assert_eq!(group.group_value(), None);
    let GroupResult::Nested(nested) = group.result() else {
        panic!("expected nested groups under the null group");
    };
    assert_eq!(nested.name(), "country");
    assert_eq!(nested.values()[0].group_value(), Some("paris"));
}

#[test]
fn test_depth_limit_applies_to_nesting() {
    let nested = json!({
        "grouped": {
            "country": {
                "matches": 1,
                "groups": [{
                    "groupValue": "fr",
                    "matches": 1,
                    "groups": [{ "groupValue": "paris", "doclist": { "numFound": 1, "docs": [] } }]
                }]
            }
        }
    });
    let body = nested.to_string();

    assert!(load_with(&body, DecoderConfig::default().with_max_group_depth(2))
        .group_response()
        .is_ok());

    let err = load_with(&body, DecoderConfig::default().with_max_group_depth(1))
        .group_response()
        .unwrap_err();
    assert!(matches!(err, DecodeError::TooDeep { limit: 1, .. }));
}

#[test]
fn test_null_group_value() {
    let response = from_json(json!({
        "grouped": {
            "acco_id": {
                "matches": 3,
                "groups": [{ "groupValue": null, "doclist": { "numFound": 3, "docs": [] } }]
            }
        }
    }));
    let grouped = response.group_response().unwrap().unwrap();
    assert_eq!(grouped.values()[0].values()[0].group_value(), None);
}

#[test]
fn test_malformed_commands_are_errors() {
    let missing_matches = from_json(json!({
        "grouped": { "acco_id": { "ngroups": 3, "groups": [] } }
    }));
    let err = missing_matches.group_response().unwrap_err();
    assert_eq!(err.to_string(), "grouped/acco_id: missing required field `matches`");

    let bad_group = from_json(json!({
        "grouped": { "acco_id": { "matches": 3, "groups": [{ "groupValue": "x" }] } }
    }));
    let err = bad_group.group_response().unwrap_err();
    assert!(matches!(err, DecodeError::UnrecognizedShape { ref entry, .. } if entry == "acco_id/groups[0]"));
}

#[test]
fn test_ungrouped_response_has_no_groups() {
    let response = from_json(json!({ "response": { "numFound": 0, "docs": [] } }));
    assert!(response.group_response().unwrap().is_none());
}
