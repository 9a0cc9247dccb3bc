//! Tests for invdesk-model wire contracts.

use std::collections::{BTreeMap, BTreeSet};

use invdesk_model::{
    BulkOperationResult, BulkRequest, BulkResponse, BulkTarget, FilterSnapshot, RecordId,
    ResponseStatus,
};

fn ids(values: &[&str]) -> BTreeSet<RecordId> {
    values.iter().map(|v| RecordId::new(*v).unwrap()).collect()
}

#[test]
fn explicit_request_serializes_as_id_array() {
    let request = BulkRequest::ids(ids(&["5", "9"]));
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({ "ids": ["5", "9"] }));
}

#[test]
fn all_matching_request_flattens_filter() {
    let mut filters = BTreeMap::new();
    filters.insert("fornecedor".to_string(), "10".to_string());
    let request = BulkRequest::all_matching("abc", None, filters);
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "all_matching": true,
            "q": "abc",
            "filters": { "fornecedor": "10" }
        })
    );
}

#[test]
fn response_accepts_snake_and_camel_case() {
    let snake: BulkResponse =
        serde_json::from_str(r#"{"status":"ok","removed_ids":[5,"9"]}"#).unwrap();
    let camel: BulkResponse = serde_json::from_str(r#"{"removedIds":["5","9"]}"#).unwrap();
    assert_eq!(snake.removed_ids, camel.removed_ids);
    assert_eq!(snake.status, Some(ResponseStatus::Ok));
}

#[test]
fn response_with_unknown_status_still_decodes() {
    let response: BulkResponse =
        serde_json::from_str(r#"{"status":"partial","removed":3}"#).unwrap();
    assert_eq!(response.status, Some(ResponseStatus::Other));
    assert_eq!(response.removed, Some(3));
}

#[test]
fn empty_object_decodes_to_default() {
    let response: BulkResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(response, BulkResponse::default());
}

#[test]
fn unconfirmed_ids_are_the_difference() {
    let result = BulkOperationResult {
        requested: BulkTarget::Ids(ids(&["1", "2", "3"])),
        removed_ids: Some(ids(&["1", "3"])),
        removed_count: Some(2),
        ambiguous: false,
    };
    assert_eq!(result.unconfirmed_ids(), ids(&["2"]));
    assert!(!result.is_complete());
}

#[test]
fn filter_target_has_no_requested_count() {
    let target = BulkTarget::AllMatching(FilterSnapshot::new("abc"));
    assert_eq!(target.requested_count(), None);
    assert!(target.is_all_matching());
}
