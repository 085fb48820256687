//! Tests for JSON subset matching

use fwt_validate::{MismatchKind, check_subset, matches};
use serde_json::{Value, json};

fn detected_attack() -> Value {
    json!({
        "type": "detected_attack",
        "request": {
            "method": "POST",
            "url": "/api/execute",
            "headers": {"content-type": "application/json"}
        },
        "attack": {
            "kind": "shell_injection",
            "blocked": true,
            "payload": "{\"command\": \"whoami\"}",
            "metadata": {"command": "whoami"}
        },
        "agent": {"dryMode": false, "library": "firewall-node"},
        "tags": ["a", "b", "c"]
    })
}

#[test]
fn test_nested_subset_matches() {
    let expected = json!({
        "type": "detected_attack",
        "attack": {"kind": "shell_injection", "blocked": true}
    });
    assert!(matches(&detected_attack(), &expected));
    assert!(check_subset(&detected_attack(), &expected).is_ok());
}

#[test]
fn test_empty_object_matches_any_mapping() {
    assert!(matches(&detected_attack(), &json!({})));
    assert!(matches(&json!({}), &json!({})));
    assert!(matches(&json!({"a": {"b": 1}}), &json!({"a": {}})));
}

#[test]
fn test_missing_key_reports_path() {
    let err = check_subset(&detected_attack(), &json!({"attack": {"source": "body"}})).unwrap_err();

    assert_eq!(err.kind(), MismatchKind::MissingKey);
    assert_eq!(err.path(), "$.attack");
    assert!(err.to_string().contains("Key 'source' not found"));
}

#[test]
fn test_key_on_non_mapping_is_missing() {
    let err = check_subset(&json!({"agent": "v1"}), &json!({"agent": {"library": "x"}})).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::MissingKey);
}

#[test]
fn test_value_mismatch() {
    let err = check_subset(&detected_attack(), &json!({"attack": {"blocked": false}})).unwrap_err();

    assert_eq!(err.kind(), MismatchKind::ValueMismatch);
    assert_eq!(err.path(), "$.attack.blocked");
    assert!(err.to_string().contains("false != true"));
}

#[test]
fn test_numeric_equality_is_exact() {
    assert!(matches(&json!({"total": 1}), &json!({"total": 1})));
    assert!(!matches(&json!({"total": 1}), &json!({"total": 2})));
    assert!(!matches(&json!({"ratio": 0.1}), &json!({"ratio": 0.10000001})));
}

#[test]
fn test_json_strings_compare_by_parsed_value() {
    assert!(matches(&json!("{\"a\":1}"), &json!("{ \"a\": 1 }")));
    assert!(matches(
        &detected_attack(),
        &json!({"attack": {"payload": "{\n  \"command\": \"whoami\"\n}"}})
    ));
    assert!(!matches(&json!("{\"a\":1}"), &json!("{\"a\":2}")));
}

#[test]
fn test_plain_strings_need_raw_equality() {
    assert!(matches(&json!("whoami"), &json!("whoami")));
    assert!(!matches(&json!("whoami"), &json!("who am i")));
}

#[test]
fn test_list_containment_is_unordered() {
    let actual = json!([{"a": 1}, {"b": 2}]);
    assert!(matches(&actual, &json!([{"b": 2}, {"a": 1}])));
    assert!(matches(&detected_attack(), &json!({"tags": ["c", "a"]})));
}

#[test]
fn test_list_elements_may_share_a_match() {
    let actual = json!([{"method": "GET", "path": "/api/pets/"}]);
    let expected = json!([{"method": "GET"}, {"path": "/api/pets/"}]);
    assert!(matches(&actual, &expected));
}

#[test]
fn test_missing_list_item() {
    let err = check_subset(&json!({"tags": ["a", "b"]}), &json!({"tags": ["a", "z"]})).unwrap_err();

    assert_eq!(err.kind(), MismatchKind::MissingListItem);
    assert_eq!(err.path(), "$.tags");
    assert!(err.to_string().contains("\"z\""));
}

#[test]
fn test_expected_list_against_non_list() {
    let err = check_subset(&json!({"tags": "a"}), &json!({"tags": []})).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::MissingListItem);
}

#[test]
fn test_null_actual_never_matches() {
    assert!(!matches(&Value::Null, &json!({"type": "started"})));
    assert!(!matches(&Value::Null, &json!(1)));
    assert!(!matches(&Value::Null, &json!({})));
    assert!(!matches(&Value::Null, &Value::Null));

    let err = check_subset(&json!({"user": null}), &json!({"user": {"id": "1"}})).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::NullActual);
    assert_eq!(err.path(), "$.user");
}

#[test]
fn test_matching_is_monotonic_in_actual() {
    let expected = json!({"attack": {"kind": "shell_injection"}, "tags": ["a"]});
    let mut actual = detected_attack();
    assert!(matches(&actual, &expected));

    actual["extra"] = json!({"unrelated": [1, 2, 3]});
    actual["attack"]["extra"] = json!("more");
    if let Some(tags) = actual["tags"].as_array_mut() {
        tags.push(json!("d"));
    }
    assert!(matches(&actual, &expected));
}

#[test]
fn test_matches_and_check_subset_agree() {
    let cases = [
        (detected_attack(), json!({"type": "detected_attack"})),
        (detected_attack(), json!({"type": "started"})),
        (json!([1, 2, 3]), json!([3, 1])),
        (json!([1, 2, 3]), json!([4])),
        (Value::Null, json!({})),
        (json!({"a": [{"b": 1}, {"b": 2}]}), json!({"a": [{"b": 2}]})),
        (json!({"a": [{"b": 1}]}), json!({"a": [{"c": 1}]})),
        (json!({"a": "{\"x\": 1}"}), json!({"a": "{ \"x\": 1 }"})),
        (json!({"a": 1}), json!({"a": [1]})),
        (json!({"a": [1]}), json!({"a": {"b": 1}})),
    ];
    for (actual, expected) in cases {
        assert_eq!(matches(&actual, &expected), check_subset(&actual, &expected).is_ok());
    }
}

#[test]
fn test_large_list_containment() {
    let events: Vec<Value> = (0..2_000)
        .map(|i| json!({"type": "heartbeat", "seq": i, "agent": {"library": "firewall-node"}}))
        .collect();
    let actual = json!({"events": events});

    let present = json!({"events": [{"seq": 1_999}, {"seq": 0}, {"seq": 1_000}]});
    assert!(matches(&actual, &present));
    assert!(check_subset(&actual, &present).is_ok());

    let absent = json!({"events": [{"seq": 0}, {"seq": 5_000}]});
    assert!(!matches(&actual, &absent));
    let err = check_subset(&actual, &absent).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::MissingListItem);
    assert_eq!(err.path(), "$.events");
}
