// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;

#[test]
fn insertion_order_is_preserved() {
    let node = DictNode::new()
        .with("vertices", 1)
        .with("blocks", 2)
        .with("edges", 3);
    let keys: Vec<&str> = node.keys().collect();
    assert_eq!(keys, vec!["vertices", "blocks", "edges"]);
}

#[test]
fn reinsert_replaces_in_place() {
    let mut node = DictNode::new().with("a", 1).with("b", 2);
    let previous = node.insert("a", 10);
    assert_eq!(previous, Some(Value::Int(1)));
    assert_eq!(node.len(), 2);
    assert_eq!(node.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(node.get("a"), Some(&Value::Int(10)));
}

#[test]
fn merge_overrides_and_appends() {
    let mut base = DictNode::new().with("p", 0.3).with("U", 0.7);
    base.merge(DictNode::new().with("U", 0.5).with("k", 0.7));
    assert_eq!(base.keys().collect::<Vec<_>>(), vec!["p", "U", "k"]);
    assert_eq!(base.get_f64("U"), Some(0.5));
}

#[test]
fn remove_returns_value() {
    let mut node = DictNode::new().with("a", "x");
    assert_eq!(node.remove("a"), Some(Value::Str("x".into())));
    assert!(node.is_empty());
    assert_eq!(node.remove("a"), None);
}

#[test]
fn from_json_skips_nulls_and_keeps_order() {
    let json = json!({ "endTime": 1000, "startFrom": "latestTime", "unused": null, "deltaT": 1 });
    let node = DictNode::from_json_map(json.as_object().unwrap());
    assert_eq!(
        node.keys().collect::<Vec<_>>(),
        vec!["endTime", "startFrom", "deltaT"]
    );
}

#[test]
fn serializes_as_ordered_map() {
    let node = DictNode::new().with("z", 1).with("a", "b");
    assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"z":1,"a":"b"}"#);
}
