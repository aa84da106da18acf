// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use proptest::prelude::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    fractional = { 12345.6, "12345.6" },
    integral = { 1.0, "1" },
    negative = { -9.81, "-9.81" },
    negative_zero = { -0.0, "0" },
    small = { 0.00015, "0.00015" },
)]
fn float_formatting(value: f64, expected: &str) {
    assert_eq!(format_float(value), expected);
}

proptest! {
    #[test]
    fn float_formatting_never_uses_comma(value in -1.0e9f64..1.0e9f64) {
        let text = format_float(value);
        prop_assert!(!text.contains(','));
        prop_assert_eq!(text.parse::<f64>().unwrap(), if value == 0.0 { 0.0 } else { value });
    }
}

#[test]
fn vector_display() {
    assert_eq!(Vector3::new(0.0, 0.0, -9.81).to_string(), "(0 0 -9.81)");
}

#[test]
fn int_array_display() {
    assert_eq!(Value::IntArray(vec![0, 3, 2, 1]).to_string(), "(0 3 2 1)");
}

#[test]
fn json_null_is_skipped() {
    assert_eq!(Value::from_json(&json!(null)), None);
}

#[parameterized(
    boolean = { json!(true), Value::Str("true".into()) },
    integer = { json!(4), Value::Int(4) },
    float = { json!(0.7), Value::Float(0.7) },
    ints = { json!([2, 3, 1]), Value::IntArray(vec![2, 3, 1]) },
    vector = { json!([1.5, 0, 2]), Value::Vector(Vector3::new(1.5, 0.0, 2.0)) },
    words = { json!(["inlet", "outlet"]), Value::Str("(inlet outlet)".into()) },
)]
fn json_conversion(input: serde_json::Value, expected: Value) {
    assert_eq!(Value::from_json(&input), Some(expected));
}

#[test]
fn json_array_of_objects_becomes_list_of_nodes() {
    let value = Value::from_json(&json!([{ "file": "a.eMesh", "level": 1 }])).unwrap();
    let items = value.as_list().unwrap();
    assert_eq!(items.len(), 1);
    let node = items[0].as_node().unwrap();
    assert_eq!(node.get("level"), Some(&Value::Int(1)));
}

#[test]
fn int_array_of_three_reads_as_vector() {
    let value = Value::IntArray(vec![1, 2, 3]);
    assert_eq!(value.as_vector(), Some(Vector3::new(1.0, 2.0, 3.0)));
}

#[test]
fn numeric_views() {
    assert_eq!(Value::Int(3).as_f64(), Some(3.0));
    assert_eq!(Value::Float(4.0).as_i64(), Some(4));
    assert_eq!(Value::Float(4.5).as_i64(), None);
    assert_eq!(Value::Str("x".into()).as_f64(), None);
}
