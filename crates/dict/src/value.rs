// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dictionary values.

use crate::node::DictNode;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Render a float with `.` as the decimal separator, independent of locale.
///
/// Integral values print without a fraction (`1` rather than `1.0`) and
/// negative zero prints as `0`.
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// A 3-component vector (points, velocities, gravity).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components in x, y, z order.
    pub fn components(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }

    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [x, y, z] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {} {})",
            format_float(self.x),
            format_float(self.y),
            format_float(self.z)
        )
    }
}

impl Serialize for Vector3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        for c in self.components() {
            seq.serialize_element(&c)?;
        }
        seq.end()
    }
}

/// A value stored under a dictionary key.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Vector(Vector3),
    IntArray(Vec<i64>),
    Node(DictNode),
    /// Ordered sequence; items may be nodes, vectors, arrays or plain tokens.
    List(Vec<Value>),
}

impl Value {
    /// Numeric view of `Int` and `Float` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&DictNode> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Vector view; integer arrays of length three also qualify.
    pub fn as_vector(&self) -> Option<Vector3> {
        match self {
            Value::Vector(v) => Some(*v),
            Value::IntArray(a) => {
                let floats: Vec<f64> = a.iter().map(|i| *i as f64).collect();
                Vector3::from_slice(&floats)
            }
            _ => None,
        }
    }

    /// Whether the value renders on a single line.
    pub fn is_inline(&self) -> bool {
        !matches!(self, Value::Node(_) | Value::List(_))
    }

    /// Convert a JSON-compatible settings value.
    ///
    /// Returns `None` for `null`, which callers treat as "not set".
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as J;
        match json {
            J::Null => None,
            J::Bool(b) => Some(Value::Str(b.to_string())),
            J::Number(n) => Some(match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            }),
            J::String(s) => Some(Value::Str(s.clone())),
            J::Object(map) => Some(Value::Node(DictNode::from_json_map(map))),
            J::Array(items) => Some(Self::from_json_array(items)),
        }
    }

    fn from_json_array(items: &[serde_json::Value]) -> Value {
        if !items.is_empty() && items.iter().all(|v| v.is_i64()) {
            return Value::IntArray(items.iter().filter_map(|v| v.as_i64()).collect());
        }
        if items.len() == 3 && items.iter().all(|v| v.is_number()) {
            let floats: Vec<f64> = items.iter().filter_map(|v| v.as_f64()).collect();
            if let Some(v) = Vector3::from_slice(&floats) {
                return Value::Vector(v);
            }
        }
        if !items.is_empty() && items.iter().all(|v| v.is_string()) {
            let words: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            return Value::Str(format!("({})", words.join(" ")));
        }
        Value::List(items.iter().filter_map(Value::from_json).collect())
    }
}

impl fmt::Display for Value {
    /// Inline rendering. Nodes and lists render in a compact single-line form;
    /// the writer lays them out over several lines instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => f.write_str(&format_float(*v)),
            Value::Str(s) => f.write_str(s),
            Value::Vector(v) => write!(f, "{}", v),
            Value::IntArray(a) => {
                let parts: Vec<String> = a.iter().map(|i| i.to_string()).collect();
                write!(f, "({})", parts.join(" "))
            }
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "({})", parts.join(" "))
            }
            Value::Node(node) => {
                f.write_str("{")?;
                for (key, value) in node.iter() {
                    write!(f, " {} {};", key, value)?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Vector(v) => v.serialize(serializer),
            Value::IntArray(a) => a.serialize(serializer),
            Value::Node(n) => n.serialize(serializer),
            Value::List(items) => items.serialize(serializer),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vector3> for Value {
    fn from(v: Vector3) -> Self {
        Value::Vector(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::IntArray(v)
    }
}

impl From<DictNode> for Value {
    fn from(v: DictNode) -> Self {
        Value::Node(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
