// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Insertion-ordered dictionary node.

use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from keys to [`Value`]s.
///
/// Keys are unique. Insertion order is kept because some consumers are
/// order-sensitive (vertex indices in `blockMeshDict`, patch order on disk).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DictNode {
    entries: Vec<(String, Value)>,
}

impl DictNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. An existing key keeps its position and gets the new
    /// value; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_node(&self, key: &str) -> Option<&DictNode> {
        self.get(key).and_then(Value::as_node)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert every entry of `other`, overriding keys already present.
    pub fn merge(&mut self, other: DictNode) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Build a node from a JSON object, skipping `null` members.
    pub fn from_json_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut node = DictNode::new();
        for (key, json) in map {
            if let Some(value) = Value::from_json(json) {
                node.insert(key.clone(), value);
            }
        }
        node
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DictNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = DictNode::new();
        for (k, v) in iter {
            node.insert(k, v);
        }
        node
    }
}

impl Serialize for DictNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
