//! Unwrapping of the control plane's `{ "data": ... }` response envelope.
//!
//! Payloads are wrapped once, and some upstream versions wrap them twice.
//! At most two layers are removed. A missing `data` key is an empty result,
//! never an error. Only a payload that fails its expected [`Shape`] after
//! unwrapping is rejected.

use crate::core::domain::error::{ProxmoxError, ProxmoxResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const MAX_ENVELOPE_DEPTH: usize = 2;

/// Structural predicate a payload must satisfy after unwrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Array,
    Object,
}

impl Shape {
    fn empty(self) -> Value {
        match self {
            Shape::Array => Value::Array(Vec::new()),
            Shape::Object => Value::Object(Map::new()),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Shape::Array => value.is_array(),
            Shape::Object => value.is_object(),
        }
    }
}

/// Removes up to two envelope layers. Returns `None` when the outer
/// envelope has no (or a null) `data` key.
pub fn unwrap_data(raw: Value) -> Option<Value> {
    let mut current = raw;
    for depth in 0..MAX_ENVELOPE_DEPTH {
        match current {
            Value::Object(mut map) if map.contains_key("data") => {
                current = map.remove("data").unwrap_or(Value::Null);
            }
            // The outer layer is always an envelope; an inner value without
            // `data` is already the payload.
            other if depth > 0 => return non_null(other),
            _ => return None,
        }
    }
    non_null(current)
}

/// Unwraps the envelope and checks the payload against `shape`.
///
/// A missing payload becomes the empty value of `shape`.
///
/// # Errors
/// Returns `ProxmoxError::Shape` when the payload exists but has a
/// different structure.
pub fn unwrap_shaped(raw: Value, shape: Shape) -> ProxmoxResult<Value> {
    match unwrap_data(raw) {
        None => Ok(shape.empty()),
        Some(value) if shape.matches(&value) => Ok(value),
        Some(value) => Err(ProxmoxError::Shape(format!(
            "expected {:?}, got {}",
            shape,
            kind_of(&value)
        ))),
    }
}

/// Unwraps an array payload into its elements.
pub fn unwrap_array(raw: Value) -> ProxmoxResult<Vec<Value>> {
    match unwrap_shaped(raw, Shape::Array)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

/// Unwraps an object payload into its map.
pub fn unwrap_object(raw: Value) -> ProxmoxResult<Map<String, Value>> {
    match unwrap_shaped(raw, Shape::Object)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// Decodes each object element as `T`, skipping elements that are not
/// objects or do not decode. Source order is kept.
pub fn decode_each<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

fn non_null(value: Value) -> Option<Value> {
    (!value.is_null()).then_some(value)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
