//! Serde helpers for lenient decoding of control-plane payloads.
//!
//! The control plane is loosely typed: counters arrive as numbers or numeric
//! strings, ids as integers or strings, and fields are routinely missing.
//! These helpers never fail. A value of the wrong type decodes as `None`, so a
//! single malformed field cannot reject a whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a non-negative integer from a number or numeric string.
/// Fractional numbers are truncated.
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
        }
        _ => None,
    }
}

/// Reads a finite float from a number or numeric string.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Reads a string, stringifying numbers (ids are sent either way).
pub fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `deserialize_with` adapters built on the readers above.
pub mod lenient {
    use super::*;

    pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(value_as_u64))
    }

    pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_u64(deserializer)?.and_then(|v| u32::try_from(v).ok()))
    }

    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(value_as_f64))
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(value_as_string))
    }
}
