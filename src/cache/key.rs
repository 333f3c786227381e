//! Cache keys for the request cache
//!
//! A key is an ordered list of JSON values (endpoint name followed by query
//! parameters) encoded into one canonical string. Object keys are sorted while
//! encoding, so two logically equal keys always produce the same string.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur when building a key from a serializable value
#[derive(Debug, Error)]
pub enum CacheKeyError {
    /// The value could not be represented as JSON
    #[error("Cache key is not representable as JSON: {0}")]
    NotJson(#[from] serde_json::Error),
}

/// A stable identifier for one logical request
///
/// Built either from parts (`from_parts`, `new`) or taken verbatim from a
/// string (`From<&str>`), e.g. `"weather:40.0,-75.0"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds a key from an ordered sequence of JSON values
    ///
    /// # Example
    /// ```
    /// use apishowcase::cache::CacheKey;
    /// use serde_json::json;
    ///
    /// let key = CacheKey::from_parts([json!("weather"), json!(40.0), json!(-75.0)]);
    /// assert_eq!(key.as_str(), r#"["weather",40.0,-75.0]"#);
    /// ```
    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let parts = parts.into_iter().map(canonicalize).collect();
        Self(Value::Array(parts).to_string())
    }

    /// Builds a key from any serializable value
    ///
    /// Sequences (tuples, arrays, vectors) become the key parts directly; any
    /// other value becomes a single-part key.
    pub fn new<S: Serialize + ?Sized>(value: &S) -> Result<Self, CacheKeyError> {
        match serde_json::to_value(value)? {
            Value::Array(parts) => Ok(Self::from_parts(parts)),
            other => Ok(Self::from_parts([other])),
        }
    }

    /// Returns the encoded key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rebuilds objects with their keys in sorted order, recursively
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k, canonicalize(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for CacheKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
