//! Remote API request parameters and responses

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::TransportError;

/// Parameters for a remote API method call
///
/// Ordered so that logging and request encoding are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiParams(BTreeMap<String, String>);

impl ApiParams {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(name.into(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ApiParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("}")
    }
}

/// A decoded remote API response
///
/// Always a JSON object carrying a boolean `ok`. On failure Slack adds an
/// `error` string; on success it may add a non-fatal `warning` string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    /// Wrap a decoded JSON value, checking the `ok` envelope
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        match value {
            Value::Object(map) => {
                if !matches!(map.get("ok"), Some(Value::Bool(_))) {
                    return Err(TransportError::Malformed(
                        "response has no boolean `ok` field".to_string(),
                    ));
                }
                Ok(Self(map))
            }
            other => Err(TransportError::Malformed(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Decode a raw response body
    pub fn from_slice(body: &[u8]) -> Result<Self, TransportError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.0.get("ok"), Some(Value::Bool(true)))
    }

    /// Error identifier reported alongside `ok: false`
    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// Non-fatal warning reported alongside `ok: true`
    pub fn warning(&self) -> Option<&str> {
        self.0.get("warning").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Walk nested objects along `path`
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    /// Deserialize the value found at `path`
    ///
    /// A missing path or a value of the wrong shape is a malformed response.
    pub fn extract<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, TransportError> {
        let dotted = path.join(".");
        let value = self
            .lookup(path)
            .ok_or_else(|| TransportError::Malformed(format!("missing field `{dotted}`")))?;
        T::deserialize(value)
            .map_err(|e| TransportError::Malformed(format!("invalid field `{dotted}`: {e}")))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for ApiResponse {
    type Error = TransportError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
