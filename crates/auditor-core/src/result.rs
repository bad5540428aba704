//! Fail-soft endpoint results.

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// Outcome of one endpoint call.
///
/// Transport and decoding failures are carried as [`EndpointResult::Failure`]
/// instead of being propagated, so every caller must check before charting.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointResult {
    /// The decoded JSON body, whatever its shape.
    Success(Value),
    /// The call failed; the message is shown to the user.
    Failure(String),
}

impl EndpointResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// The value that gets displayed. Failures become `{"error": message}`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success(value) => value.clone(),
            Self::Failure(message) => json!({ "error": message }),
        }
    }

    /// Two-space indented JSON, as shown in a result region.
    pub fn pretty(&self) -> String {
        pretty_json(&self.to_value())
    }

    /// True for failures and for bodies carrying a non-null `error` field.
    ///
    /// The backend envelope `{"success": true, "data": ..., "error": null}`
    /// does not count as an error.
    pub fn is_error(&self) -> bool {
        match self {
            Self::Failure(_) => true,
            Self::Success(value) => value.get("error").is_some_and(|e| !e.is_null()),
        }
    }

    /// Looks up a top-level field, falling back to one section inside the
    /// backend's `data` envelope (`{"data": {"bias_analysis": {...}}}`).
    pub fn field(&self, name: &str) -> Option<&Value> {
        let Self::Success(value) = self else {
            return None;
        };

        if let Some(found) = value.get(name) {
            return Some(found);
        }

        let data = value.get("data")?.as_object()?;
        data.get(name).or_else(|| {
            data.values()
                .filter_map(Value::as_object)
                .find_map(|section| section.get(name))
        })
    }

    /// Field lookup that yields nothing for error-marked results.
    pub fn chartable_field(&self, name: &str) -> Option<&Value> {
        if self.is_error() {
            return None;
        }
        self.field(name)
    }
}

impl Serialize for EndpointResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Pretty-prints JSON with two-space indentation.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
