//! Response Normalization
//!
//! Turns a status-200 body into canonical text. The endpoint answers in
//! several shapes depending on the model family:
//! - a batch: `[{"generated_text": "..."}]`
//! - a single object: `{"generated_text": "..."}`
//! - anything else: a bare string, number, or other JSON value
//!
//! Only a body that is not JSON at all is a failure.

use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use crate::types::{ErrorClassifier, InferenceError};

/// Placeholder when the first batch element carries no text
pub const NO_TEXT_RETURNED: &str = "(no text returned)";

const GENERATED_TEXT: &str = "generated_text";

/// Terminal result of one pipeline call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceResult {
    Success { text: String },
    Failure(InferenceError),
}

impl InferenceResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&InferenceError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<String, InferenceError> {
        match self {
            Self::Success { text } => Ok(text),
            Self::Failure(err) => Err(err),
        }
    }
}

impl From<InferenceError> for InferenceResult {
    fn from(err: InferenceError) -> Self {
        Self::Failure(err)
    }
}

impl fmt::Display for InferenceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { text } => write!(f, "{}", text),
            Self::Failure(err) => write!(f, "{}", err),
        }
    }
}

/// Closed set of body shapes
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationPayload {
    Batch(Vec<Value>),
    Single(Map<String, Value>),
    Opaque(Value),
}

impl From<Value> for GenerationPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Batch(items),
            Value::Object(map) => Self::Single(map),
            other => Self::Opaque(other),
        }
    }
}

impl GenerationPayload {
    /// Parse a raw body; `None` when it is not JSON
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Value>(body).ok().map(Self::from)
    }

    /// Canonical text for this shape
    pub fn into_text(self) -> String {
        match self {
            Self::Batch(items) => match items.first() {
                None => Value::Array(items).to_string(),
                Some(Value::Object(first)) => match first.get(GENERATED_TEXT) {
                    Some(Value::String(text)) => text.clone(),
                    Some(other) => other.to_string(),
                    None => NO_TEXT_RETURNED.to_string(),
                },
                Some(_) => NO_TEXT_RETURNED.to_string(),
            },
            Self::Single(map) => match map.get(GENERATED_TEXT) {
                Some(Value::String(text)) if !text.is_empty() => text.clone(),
                _ => Value::Object(map).to_string(),
            },
            Self::Opaque(Value::String(text)) => text,
            Self::Opaque(other) => other.to_string(),
        }
    }
}

/// Interprets success bodies
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn normalize(body: &str) -> InferenceResult {
        match GenerationPayload::parse(body) {
            Some(payload) => InferenceResult::success(payload.into_text()),
            None => {
                debug!(body_len = body.len(), "Response body is not JSON");
                ErrorClassifier::parse_failure().into()
            }
        }
    }
}
