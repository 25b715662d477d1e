//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! Two layers live here:
//!
//! - **Inference failures** (`ErrorKind`, `InferenceError`): values carried
//!   inside `InferenceResult::Failure`. The pipeline never returns these as `Err`.
//! - **Application errors** (`MunError`): configuration, I/O and client setup
//!   problems, propagated with `?`.
//!
//! `ErrorClassifier` maps every non-success dispatch outcome to exactly one
//! `ErrorKind` with a user-facing message.

use std::time::Duration;
use thiserror::Error;

use crate::ai::provider::TerminalFailure;

// =============================================================================
// Error Kinds
// =============================================================================

/// Closed set of inference failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credential failed the structural check; no request was sent
    InvalidCredential,
    /// Endpoint rejected the credential (401/403)
    AuthFailure,
    /// Endpoint is rate limiting (429)
    RateLimited,
    /// Model is cold-starting (503)
    ModelLoading,
    /// Retry budget spent on transient failures
    NetworkExhausted,
    /// Success body was not JSON
    ParseFailure,
    /// Any other non-success status
    UpstreamOther,
    /// Caller cancelled the request between attempts
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredential => write!(f, "INVALID_CREDENTIAL"),
            Self::AuthFailure => write!(f, "AUTH_FAILURE"),
            Self::RateLimited => write!(f, "RATE_LIMITED"),
            Self::ModelLoading => write!(f, "MODEL_LOADING"),
            Self::NetworkExhausted => write!(f, "NETWORK_EXHAUSTED"),
            Self::ParseFailure => write!(f, "PARSE_FAILURE"),
            Self::UpstreamOther => write!(f, "UPSTREAM_OTHER"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// =============================================================================
// Inference Error
// =============================================================================

/// Classified inference failure with a user-displayable message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceError {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status that produced the failure, when there was one
    pub status: Option<u16>,
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for InferenceError {}

impl InferenceError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps dispatch and parse outcomes to `InferenceError`
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Kind for a non-success HTTP status
    pub fn kind_for_status(status: u16) -> ErrorKind {
        match status {
            401 | 403 => ErrorKind::AuthFailure,
            429 => ErrorKind::RateLimited,
            503 => ErrorKind::ModelLoading,
            _ => ErrorKind::UpstreamOther,
        }
    }

    /// Classify a non-success status and its body
    pub fn classify_status(status: u16, body: &str) -> InferenceError {
        let kind = Self::kind_for_status(status);
        let message = match kind {
            ErrorKind::AuthFailure => format!(
                "Authentication failed ({}). Please check your HuggingFace API key and permissions.",
                status
            ),
            ErrorKind::RateLimited => {
                "Rate limited (429). Try again later or use a smaller model.".to_string()
            }
            ErrorKind::ModelLoading => {
                "Model is currently loading (503). Try again in a few moments.".to_string()
            }
            _ => format!("API Error: {} - {}", status, body),
        };
        InferenceError::new(kind, message).with_status(status)
    }

    /// Classify a dispatch that ended without a response to inspect
    pub fn classify_terminal(failure: &TerminalFailure) -> InferenceError {
        match failure {
            TerminalFailure::InvalidCredential => Self::invalid_credential(),
            TerminalFailure::Exhausted {
                attempts,
                last_status,
                last_error,
            } => {
                let mut message = format!(
                    "Failed to reach the HuggingFace Inference API after {} attempts",
                    attempts
                );
                if let Some(cause) = last_error {
                    message.push_str(&format!(" (last error: {})", cause));
                }
                let err = InferenceError::new(ErrorKind::NetworkExhausted, message);
                match last_status {
                    Some(status) => err.with_status(*status),
                    None => err,
                }
            }
            TerminalFailure::Cancelled { .. } => {
                InferenceError::new(ErrorKind::Cancelled, "Request cancelled before completion.")
            }
        }
    }

    /// Credential rejected before any network call
    pub fn invalid_credential() -> InferenceError {
        InferenceError::new(
            ErrorKind::InvalidCredential,
            "Invalid or missing HuggingFace API key. It should start with 'hf_'.",
        )
    }

    /// Success body that could not be parsed
    pub fn parse_failure() -> InferenceError {
        InferenceError::new(
            ErrorKind::ParseFailure,
            "Unable to parse response JSON from model.",
        )
        .with_status(200)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum MunError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Inference(InferenceError),
}

impl From<InferenceError> for MunError {
    fn from(err: InferenceError) -> Self {
        MunError::Inference(err)
    }
}

pub type Result<T> = std::result::Result<T, MunError>;

impl MunError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
