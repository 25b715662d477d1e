//! Inference Provider Abstraction
//!
//! Request/response types for the hosted text-generation endpoint and the
//! `InferenceTransport` seam the dispatcher drives.
//!
//! ## Modules
//!
//! - `backoff`: pure retry delay policy
//! - `dispatcher`: bounded retry loop over a transport
//! - `huggingface`: reqwest transport for the Hugging Face Inference API

mod backoff;
mod dispatcher;
mod huggingface;

pub use backoff::{BackoffPolicy, RetryPolicy};
pub use dispatcher::{DispatchReport, RequestDispatcher, TerminalFailure, is_retryable_status};
pub use huggingface::HuggingFaceTransport;

#[cfg(test)]
pub(crate) use dispatcher::test_support;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::constants::inference as inference_constants;
use crate::types::{MunError, Result};

// =============================================================================
// Inference Request
// =============================================================================

/// Generation parameters sent alongside the prompt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub do_sample: bool,
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: inference_constants::DEFAULT_MAX_TOKENS,
            temperature: inference_constants::DEFAULT_TEMPERATURE,
            do_sample: true,
            return_full_text: false,
        }
    }
}

impl GenerationParameters {
    /// Sampling parameters with range checks on tokens and temperature
    pub fn new(max_new_tokens: u32, temperature: f32) -> Result<Self> {
        if max_new_tokens == 0 {
            return Err(MunError::InvalidInput(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        if !(inference_constants::MIN_TEMPERATURE..=inference_constants::MAX_TEMPERATURE)
            .contains(&temperature)
        {
            return Err(MunError::InvalidInput(format!(
                "temperature must be between {} and {}, got {}",
                inference_constants::MIN_TEMPERATURE,
                inference_constants::MAX_TEMPERATURE,
                temperature
            )));
        }
        Ok(Self {
            max_new_tokens,
            temperature,
            ..Self::default()
        })
    }
}

/// One logical inference request. Built once per dispatch and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    model: String,
    prompt: String,
    parameters: GenerationParameters,
}

impl InferenceRequest {
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        parameters: GenerationParameters,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            parameters,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    /// JSON body for the endpoint
    pub fn payload(&self) -> InferencePayload<'_> {
        InferencePayload {
            inputs: &self.prompt,
            parameters: &self.parameters,
        }
    }
}

/// Wire body: `{"inputs": ..., "parameters": {...}}`
#[derive(Debug, Serialize)]
pub struct InferencePayload<'a> {
    pub inputs: &'a str,
    pub parameters: &'a GenerationParameters,
}

// =============================================================================
// Raw Response
// =============================================================================

/// Status and body of one HTTP exchange, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// A single network exchange with the inference endpoint.
///
/// Implementations perform exactly one request per call and must not retry;
/// `Err` means the exchange failed below HTTP (connect, DNS, TLS, body read).
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    async fn send(
        &self,
        credential: &SecretString,
        request: &InferenceRequest,
    ) -> Result<RawResponse>;

    /// Transport name for logging
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: InferenceTransport + ?Sized> InferenceTransport for std::sync::Arc<T> {
    async fn send(
        &self,
        credential: &SecretString,
        request: &InferenceRequest,
    ) -> Result<RawResponse> {
        (**self).send(credential, request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
