//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (`<config_dir>/munassist/`) and project (`.munassist/`)
//! level configuration.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::constants::{
    delegation as delegation_constants, inference as inference_constants,
    network as net_constants, retry as retry_constants,
};
use crate::types::{MunError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Inference endpoint settings
    pub inference: InferenceConfig,

    /// Retry budget and backoff
    pub retry: RetryConfig,

    /// Default delegation used when the CLI omits country/committee
    pub delegation: DelegationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            inference: InferenceConfig::default(),
            retry: RetryConfig::default(),
            delegation: DelegationConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `MunError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        let temperature = self.inference.temperature;
        if !(inference_constants::MIN_TEMPERATURE..=inference_constants::MAX_TEMPERATURE)
            .contains(&temperature)
        {
            return Err(MunError::Config(format!(
                "inference temperature must be between {} and {}, got {}",
                inference_constants::MIN_TEMPERATURE,
                inference_constants::MAX_TEMPERATURE,
                temperature
            )));
        }

        if self.inference.max_tokens == 0 {
            return Err(MunError::Config(
                "inference max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.inference.request_timeout_secs == 0 {
            return Err(MunError::Config(
                "inference request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(MunError::Config(
                "retry max_attempts must be greater than 0".to_string(),
            ));
        }

        let url = url::Url::parse(&self.inference.base_url).map_err(|e| {
            MunError::Config(format!(
                "inference base_url '{}' is not a valid URL: {}",
                self.inference.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MunError::Config(format!(
                "inference base_url must use http or https, got: {}",
                url.scheme()
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Inference Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Endpoint prefix; the model identifier is appended
    pub base_url: String,

    /// Model preset alias or raw model identifier
    pub model: String,

    /// Maximum new tokens per generation
    pub max_tokens: u32,

    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,

    /// Per-attempt request timeout in seconds
    pub request_timeout_secs: u64,

    /// Access token. Never written back out; prefer the environment.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: inference_constants::DEFAULT_BASE_URL.to_string(),
            model: inference_constants::DEFAULT_MODEL.to_string(),
            max_tokens: inference_constants::DEFAULT_MAX_TOKENS,
            temperature: inference_constants::DEFAULT_TEMPERATURE,
            request_timeout_secs: net_constants::DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl InferenceConfig {
    /// Configured key, else `HUGGINGFACE_API_KEY`
    pub fn api_key(&self) -> Option<SecretString> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(inference_constants::API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .map(SecretString::from)
    }
}

// =============================================================================
// Retry Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per request, including the first
    pub max_attempts: u32,

    /// Base of the exponential backoff in milliseconds
    pub base_backoff_ms: u64,

    /// Linear jitter added per attempt in milliseconds
    pub jitter_step_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: retry_constants::DEFAULT_MAX_ATTEMPTS,
            base_backoff_ms: retry_constants::BASE_BACKOFF_MS,
            jitter_step_ms: retry_constants::JITTER_STEP_MS,
        }
    }
}

// =============================================================================
// Delegation Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegationConfig {
    pub country: String,
    pub committee: String,
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            country: delegation_constants::DEFAULT_COUNTRY.to_string(),
            committee: delegation_constants::DEFAULT_COMMITTEE.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
