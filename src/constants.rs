//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Inference endpoint constants
pub mod inference {
    /// Hugging Face hosted inference base URL (model identifier is appended)
    pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models/";

    /// Default model identifier
    pub const DEFAULT_MODEL: &str = "meta-llama/Llama-2-7b-chat-hf";

    /// Default maximum new tokens per generation
    pub const DEFAULT_MAX_TOKENS: u32 = 800;

    /// Default sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Accepted temperature range (inclusive)
    pub const MIN_TEMPERATURE: f32 = 0.0;
    pub const MAX_TEMPERATURE: f32 = 2.0;

    /// Environment variable consulted when no API key is configured
    pub const API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";
}

/// Credential format constants
pub mod credential {
    /// Required prefix of a Hugging Face access token
    pub const TOKEN_PREFIX: &str = "hf_";

    /// Tokens must be strictly longer than this
    pub const MIN_TOKEN_LEN_EXCLUSIVE: usize = 10;
}

/// Retry constants
pub mod retry {
    /// Maximum attempts per logical request
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_BACKOFF_MS: u64 = 1000;

    /// Linear jitter added per attempt (milliseconds)
    pub const JITTER_STEP_MS: u64 = 200;

    /// Exponent cap so the doubling never overflows
    pub const MAX_BACKOFF_EXPONENT: u32 = 16;

    /// Statuses that are retried with backoff
    pub const RETRYABLE_STATUSES: [u16; 3] = [429, 500, 503];
}

/// HTTP/Network constants
pub mod network {
    /// Per-attempt request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;
}

/// Delegation defaults
pub mod delegation {
    pub const DEFAULT_COUNTRY: &str = "India";
    pub const DEFAULT_COMMITTEE: &str = "UNSC";
}
