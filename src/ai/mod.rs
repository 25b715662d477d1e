//! AI Integration Layer
//!
//! Prompt composition, the hosted inference transport, and the retrying
//! pipeline that ties them together.

pub mod credential;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod response;
pub mod timeout;

pub use models::{MODEL_PRESETS, ModelPreset};
pub use pipeline::{InferencePipeline, RequestContext, ResponseContext};
pub use prompt::{
    Committee, CountryProfile, Mode, ModeSelection, PromptComposer, PromptRequest, Registry,
};
pub use provider::{
    BackoffPolicy, DispatchReport, GenerationParameters, HuggingFaceTransport, InferenceRequest,
    InferenceTransport, RawResponse, RequestDispatcher, RetryPolicy, TerminalFailure,
};
pub use response::{GenerationPayload, InferenceResult, ResponseNormalizer};
pub use timeout::with_timeout;
