//! munassist - Model United Nations Preparation Assistant
//!
//! Composes delegation-aware prompts (position papers, resolutions, speeches,
//! crisis statements, negotiation plans, research briefs) and sends them to
//! the Hugging Face Inference API through a retrying pipeline.
//!
//! ## Core Features
//!
//! - **Prompt Templates**: six MUN modes plus a generic fallback
//! - **Country Profiles**: stance, allies and priorities per delegation
//! - **Resilient Dispatch**: bounded retries with exponential backoff
//! - **Classified Failures**: every outcome ends in one labelled result
//!
//! ## Quick Start
//!
//! ```ignore
//! use munassist::ai::{
//!     GenerationParameters, HuggingFaceTransport, InferencePipeline, Mode,
//!     PromptComposer, PromptRequest, RequestContext, RequestDispatcher, RetryPolicy,
//! };
//!
//! let dispatcher = RequestDispatcher::new(HuggingFaceTransport::hosted()?, RetryPolicy::default());
//! let pipeline = InferencePipeline::new(
//!     PromptComposer::default(),
//!     dispatcher,
//!     GenerationParameters::default(),
//! );
//! let ctx = RequestContext::new(
//!     PromptRequest::new(Mode::PositionPaper, "India", "UNSC", "Cyber Security", ""),
//!     "gpt2",
//! );
//! let response = pipeline.run(ctx, &api_key, &CancellationToken::new()).await;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt composition, transport, dispatcher, normalization
//! - [`config`]: layered configuration
//! - [`cli`]: command implementations and terminal output

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorClassifier, ErrorKind, InferenceError, MunError, Result};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use ai::{
    InferencePipeline, InferenceResult, Mode, ModeSelection, PromptComposer, RequestContext,
    RequestDispatcher, ResponseContext,
};
