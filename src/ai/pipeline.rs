//! Inference Pipeline
//!
//! One call runs the whole chain and always ends in a single
//! `InferenceResult`:
//!
//! ```text
//! credential check → compose prompt → dispatch (with retries)
//!                                        ├─ 200       → normalize body
//!                                        ├─ non-200   → classify status
//!                                        └─ exhausted → classify terminal
//! ```
//!
//! Conversation state lives in the caller. Each call takes an explicit
//! `RequestContext` and hands back a `ResponseContext`.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::credential;
use super::prompt::{PromptComposer, PromptRequest};
use super::provider::{
    GenerationParameters, InferenceRequest, InferenceTransport, RequestDispatcher,
};
use super::response::{InferenceResult, ResponseNormalizer};
use crate::types::ErrorClassifier;

/// Everything one generation needs besides the credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub prompt: PromptRequest,
    /// Model identifier appended to the base URL
    pub model: String,
}

impl RequestContext {
    pub fn new(prompt: PromptRequest, model: impl Into<String>) -> Self {
        Self {
            prompt,
            model: model.into(),
        }
    }
}

/// What came back from one pipeline call
#[derive(Debug, Clone)]
pub struct ResponseContext {
    pub request: RequestContext,
    /// Rendered prompt; `None` when the credential check stopped the call
    pub prompt_text: Option<String>,
    pub result: InferenceResult,
    /// Network attempts actually sent
    pub attempts: u32,
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
}

/// Credential check, composer, dispatcher and normalizer wired together
pub struct InferencePipeline<T> {
    composer: PromptComposer,
    dispatcher: RequestDispatcher<T>,
    parameters: GenerationParameters,
}

impl<T: InferenceTransport> InferencePipeline<T> {
    pub fn new(
        composer: PromptComposer,
        dispatcher: RequestDispatcher<T>,
        parameters: GenerationParameters,
    ) -> Self {
        Self {
            composer,
            dispatcher,
            parameters,
        }
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    pub fn dispatcher(&self) -> &RequestDispatcher<T> {
        &self.dispatcher
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    /// Run one generation to a terminal result
    pub async fn run(
        &self,
        ctx: RequestContext,
        credential: &SecretString,
        cancel: &CancellationToken,
    ) -> ResponseContext {
        let started = Instant::now();

        if !credential::validate_secret(credential) {
            warn!("Credential failed structural check; no request sent");
            return finish(
                ctx,
                None,
                ErrorClassifier::invalid_credential().into(),
                0,
                started,
            );
        }

        let prompt_text = self.composer.compose_request(&ctx.prompt);
        let request = InferenceRequest::new(&ctx.model, prompt_text.as_str(), self.parameters);

        info!(
            model = %ctx.model,
            mode = %ctx.prompt.mode.label(),
            temperature = self.parameters.temperature,
            max_tokens = self.parameters.max_new_tokens,
            "Sending inference request"
        );

        let report = self.dispatcher.dispatch(credential, &request, cancel).await;

        let result = match report.outcome {
            Ok(raw) if raw.is_success() => ResponseNormalizer::normalize(&raw.body),
            Ok(raw) => ErrorClassifier::classify_status(raw.status, &raw.body).into(),
            Err(failure) => ErrorClassifier::classify_terminal(&failure).into(),
        };

        match &result {
            InferenceResult::Success { text } => {
                info!(attempts = report.attempts, chars = text.len(), "Generation complete");
            }
            InferenceResult::Failure(err) => {
                warn!(
                    attempts = report.attempts,
                    status = ?err.status,
                    category = %err.kind,
                    "Generation failed"
                );
            }
        }

        finish(ctx, Some(prompt_text), result, report.attempts, started)
    }
}

fn finish(
    request: RequestContext,
    prompt_text: Option<String>,
    result: InferenceResult,
    attempts: u32,
    started: Instant,
) -> ResponseContext {
    ResponseContext {
        request,
        prompt_text,
        result,
        attempts,
        elapsed: started.elapsed(),
        completed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ai::prompt::Mode;
    use crate::ai::provider::test_support::{ScriptedTransport, Step};
    use crate::ai::provider::{BackoffPolicy, RetryPolicy};
    use crate::types::ErrorKind;

    fn pipeline(transport: Arc<ScriptedTransport>) -> InferencePipeline<Arc<ScriptedTransport>> {
        let policy = RetryPolicy::new(
            4,
            BackoffPolicy::new(Duration::from_millis(2), Duration::from_millis(1)),
        );
        InferencePipeline::new(
            PromptComposer::default(),
            RequestDispatcher::new(transport, policy),
            GenerationParameters::default(),
        )
    }

    fn context() -> RequestContext {
        RequestContext::new(
            PromptRequest::new(
                Mode::DebateSpeech,
                "India",
                "UNSC",
                "Cyber Security",
                "How do we protect critical infrastructure?",
            ),
            "gpt2",
        )
    }

    async fn run(transport: Arc<ScriptedTransport>, key: &str) -> ResponseContext {
        pipeline(transport)
            .run(context(), &SecretString::from(key), &CancellationToken::new())
            .await
    }

    #[tokio::test]
    async fn test_invalid_credential_sends_nothing() {
        let transport = Arc::new(ScriptedTransport::always(Step::Status(200, "[]")));
        let response = run(transport.clone(), "abc").await;

        assert_eq!(transport.calls(), 0);
        assert_eq!(response.attempts, 0);
        assert!(response.prompt_text.is_none());
        assert_eq!(
            response.result.error().map(|e| e.kind),
            Some(ErrorKind::InvalidCredential)
        );
    }

    #[tokio::test]
    async fn test_success_is_normalized() {
        let transport = Arc::new(ScriptedTransport::always(Step::Status(
            200,
            r#"[{"generated_text":"Honourable chair"}]"#,
        )));
        let response = run(transport.clone(), "hf_1234567890").await;

        assert_eq!(response.result.text(), Some("Honourable chair"));
        assert_eq!(response.attempts, 1);
        let prompt = response.prompt_text.unwrap();
        assert!(prompt.contains("delegate of India"));
        assert_eq!(response.request.model, "gpt2");
    }

    #[tokio::test]
    async fn test_non_retryable_status_is_classified() {
        let transport = Arc::new(ScriptedTransport::always(Step::Status(401, "nope")));
        let response = run(transport.clone(), "hf_1234567890").await;

        assert_eq!(transport.calls(), 1);
        let err = response.result.error().unwrap();
        assert_eq!(err.kind, ErrorKind::AuthFailure);
        assert_eq!(err.status, Some(401));
    }

    #[tokio::test]
    async fn test_upstream_other_keeps_body() {
        let transport = Arc::new(ScriptedTransport::always(Step::Status(404, "Not Found")));
        let response = run(transport, "hf_1234567890").await;
        let err = response.result.error().unwrap();
        assert_eq!(err.kind, ErrorKind::UpstreamOther);
        assert_eq!(err.message, "API Error: 404 - Not Found");
    }

    #[tokio::test]
    async fn test_exhaustion_after_budget() {
        let transport = Arc::new(ScriptedTransport::always(Step::Status(503, "loading")));
        let response = run(transport.clone(), "hf_1234567890").await;

        assert_eq!(transport.calls(), 4);
        assert_eq!(response.attempts, 4);
        let err = response.result.error().unwrap();
        assert_eq!(err.kind, ErrorKind::NetworkExhausted);
        assert_eq!(err.status, Some(503));
    }

    #[tokio::test]
    async fn test_parse_failure_on_success_status() {
        let transport = Arc::new(ScriptedTransport::always(Step::Status(200, "not json")));
        let response = run(transport, "hf_1234567890").await;
        assert_eq!(
            response.result.error().map(|e| e.kind),
            Some(ErrorKind::ParseFailure)
        );
    }

    #[tokio::test]
    async fn test_cancelled_call() {
        let transport = Arc::new(ScriptedTransport::always(Step::Status(200, "[]")));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let response = pipeline(transport.clone())
            .run(context(), &SecretString::from("hf_1234567890"), &cancel)
            .await;

        assert_eq!(transport.calls(), 0);
        assert_eq!(
            response.result.error().map(|e| e.kind),
            Some(ErrorKind::Cancelled)
        );
    }

    #[tokio::test]
    async fn test_credential_checked_every_call() {
        let transport = Arc::new(ScriptedTransport::always(Step::Status(
            200,
            r#"{"generated_text":"ok"}"#,
        )));
        let pipeline = pipeline(transport.clone());
        let cancel = CancellationToken::new();

        let good = pipeline
            .run(context(), &SecretString::from("hf_1234567890"), &cancel)
            .await;
        let bad = pipeline
            .run(context(), &SecretString::from("hf_short"), &cancel)
            .await;

        assert!(good.result.is_success());
        assert!(!bad.result.is_success());
        assert_eq!(transport.calls(), 1);
    }
}
