//! Generate Command
//!
//! Runs one generation through the inference pipeline and prints the text.
//!
//! Usage:
//!   munassist generate --mode "Debate Speech" --topic "Cyber Security" \
//!       --question "How do we protect critical infrastructure?" \
//!       [--country India] [--committee UNSC] [--model mistral] [--output chat.txt]

use chrono::Utc;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::ai::models;
use crate::ai::pipeline::{InferencePipeline, RequestContext};
use crate::ai::prompt::{ModeSelection, PromptComposer, PromptRequest};
use crate::ai::provider::{
    GenerationParameters, HuggingFaceTransport, RequestDispatcher, RetryPolicy,
};
use crate::ai::response::InferenceResult;
use crate::cli::transcript::{self, Role, TranscriptEntry};
use crate::cli::ui::Output;
use crate::config::Config;
use crate::types::{MunError, Result};

/// Flags for one generation; `None` falls back to configuration
#[derive(Default)]
pub struct GenerateOptions {
    pub mode: String,
    pub topic: String,
    pub question: String,
    pub country: Option<String>,
    pub committee: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub output: Option<PathBuf>,
    pub show_prompt: bool,
}

pub async fn run(options: GenerateOptions, config: Config) -> Result<()> {
    if options.topic.trim().is_empty() {
        return Err(MunError::InvalidInput(
            "Please choose or enter a topic before generating".to_string(),
        ));
    }

    let out = Output::new();

    let parameters = GenerationParameters::new(
        options.max_tokens.unwrap_or(config.inference.max_tokens),
        options.temperature.unwrap_or(config.inference.temperature),
    )?;

    let model = models::resolve(
        options
            .model
            .as_deref()
            .unwrap_or(&config.inference.model),
    )
    .to_string();

    let credential = options
        .api_key
        .map(SecretString::from)
        .or_else(|| config.inference.api_key())
        .unwrap_or_else(|| SecretString::from(String::new()));

    let transport = HuggingFaceTransport::new(&config.inference.base_url)?;
    let dispatcher = RequestDispatcher::new(transport, RetryPolicy::from_config(&config.retry))
        .with_attempt_timeout(Duration::from_secs(config.inference.request_timeout_secs));
    let pipeline = InferencePipeline::new(PromptComposer::default(), dispatcher, parameters);

    let mode = ModeSelection::parse(&options.mode);
    let country = options
        .country
        .unwrap_or_else(|| config.delegation.country.clone());
    let committee = options
        .committee
        .unwrap_or_else(|| config.delegation.committee.clone());

    if let Some(warning) = unknown_mode_warning(&mode) {
        out.warning(&warning);
    }

    let ctx = RequestContext::new(
        PromptRequest::new(
            mode,
            country.as_str(),
            committee.as_str(),
            options.topic.as_str(),
            options.question.as_str(),
        ),
        model,
    );

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling request");
            on_interrupt.cancel();
        }
    });

    let asked_at = Utc::now();
    let response = pipeline.run(ctx, &credential, &cancel).await;

    debug!(
        attempts = response.attempts,
        elapsed_ms = response.elapsed.as_millis() as u64,
        "Pipeline finished"
    );

    if options.show_prompt
        && let Some(prompt) = &response.prompt_text
    {
        out.section("Prompt");
        println!("{}", prompt.trim());
    }

    match response.result {
        InferenceResult::Success { text } => {
            out.section(response.request.prompt.mode.label());
            println!("{}", text.trim());
            println!();
            out.caption(&format!(
                "Mode: {} | Country: {}",
                response.request.prompt.mode.label(),
                response.request.prompt.country
            ));

            if let Some(path) = &options.output {
                transcript::append(
                    path,
                    &[
                        TranscriptEntry::new(Role::User, asked_at, options.question.as_str()),
                        TranscriptEntry::new(Role::Assistant, response.completed_at, text),
                    ],
                )?;
                out.success(&format!("Transcript saved to {}", path.display()));
            }
            Ok(())
        }
        InferenceResult::Failure(err) => Err(err.into()),
    }
}

fn unknown_mode_warning(mode: &ModeSelection) -> Option<String> {
    match mode {
        ModeSelection::Unrecognized(raw) => Some(format!(
            "Unknown mode '{}', using the general question template",
            raw
        )),
        ModeSelection::Known(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    fn options(topic: &str, api_key: &str) -> GenerateOptions {
        GenerateOptions {
            mode: "Position Paper".to_string(),
            topic: topic.to_string(),
            question: "q".to_string(),
            api_key: Some(api_key.to_string()),
            ..GenerateOptions::default()
        }
    }

    #[tokio::test]
    async fn test_empty_topic_rejected() {
        let err = run(options("  ", "hf_1234567890"), Config::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MunError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_invalid_key_fails_without_network() {
        let mut config = Config::default();
        config.inference.base_url = "http://127.0.0.1:9/models/".to_string();
        let err = run(options("Cyber Security", "abc"), config)
            .await
            .unwrap_err();
        match err {
            MunError::Inference(e) => assert_eq!(e.kind, ErrorKind::InvalidCredential),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_mode_warning() {
        assert!(unknown_mode_warning(&ModeSelection::parse("debate-speech")).is_none());
        let warning = unknown_mode_warning(&ModeSelection::parse("Press Conference")).unwrap();
        assert!(warning.contains("'Press Conference'"));
    }

    #[tokio::test]
    async fn test_out_of_range_temperature_rejected() {
        let mut opts = options("Cyber Security", "hf_1234567890");
        opts.temperature = Some(5.0);
        assert!(matches!(
            run(opts, Config::default()).await,
            Err(MunError::InvalidInput(_))
        ));
    }
}
