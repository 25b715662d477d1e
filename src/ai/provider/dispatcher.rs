//! Request Dispatcher
//!
//! Drives one logical inference request through a transport with a bounded
//! number of attempts.
//!
//! ## Strategy
//!
//! 0. Refuse a malformed credential without touching the transport
//! 1. Stop early if the caller has cancelled
//! 2. Send one request under an independent per-attempt timeout
//! 3. 200 → done; 429/500/503 or a network error → back off and retry
//! 4. Any other status → return it untouched for classification
//! 5. Out of attempts → `TerminalFailure::Exhausted`
//!
//! Attempts are strictly sequential. Backoff sleeps race the cancellation
//! token, so a cancelled call returns at the next sleep boundary.

use std::time::Duration;

use secrecy::SecretString;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::{InferenceRequest, InferenceTransport, RawResponse, RetryPolicy};
use crate::ai::credential;
use crate::ai::timeout::with_timeout;
use crate::constants::{network as net_constants, retry as retry_constants};

/// True for statuses worth another attempt
pub fn is_retryable_status(status: u16) -> bool {
    retry_constants::RETRYABLE_STATUSES.contains(&status)
}

/// Why a dispatch ended without a response to inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalFailure {
    /// Credential failed the structural check; nothing was sent
    InvalidCredential,
    /// Every attempt hit a retryable status or a network error.
    /// Exactly one of `last_status`/`last_error` describes the final attempt.
    Exhausted {
        attempts: u32,
        last_status: Option<u16>,
        last_error: Option<String>,
    },
    /// Cancelled before an attempt or during a backoff sleep
    Cancelled { attempts: u32 },
}

/// Outcome of one dispatch plus what it took to get there
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// A status-200 response, or a non-retryable response to classify
    pub outcome: std::result::Result<RawResponse, TerminalFailure>,
    /// Attempts actually sent
    pub attempts: u32,
    /// Backoff waited after each failed attempt, in order
    pub delays: Vec<Duration>,
}

/// Bounded retry loop over an `InferenceTransport`
pub struct RequestDispatcher<T> {
    transport: T,
    policy: RetryPolicy,
    attempt_timeout: Duration,
}

impl<T: InferenceTransport> RequestDispatcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            attempt_timeout: Duration::from_secs(net_constants::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the per-attempt timeout
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[instrument(
        skip(self, credential, request, cancel),
        fields(transport = self.transport.name(), model = request.model())
    )]
    pub async fn dispatch(
        &self,
        credential: &SecretString,
        request: &InferenceRequest,
        cancel: &CancellationToken,
    ) -> DispatchReport {
        if !credential::validate_secret(credential) {
            warn!("Credential failed structural check; no request sent");
            return DispatchReport {
                outcome: Err(TerminalFailure::InvalidCredential),
                attempts: 0,
                delays: Vec::new(),
            };
        }

        let max_attempts = self.policy.max_attempts;
        let mut delays = Vec::new();
        let mut last_status = None;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if cancel.is_cancelled() {
                return cancelled(attempt - 1, delays);
            }

            debug!(attempt, max_attempts, "Dispatch attempt");

            let sent = with_timeout(
                self.attempt_timeout,
                self.transport.send(credential, request),
                "inference request",
            )
            .await;

            match sent {
                Ok(response) if response.is_success() => {
                    info!(attempt, "Inference request succeeded");
                    return DispatchReport {
                        outcome: Ok(response),
                        attempts: attempt,
                        delays,
                    };
                }
                Ok(response) if is_retryable_status(response.status) => {
                    warn!(attempt, status = response.status, "Retryable status");
                    last_status = Some(response.status);
                    last_error = None;
                }
                Ok(response) => {
                    warn!(attempt, status = response.status, "Non-retryable status");
                    return DispatchReport {
                        outcome: Ok(response),
                        attempts: attempt,
                        delays,
                    };
                }
                Err(err) => {
                    warn!(attempt, error = %err, "Network error");
                    last_error = Some(err.to_string());
                    last_status = None;
                }
            }

            if attempt == max_attempts {
                break;
            }

            let delay = self.policy.backoff.delay(attempt);
            debug!(delay_ms = delay.as_millis() as u64, "Retrying after backoff");
            delays.push(delay);

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!(attempt, "Dispatch cancelled during backoff");
                    return cancelled(attempt, delays);
                }
                _ = sleep(delay) => {}
            }
        }

        warn!(attempts = max_attempts, ?last_status, "Retry budget exhausted");
        DispatchReport {
            outcome: Err(TerminalFailure::Exhausted {
                attempts: max_attempts,
                last_status,
                last_error,
            }),
            attempts: max_attempts,
            delays,
        }
    }
}

fn cancelled(attempts: u32, delays: Vec<Duration>) -> DispatchReport {
    DispatchReport {
        outcome: Err(TerminalFailure::Cancelled { attempts }),
        attempts,
        delays,
    }
}
