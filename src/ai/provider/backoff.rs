//! Retry Backoff Policy
//!
//! `delay(attempt) = base * 2^(attempt - 1) + jitter_step * attempt`
//!
//! The jitter grows linearly with the attempt number so that clients which
//! failed together drift apart on later retries. The function is pure; the
//! dispatcher owns the sleeping.

use std::time::Duration;

use crate::config::RetryConfig;
use crate::constants::retry as retry_constants;

/// Exponential backoff with linear jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub base: Duration,
    pub jitter_step: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(retry_constants::BASE_BACKOFF_MS),
            jitter_step: Duration::from_millis(retry_constants::JITTER_STEP_MS),
        }
    }
}

impl BackoffPolicy {
    pub fn new(base: Duration, jitter_step: Duration) -> Self {
        Self { base, jitter_step }
    }

    /// Wait before the retry that follows failed attempt `attempt` (1-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let exponent = (attempt - 1).min(retry_constants::MAX_BACKOFF_EXPONENT);
        let exponential = self.base.saturating_mul(1u32 << exponent);
        exponential.saturating_add(self.jitter_step.saturating_mul(attempt))
    }
}

/// Attempt budget plus backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: BackoffPolicy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry_constants::DEFAULT_MAX_ATTEMPTS,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl RetryPolicy {
    /// At least one attempt is always made
    pub fn new(max_attempts: u32, backoff: BackoffPolicy) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            BackoffPolicy::new(
                Duration::from_millis(config.base_backoff_ms),
                Duration::from_millis(config.jitter_step_ms),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay(1), Duration::from_millis(1200));
        assert_eq!(policy.delay(2), Duration::from_millis(2400));
        assert_eq!(policy.delay(3), Duration::from_millis(4600));
    }

    #[test]
    fn test_delays_strictly_increase() {
        let policy = BackoffPolicy::new(Duration::from_millis(5), Duration::from_millis(1));
        let delays: Vec<_> = (1..=8).map(|a| policy.delay(a)).collect();
        assert!(delays.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_jitter_is_pure_exponential() {
        let policy = BackoffPolicy::new(Duration::from_secs(1), Duration::ZERO);
        assert_eq!(policy.delay(4), Duration::from_secs(8));
    }

    #[test]
    fn test_large_attempt_does_not_overflow() {
        let policy = BackoffPolicy::default();
        assert!(policy.delay(u32::MAX) >= policy.delay(17));
    }

    #[test]
    fn test_retry_policy_minimum_one_attempt() {
        let policy = RetryPolicy::new(0, BackoffPolicy::default());
        assert_eq!(policy.max_attempts, 1);
    }
}
