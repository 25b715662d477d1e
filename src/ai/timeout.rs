//! Timeout Helpers
//!
//! Wraps async operations with a deadline and converts expiry into
//! `MunError::Timeout`.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::ai::timeout::with_timeout;
//!
//! let response = with_timeout(
//!     Duration::from_secs(30),
//!     transport.send(&credential, &request),
//!     "inference request",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::{MunError, Result};

/// Execute an async operation with a timeout
///
/// Returns a timeout error if the operation doesn't complete within `timeout`.
/// The inner future is dropped on expiry.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(MunError::timeout(operation_name, timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, MunError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_passes_inner_error() {
        let result: Result<()> = with_timeout(
            Duration::from_secs(1),
            async { Err(MunError::InvalidInput("bad".to_string())) },
            "test operation",
        )
        .await;
        assert!(matches!(result, Err(MunError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, MunError>(42)
            },
            "slow operation",
        )
        .await;
        match result {
            Err(MunError::Timeout { operation, .. }) => assert_eq!(operation, "slow operation"),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
