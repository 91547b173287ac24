use std::future::Future;
use std::time::Duration;

use crate::errors::InternalError;

/// Run `op` up to `limit` times while it fails with a transient error
///
/// Backoff doubles after each failed attempt. Non-transient errors and the
/// last transient error are returned as-is. The core never calls this;
/// it is for callers that want bounded retries around one operation.
pub async fn with_transient_retry<T, F, Fut>(limit: u32, backoff: Duration, mut op: F) -> Result<T, InternalError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, InternalError>>,
{
    let attempts = limit.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Err(e) if e.is_transient() && attempt < attempts => {
                let delay = backoff.saturating_mul(1u32 << (attempt - 1).min(16));
                tracing::warn!(attempt, limit = attempts, ?delay, error = %e, "Transient failure, retrying");
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::errors::internal::{JobError, ValidationError};

    fn raced() -> InternalError {
        JobError::ConcurrentModification {
            job_id: "job-1".to_string(),
        }
        .into()
    }

    #[tokio::test]
    async fn test_retries_transient_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_transient_retry(3, Duration::ZERO, || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(raced())
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_limit() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_transient_retry(3, Duration::ZERO, || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(raced())
        })
        .await;

        assert!(result.unwrap_err().is_transient());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_permanent_errors() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_transient_retry(5, Duration::ZERO, || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ValidationError::EmptyUpdate.into())
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
