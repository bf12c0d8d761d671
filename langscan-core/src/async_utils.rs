//! Async utilities
//!
//! Timeout wrapping and bounded-concurrency fan-out for batch operations

use crate::error::{ErrorContext, LangscanError, LangscanResult};
use tokio::time::{timeout, Duration};

/// Timeout wrapper for async operations
pub async fn with_timeout<F, T>(
    future: F,
    timeout_ms: u64,
    operation_name: &str,
) -> LangscanResult<T>
where
    F: std::future::Future<Output = T>,
{
    match timeout(Duration::from_millis(timeout_ms), future).await {
        Ok(result) => Ok(result),
        Err(_) => Err(LangscanError::Timeout {
            operation: operation_name.to_string(),
            duration_ms: timeout_ms,
            context: ErrorContext::new("async_utils")
                .with_operation("timeout")
                .with_metadata("timeout_ms", &timeout_ms.to_string())
                .with_suggestion("Increase timeout duration")
                .with_suggestion("Check network connectivity"),
        }),
    }
}

/// Concurrent processing with controlled parallelism.
///
/// Results are returned in completion order; a panicking task surfaces as an
/// `Internal` error rather than aborting the batch.
pub async fn process_concurrently<T, R, F, Fut>(
    items: Vec<T>,
    max_concurrent: usize,
    processor: F,
) -> Vec<LangscanResult<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + Clone + 'static,
    Fut: std::future::Future<Output = LangscanResult<R>> + Send + 'static,
{
    use futures::stream::{self, StreamExt};

    stream::iter(items)
        .map(|item| {
            let processor = processor.clone();
            tokio::spawn(async move { processor(item).await })
        })
        .buffer_unordered(max_concurrent)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .map(|join_result| match join_result {
            Ok(result) => result,
            Err(join_error) => Err(LangscanError::Internal {
                message: format!("Task join error: {}", join_error),
                source: Some(Box::new(join_error)),
                context: ErrorContext::new("async_utils")
                    .with_operation("process_concurrently")
                    .with_suggestion("Check for panics in concurrent tasks"),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    #[tokio::test]
    async fn timeout_passes_through_fast_operations() {
        let result = with_timeout(async { 42 }, 1_000, "fast_op").await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn timeout_fires_on_slow_operations() {
        let result = with_timeout(
            async {
                sleep(Duration::from_millis(200)).await;
                42
            },
            10,
            "slow_op",
        )
        .await;

        match result {
            Err(LangscanError::Timeout {
                operation,
                duration_ms,
                ..
            }) => {
                assert_eq!(operation, "slow_op");
                assert_eq!(duration_ms, 10);
            }
            other => panic!("expected timeout, got {:?}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn bounded_fan_out_processes_all_items() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let in_flight_ref = Arc::clone(&in_flight);
        let peak_ref = Arc::clone(&peak);

        let results = process_concurrently(
            (0..20u32).collect::<Vec<_>>(),
            4,
            move |n| {
                let in_flight = Arc::clone(&in_flight_ref);
                let peak = Arc::clone(&peak_ref);
                async move {
                    let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(current, Ordering::SeqCst);
                    sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok(n * 2)
                }
            },
        )
        .await;

        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|r| r.is_ok()));
        assert!(peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn per_item_failures_do_not_abort_the_batch() {
        let results = process_concurrently((0..6u32).collect::<Vec<_>>(), 2, |n| async move {
            if n % 2 == 0 {
                Ok(n)
            } else {
                Err(LangscanError::Api {
                    status: 403,
                    message: "rate limited".to_string(),
                    context: ErrorContext::new("test"),
                })
            }
        })
        .await;

        assert_eq!(results.len(), 6);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 3);
    }
}
