//! Concurrent execution of independent generation calls.

use futures::future;
use futures::stream::{self, StreamExt};
use std::future::Future;

/// Captured failure for one task in a batch.
///
/// Stored inline at the failing task's slot so callers can tell exactly which
/// comparison slot failed and why; never propagated out of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskError {
    /// Position of the originating task in the input sequence.
    pub index: usize,
    /// Provider the task targeted.
    pub provider: String,
    /// Rendered underlying failure.
    pub message: String,
}

impl TaskError {
    pub fn new(index: usize, provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index,
            provider: provider.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task {} ({}) failed: {}", self.index, self.provider, self.message)
    }
}

impl std::error::Error for TaskError {}

/// How dispatched tasks are scheduled.
///
/// Both strategies keep the result order fixed to the input order; they only
/// differ in how many calls are in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStrategy {
    /// Every task in flight at once.
    Parallel,
    /// At most `max_concurrency` tasks in flight.
    Concurrent { max_concurrency: usize },
}

impl Default for BatchStrategy {
    fn default() -> Self {
        BatchStrategy::Parallel
    }
}

/// Order-preserving concurrent executor.
///
/// `execute` is a pure function of its input sequence: no state survives a
/// call, no result is cached, and each item is invoked exactly once. A failing
/// item resolves to its own `Err` slot and never aborts or cancels siblings.
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    strategy: BatchStrategy,
}

impl BatchExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: BatchStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> BatchStrategy {
        self.strategy
    }

    /// Run every item through `f` concurrently and collect the outcomes.
    ///
    /// The returned sequence has the same length as `items` and the i-th
    /// outcome always corresponds to the i-th item, regardless of completion
    /// order. An empty input returns immediately with no scheduling overhead.
    pub async fn execute<T, R, E, F, Fut>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        if items.is_empty() {
            return Vec::new();
        }
        match self.strategy {
            BatchStrategy::Parallel => future::join_all(items.into_iter().map(f)).await,
            BatchStrategy::Concurrent { max_concurrency } => {
                stream::iter(items.into_iter().map(f))
                    .buffered(max_concurrency.max(1))
                    .collect()
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn outcomes_align_with_input_positions() {
        let executor = BatchExecutor::new();
        let outcomes = executor
            .execute(vec![1u64, 2, 3, 4], |n| async move {
                // Later items finish first; order must still hold.
                tokio::time::sleep(Duration::from_millis(50 / n)).await;
                Ok::<u64, String>(n * 10)
            })
            .await;
        assert_eq!(outcomes, vec![Ok(10), Ok(20), Ok(30), Ok(40)]);
    }

    #[tokio::test]
    async fn failures_are_captured_in_place() {
        let executor = BatchExecutor::new();
        let outcomes = executor
            .execute(vec![0u32, 1, 2, 3], |n| async move {
                if n % 2 == 0 {
                    Ok(n)
                } else {
                    Err(format!("boom {}", n))
                }
            })
            .await;
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0], Ok(0));
        assert_eq!(outcomes[1], Err("boom 1".to_string()));
        assert_eq!(outcomes[2], Ok(2));
        assert_eq!(outcomes[3], Err("boom 3".to_string()));
    }

    #[tokio::test]
    async fn empty_input_returns_empty_output() {
        let executor = BatchExecutor::new();
        let outcomes: Vec<Result<u8, String>> =
            executor.execute(Vec::new(), |n| async move { Ok(n) }).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn bounded_concurrency_preserves_order() {
        let executor = BatchExecutor::with_strategy(BatchStrategy::Concurrent { max_concurrency: 2 });
        let outcomes = executor
            .execute((0u64..6).collect(), |n| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok::<u64, String>(n)
            })
            .await;
        assert_eq!(outcomes, (0u64..6).map(Ok).collect::<Vec<_>>());
    }

    #[test]
    fn task_error_display_names_index_and_provider() {
        let err = TaskError::new(3, "zyphra", "HTTP 401");
        assert_eq!(err.to_string(), "task 3 (zyphra) failed: HTTP 401");
    }
}
