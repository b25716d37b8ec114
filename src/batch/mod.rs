//! Batch generation: run many independent synthesis calls concurrently and
//! collect every outcome, success or failure, in input order.
//!
//! ## Overview
//!
//! Provider latency varies from hundreds of milliseconds to several seconds
//! and the calls are pure I/O wait, so a comparison batch is dispatched with
//! every call in flight at once. One down or misconfigured provider must not
//! blank out the comparison: a failing task resolves to a captured
//! [`TaskError`] at its own slot while its siblings complete normally.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`SpeechTask`] | One generation call: provider, text, optional overrides |
//! | [`TaskError`] | Captured failure: task index, provider, message |
//! | [`TaskOutcome`] | Per-slot result, `Ok(AudioOutput)` or `Err(TaskError)` |
//! | [`BatchExecutor`] | Generic order-preserving concurrent engine |
//! | [`BatchStrategy`] | All-at-once (default) or bounded concurrency |
//!
//! The engine guarantees `outcomes[i]` corresponds to `tasks[i]` for every i,
//! regardless of completion order. It imposes no timeout (that belongs to the
//! provider adapters), no retries, and no caching across calls.

mod executor;
mod task;

pub use executor::{BatchExecutor, BatchStrategy, TaskError};
pub use task::SpeechTask;

use std::time::Instant;

use tracing::info;

use crate::client::UttsClient;
use crate::types::AudioOutput;

/// Success payload or captured failure for one task.
pub type TaskOutcome = Result<AudioOutput, TaskError>;

/// Run every task concurrently through `client` and return one outcome per
/// task, aligned with the input order.
pub async fn generate_batch(client: &UttsClient, tasks: Vec<SpeechTask>) -> Vec<TaskOutcome> {
    if tasks.is_empty() {
        return Vec::new();
    }

    let start = Instant::now();
    let providers: Vec<&'static str> = tasks.iter().map(|t| t.provider().as_str()).collect();
    let executor = BatchExecutor::new();
    let raw = executor
        .execute(tasks, |task| async move {
            client
                .synthesize(task.provider(), task.text(), task.options())
                .await
        })
        .await;

    let outcomes: Vec<TaskOutcome> = raw
        .into_iter()
        .zip(providers)
        .enumerate()
        .map(|(index, (result, provider))| {
            result.map_err(|e| TaskError::new(index, provider, e.to_string()))
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    info!(
        total = outcomes.len(),
        succeeded = outcomes.len() - failed,
        failed,
        duration_ms = start.elapsed().as_millis() as u64,
        "generation batch complete"
    );
    outcomes
}
