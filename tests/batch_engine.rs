//! Batch engine properties: length/order isomorphism, partial failure,
//! concurrent dispatch, empty input.

use std::time::{Duration, Instant};

use tokio_test::assert_ok;
use utts::{BatchExecutor, BatchStrategy, ProviderId, SpeechTask, UttsClient};

#[tokio::test]
async fn outcome_order_matches_input_order_under_reversed_latencies() {
    let executor = BatchExecutor::new();
    // Earlier items sleep longer, so completion order is the reverse of
    // input order; result positions must not move.
    let outcomes = executor
        .execute(vec![80u64, 40, 10], |delay| async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok::<u64, String>(delay)
        })
        .await;
    assert_eq!(outcomes, vec![Ok(80), Ok(40), Ok(10)]);
}

#[tokio::test]
async fn one_failure_does_not_disturb_sibling_outcomes() {
    let executor = BatchExecutor::new();
    let outcomes = executor
        .execute(vec!["a", "broken", "c"], |name| async move {
            if name == "broken" {
                Err(format!("{} provider is down", name))
            } else {
                Ok(name.to_uppercase())
            }
        })
        .await;
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], Ok("A".to_string()));
    assert_eq!(outcomes[1], Err("broken provider is down".to_string()));
    assert_eq!(outcomes[2], Ok("C".to_string()));
}

#[tokio::test]
async fn empty_batch_returns_immediately() {
    let executor = BatchExecutor::new();
    let start = Instant::now();
    let outcomes: Vec<Result<(), String>> = executor
        .execute(Vec::new(), |_: u8| async move { Ok(()) })
        .await;
    assert!(outcomes.is_empty());
    assert!(start.elapsed() < Duration::from_millis(10));
}

#[tokio::test]
async fn wall_clock_is_close_to_single_task_latency() {
    let executor = BatchExecutor::new();
    let latency = Duration::from_millis(100);
    let start = Instant::now();
    let outcomes = executor
        .execute((0u32..8).collect(), |n| async move {
            tokio::time::sleep(latency).await;
            Ok::<u32, String>(n)
        })
        .await;
    let elapsed = start.elapsed();
    assert_eq!(outcomes.len(), 8);
    // 8 sequential sleeps would take 800ms; concurrent dispatch should stay
    // well under half of that even on a loaded machine.
    assert!(
        elapsed < Duration::from_millis(400),
        "8 concurrent 100ms tasks took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn bounded_strategy_limits_in_flight_tasks() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let executor = BatchExecutor::with_strategy(BatchStrategy::Concurrent { max_concurrency: 2 });
    let outcomes = executor
        .execute((0u32..6).collect(), |n| {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<u32, String>(n)
            }
        })
        .await;
    assert_eq!(outcomes, (0u32..6).map(Ok).collect::<Vec<_>>());
    assert!(peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn generate_batch_captures_failures_per_slot() {
    let mut ok_server = mockito::Server::new_async().await;
    let mut err_server = mockito::Server::new_async().await;

    let ok_mock = ok_server
        .mock("POST", "/v1/audio/speech")
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(&b"fake-mp3-bytes"[..])
        .create_async()
        .await;
    let err_mock = err_server
        .mock("POST", mockito::Matcher::Any)
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = UttsClient::builder()
        .openai_api_key("sk-test")
        .elevenlabs_api_key("xi-test")
        .base_url_override(ProviderId::OpenAi, ok_server.url())
        .base_url_override(ProviderId::ElevenLabs, err_server.url())
        .build()
        .unwrap();

    let tasks = vec![
        SpeechTask::new(ProviderId::OpenAi, "hello").unwrap(),
        SpeechTask::new(ProviderId::ElevenLabs, "hello").unwrap(),
        // No Zyphra key configured: captured per slot, never a thrown error.
        SpeechTask::new(ProviderId::Zyphra, "hello").unwrap(),
    ];
    let outcomes = client.generate_batch(tasks).await;
    assert_eq!(outcomes.len(), 3);

    let audio = assert_ok!(outcomes[0].as_ref());
    assert_eq!(audio.data, b"fake-mp3-bytes");

    let failure = outcomes[1].as_ref().unwrap_err();
    assert_eq!(failure.index, 1);
    assert_eq!(failure.provider, "elevenlabs");
    assert!(failure.message.contains("500"));
    assert!(failure.message.contains("upstream exploded"));

    let missing = outcomes[2].as_ref().unwrap_err();
    assert_eq!(missing.index, 2);
    assert_eq!(missing.provider, "zyphra");
    assert!(missing.message.contains("not configured"));

    ok_mock.assert_async().await;
    err_mock.assert_async().await;
}

#[tokio::test]
async fn generate_batch_on_empty_input_returns_empty() {
    let client = UttsClient::builder().build().unwrap();
    let outcomes = client.generate_batch(Vec::new()).await;
    assert!(outcomes.is_empty());
}
