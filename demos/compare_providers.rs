//! Cross-provider comparison demo.
//!
//! Synthesizes the same sentence with every configured provider, picking a
//! random voice per provider, and writes each result next to the binary.
//!
//! Usage:
//!   cargo run --example compare_providers

use anyhow::Context;
use rand::SeedableRng;
use utts::{SpeechTask, UttsClient};

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = UttsClient::from_env().context("failed to build client")?;
    let configured = client.configured();
    if configured.is_empty() {
        eprintln!("No providers configured. Set at least one API key (e.g. OPENAI_API_KEY).");
        return Ok(());
    }
    println!("Comparing {} providers\n", configured.len());

    // Seeded so repeated runs compare the same voices.
    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    let mut tasks = Vec::new();
    for id in &configured {
        let voice = id.voices().choose(&mut rng)?;
        println!("  {:<12} voice={}", id.to_string(), voice);
        tasks.push(SpeechTask::new(*id, SAMPLE_TEXT)?.with_voice(voice));
    }
    println!();

    for (id, outcome) in configured.iter().zip(client.generate_batch(tasks).await) {
        match outcome {
            Ok(audio) => {
                let path = format!("{}.{}", id, audio.format.extension());
                std::fs::write(&path, &audio.data)
                    .with_context(|| format!("failed to write {}", path))?;
                println!("  {:<12} ok    {} bytes -> {}", id.to_string(), audio.data.len(), path);
            }
            Err(err) => {
                println!("  {:<12} error {}", id.to_string(), err.message);
            }
        }
    }
    Ok(())
}
