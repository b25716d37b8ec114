//! # utts
//!
//! Unified client for text-to-speech provider web APIs — OpenAI, ElevenLabs,
//! Cartesia, Hume, Zyphra (Zonos) and Replicate-hosted models (Kokoro,
//! Orpheus) — behind one calling convention, plus a concurrent batch
//! generation helper for cross-provider comparison.
//!
//! ## Overview
//!
//! Each provider integration is a thin call-and-decode wrapper over the
//! vendor HTTP endpoint: text and optional voice/model overrides in, raw
//! audio bytes out. The batch engine dispatches any number of such calls
//! concurrently and returns one outcome per task, aligned with the input
//! order, capturing per-task failures inline so a single down provider never
//! blanks out a comparison.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use utts::{ProviderId, SpeechTask, SynthesisOptions, UttsClient};
//!
//! #[tokio::main]
//! async fn main() -> utts::Result<()> {
//!     let client = UttsClient::from_env()?;
//!
//!     // One provider, one call.
//!     let audio = client
//!         .synthesize(ProviderId::OpenAi, "Hello there!", &SynthesisOptions::default())
//!         .await?;
//!     std::fs::write("hello.mp3", &audio.data)?;
//!
//!     // Cross-provider comparison batch.
//!     let tasks = vec![
//!         SpeechTask::new(ProviderId::OpenAi, "Compare me.")?,
//!         SpeechTask::new(ProviderId::ElevenLabs, "Compare me.")?,
//!         SpeechTask::new(ProviderId::Kokoro, "Compare me.")?,
//!     ];
//!     for outcome in client.generate_batch(tasks).await {
//!         match outcome {
//!             Ok(audio) => println!("ok: {} bytes", audio.data.len()),
//!             Err(err) => eprintln!("{}", err),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Unified client and builder over all configured providers |
//! | [`providers`] | One call-and-decode adapter per vendor API |
//! | [`batch`] | Concurrent batch generation with per-task failure capture |
//! | [`domain`] | Parameter domains and uniform random selection |
//! | [`registry`] | Data-driven provider id / domain registry |
//! | [`config`] | Settings from `.env`, environment and keyring |
//! | [`types`] | Audio payloads and synthesis options |

pub mod batch;
pub mod client;
pub mod config;
pub mod domain;
pub mod providers;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use batch::{generate_batch, BatchExecutor, BatchStrategy, SpeechTask, TaskError, TaskOutcome};
pub use client::{UttsClient, UttsClientBuilder};
pub use config::Settings;
pub use domain::ParamDomain;
pub use providers::TtsProvider;
pub use registry::ProviderId;
pub use types::{AudioFormat, AudioOutput, SynthesisOptions};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
