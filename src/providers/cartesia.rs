//! Cartesia text-to-speech adapter (`POST /tts/bytes`).
//!
//! Requests always ask for 44.1 kHz pcm_f32le in a wav container, matching
//! what the comparison tooling expects. Voice ids are free-form (saved or
//! cloned voices), so the voice override is passed through unchecked.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{http_client, normalize_base_url, read_audio_body, TtsProvider};
use crate::config;
use crate::domain::ParamDomain;
use crate::types::{AudioFormat, AudioOutput, SynthesisOptions};
use crate::{Error, ErrorContext, Result};

pub(crate) static MODELS: ParamDomain = ParamDomain::new(
    "cartesia model",
    &[
        "sonic-2",
        "sonic-turbo",
        "sonic",
        "sonic-2-2025-04-16",
        "sonic-2-2025-03-07",
        "sonic-turbo-2025-03-07",
        "sonic-2024-12-12",
        "sonic-2024-10-19",
    ],
);
pub(crate) static LANGUAGES: ParamDomain = ParamDomain::new(
    "cartesia language",
    &[
        "en", "fr", "de", "es", "pt", "zh", "ja", "hi", "it", "ko", "nl", "pl", "ru", "sv", "tr",
    ],
);
// The documented default voice; any saved voice id is accepted at request time.
pub(crate) static VOICES: ParamDomain =
    ParamDomain::new("cartesia voice", &["694f9389-aac1-45b6-b726-9d9369183238"]);

const DEFAULT_VOICE_ID: &str = "694f9389-aac1-45b6-b726-9d9369183238";
const DEFAULT_MODEL: &str = "sonic-2";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_BASE_URL: &str = "https://api.cartesia.ai";
const API_VERSION: &str = "2024-06-10";

/// Client for the Cartesia bytes endpoint.
pub struct CartesiaTts {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CartesiaTts {
    pub fn builder() -> CartesiaTtsBuilder {
        CartesiaTtsBuilder::new()
    }
}

#[async_trait]
impl TtsProvider for CartesiaTts {
    fn id(&self) -> &'static str {
        "cartesia"
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> Result<AudioOutput> {
        let model = match options.model.as_deref() {
            Some(m) => {
                MODELS.require(m)?;
                m
            }
            None => DEFAULT_MODEL,
        };
        let language = match options.language.as_deref() {
            Some(l) => {
                LANGUAGES.require(l)?;
                l
            }
            None => DEFAULT_LANGUAGE,
        };
        let voice_id = options.voice.as_deref().unwrap_or(DEFAULT_VOICE_ID);

        let endpoint = format!("{}/tts/bytes", self.base_url);
        let body = serde_json::json!({
            "model_id": model,
            "transcript": text,
            "language": language,
            "voice": { "mode": "id", "id": voice_id },
            "output_format": {
                "container": "wav",
                "encoding": "pcm_f32le",
                "sample_rate": 44100,
            },
        });

        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let response = self
            .http_client
            .post(&endpoint)
            .header("X-API-Key", &self.api_key)
            .header("Cartesia-Version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("Cartesia TTS request failed: {}", e),
                    ErrorContext::new().with_source("cartesia"),
                )
            })?;
        let bytes = read_audio_body(response, "cartesia").await?;

        debug!(
            provider = "cartesia",
            voice_id,
            model,
            language,
            request_id = request_id.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            bytes = bytes.len(),
            "synthesis complete"
        );
        Ok(AudioOutput {
            data: bytes.to_vec(),
            format: AudioFormat::Wav,
        })
    }

    fn voices(&self) -> &ParamDomain {
        &VOICES
    }

    fn models(&self) -> &ParamDomain {
        &MODELS
    }
}

pub struct CartesiaTtsBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
}

impl CartesiaTtsBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<CartesiaTts> {
        let api_key = self
            .api_key
            .or_else(|| config::resolve_api_key("cartesia", "CARTESIA_API_KEY"))
            .ok_or_else(|| Error::configuration("Cartesia API key required"))?;
        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(CartesiaTts {
            http_client: http_client(self.timeout)?,
            base_url,
            api_key,
        })
    }
}

impl Default for CartesiaTtsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
