//! ElevenLabs text-to-speech adapter (`POST /v1/text-to-speech/{voice_id}`).
//!
//! Voices are free-form ids (any saved or cloned voice is legal), so the
//! voice override is passed through unchecked; the domain lists the premade
//! voices for random selection.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::{http_client, normalize_base_url, read_audio_body, TtsProvider};
use crate::config;
use crate::domain::ParamDomain;
use crate::types::{AudioFormat, AudioOutput, SynthesisOptions};
use crate::{Error, ErrorContext, Result};

// Premade voice ids from the ElevenLabs voice library.
pub(crate) static VOICES: ParamDomain = ParamDomain::new(
    "elevenlabs voice",
    &[
        "21m00Tcm4TlvDq8ikWAM", // Rachel
        "AZnzlk1XvdvUeBnXmlld", // Domi
        "EXAVITQu4vr4xnSDxMaL", // Bella
        "ErXwobaYiN019PkySvjV", // Antoni
        "MF3mGyEYCl7XYWbV9V6O", // Elli
        "TxGEqnHWrfWFTfGW9XjX", // Josh
        "VR6AewLTigWG4xSOukaG", // Arnold
        "pNInz6obpgDQGcFmaJgB", // Adam
        "yoZ06aMxZJJ28mfd3POQ", // Sam
    ],
);
pub(crate) static MODELS: ParamDomain = ParamDomain::new(
    "elevenlabs model",
    &[
        "eleven_multilingual_v2",
        "eleven_turbo_v2_5",
        "eleven_flash_v2_5",
        "eleven_monolingual_v1",
    ],
);

const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
const DEFAULT_MODEL: &str = "eleven_multilingual_v2";
const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

/// Client for the ElevenLabs speech endpoint.
pub struct ElevenLabsTts {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ElevenLabsTts {
    pub fn builder() -> ElevenLabsTtsBuilder {
        ElevenLabsTtsBuilder::new()
    }
}

#[async_trait]
impl TtsProvider for ElevenLabsTts {
    fn id(&self) -> &'static str {
        "elevenlabs"
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> Result<AudioOutput> {
        let voice_id = options.voice.as_deref().unwrap_or(DEFAULT_VOICE_ID);
        let model = match options.model.as_deref() {
            Some(m) => {
                MODELS.require(m)?;
                m
            }
            None => DEFAULT_MODEL,
        };

        let endpoint = format!("{}/v1/text-to-speech/{}", self.base_url, voice_id);
        let body = SpeechRequest {
            text,
            model_id: model,
            voice_settings: VoiceSettings::default(),
        };

        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let response = self
            .http_client
            .post(&endpoint)
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("ElevenLabs TTS request failed: {}", e),
                    ErrorContext::new().with_source("elevenlabs"),
                )
            })?;
        let bytes = read_audio_body(response, "elevenlabs").await?;

        debug!(
            provider = "elevenlabs",
            voice_id,
            model,
            request_id = request_id.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            bytes = bytes.len(),
            "synthesis complete"
        );
        Ok(AudioOutput {
            data: bytes.to_vec(),
            format: AudioFormat::Mp3,
        })
    }

    fn voices(&self) -> &ParamDomain {
        &VOICES
    }

    fn models(&self) -> &ParamDomain {
        &MODELS
    }
}

pub struct ElevenLabsTtsBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
}

impl ElevenLabsTtsBuilder {
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

    pub fn build(self) -> Result<ElevenLabsTts> {
        let api_key = self
            .api_key
            .or_else(|| config::resolve_api_key("elevenlabs", "ELEVENLABS_API_KEY"))
            .ok_or_else(|| Error::configuration("ElevenLabs API key required"))?;
        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(ElevenLabsTts {
            http_client: http_client(self.timeout)?,
            base_url,
            api_key,
        })
    }
}

impl Default for ElevenLabsTtsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
