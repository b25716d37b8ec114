//! Hume text-to-speech adapter (`POST /v0/tts`).
//!
//! Hume returns JSON with base64 audio rather than raw bytes, and supports
//! voice-by-description, saved voices, acting instructions and contextual
//! continuity across utterances. The extended surface lives on [`HumeTts`]
//! directly; the [`TtsProvider`] impl maps the common options onto it.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::{http_client, normalize_base_url, TtsProvider};
use crate::config;
use crate::domain::ParamDomain;
use crate::types::{AudioFormat, AudioOutput, SynthesisOptions};
use crate::{Error, ErrorContext, Result};

// Voice-library names; any user-saved voice name is also accepted.
pub(crate) static VOICES: ParamDomain = ParamDomain::new(
    "hume voice",
    &["Ito", "Kora", "Dacher", "Aura", "Finn", "Stella", "Whimsy", "Sunny"],
);
pub(crate) static MODELS: ParamDomain = ParamDomain::new("hume model", &["octave"]);

const DEFAULT_BASE_URL: &str = "https://api.hume.ai";

/// Hume-specific synthesis parameters.
#[derive(Debug, Clone, Default)]
pub struct HumeOptions {
    /// Name of a saved or library voice.
    pub voice_name: Option<String>,
    /// How the voice should sound; used when no voice name is given.
    pub description: Option<String>,
    /// Voice modulation instructions; only applied alongside a voice name.
    pub acting_instructions: Option<String>,
    /// Generation id of a previous utterance, for contextual continuity.
    pub context_generation_id: Option<String>,
    /// Number of variations to request (1-5); the first is returned.
    pub num_generations: Option<u8>,
    pub format: Option<AudioFormat>,
}

/// One decoded generation plus the id needed to continue from it.
#[derive(Debug, Clone)]
pub struct HumeGeneration {
    pub audio: AudioOutput,
    pub generation_id: String,
}

#[derive(Deserialize)]
struct SynthesizeResponse {
    generations: Vec<GenerationPayload>,
}

#[derive(Deserialize)]
struct GenerationPayload {
    audio: String,
    generation_id: String,
}

#[derive(Deserialize)]
struct VoicePayload {
    id: String,
}

/// Client for the Hume TTS endpoint.
pub struct HumeTts {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HumeTts {
    pub fn builder() -> HumeTtsBuilder {
        HumeTtsBuilder::new()
    }

    /// Generate one utterance with the full Hume parameter surface.
    pub async fn synthesize_utterance(
        &self,
        text: &str,
        options: &HumeOptions,
    ) -> Result<HumeGeneration> {
        let mut utterance = serde_json::json!({ "text": text });
        if let Some(name) = &options.voice_name {
            utterance["voice"] = serde_json::json!({ "name": name });
            if let Some(instructions) = &options.acting_instructions {
                utterance["description"] = serde_json::Value::String(instructions.clone());
            }
        } else if let Some(description) = &options.description {
            utterance["description"] = serde_json::Value::String(description.clone());
        }

        let mut body = serde_json::json!({
            "utterances": [utterance],
            "num_generations": options.num_generations.unwrap_or(1),
        });
        if let Some(id) = &options.context_generation_id {
            body["context"] = serde_json::json!({ "generation_id": id });
        }
        // Only PCM needs an explicit format field; wav is the default.
        if options.format == Some(AudioFormat::Pcm) {
            body["format"] = serde_json::json!({ "type": "pcm" });
        }

        let endpoint = format!("{}/v0/tts", self.base_url);
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let response = self
            .http_client
            .post(&endpoint)
            .header("X-Hume-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("Hume TTS request failed: {}", e),
                    ErrorContext::new().with_source("hume"),
                )
            })?;
        let status = response.status();
        let text_body = response.text().await.map_err(|e| {
            Error::network_with_context(
                format!("failed to read Hume TTS response: {}", e),
                ErrorContext::new().with_source("hume"),
            )
        })?;
        if !status.is_success() {
            return Err(Error::api(
                status.as_u16(),
                text_body,
                ErrorContext::new().with_source("hume"),
            ));
        }

        let parsed: SynthesizeResponse = serde_json::from_str(&text_body)?;
        let generation = parsed.generations.into_iter().next().ok_or_else(|| {
            Error::api(
                status.as_u16(),
                "Hume response contained no generations",
                ErrorContext::new().with_source("hume"),
            )
        })?;
        let data = BASE64.decode(generation.audio.as_bytes()).map_err(|e| {
            Error::api(
                status.as_u16(),
                format!("invalid base64 audio in Hume response: {}", e),
                ErrorContext::new().with_source("hume"),
            )
        })?;

        debug!(
            provider = "hume",
            voice = options.voice_name.as_deref().unwrap_or(""),
            generation_id = generation.generation_id.as_str(),
            request_id = request_id.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            bytes = data.len(),
            "synthesis complete"
        );
        Ok(HumeGeneration {
            audio: AudioOutput {
                data,
                format: options.format.unwrap_or(AudioFormat::Wav),
            },
            generation_id: generation.generation_id,
        })
    }

    /// Generate audio for several texts, threading each utterance's
    /// generation id into the next request so delivery stays coherent.
    pub async fn synthesize_with_continuity(
        &self,
        texts: &[&str],
        options: &HumeOptions,
    ) -> Result<Vec<AudioOutput>> {
        let mut results = Vec::with_capacity(texts.len());
        let mut context_generation_id = options.context_generation_id.clone();
        for text in texts {
            let mut step = options.clone();
            step.context_generation_id = context_generation_id;
            let generation = self.synthesize_utterance(text, &step).await?;
            context_generation_id = Some(generation.generation_id);
            results.push(generation.audio);
        }
        Ok(results)
    }

    /// Save a generated voice to the voice library for reuse.
    pub async fn save_voice(&self, generation_id: &str, name: &str) -> Result<String> {
        let endpoint = format!("{}/v0/tts/voices", self.base_url);
        let body = serde_json::json!({ "generation_id": generation_id, "name": name });
        let response = self
            .http_client
            .post(&endpoint)
            .header("X-Hume-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("Hume save-voice request failed: {}", e),
                    ErrorContext::new().with_source("hume"),
                )
            })?;
        let status = response.status();
        let text_body = response.text().await.map_err(|e| {
            Error::network_with_context(
                format!("failed to read Hume save-voice response: {}", e),
                ErrorContext::new().with_source("hume"),
            )
        })?;
        if !status.is_success() {
            return Err(Error::api(
                status.as_u16(),
                text_body,
                ErrorContext::new().with_source("hume"),
            ));
        }
        let voice: VoicePayload = serde_json::from_str(&text_body)?;
        Ok(voice.id)
    }
}

#[async_trait]
impl TtsProvider for HumeTts {
    fn id(&self) -> &'static str {
        "hume"
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> Result<AudioOutput> {
        let hume_options = HumeOptions {
            voice_name: options.voice.clone(),
            format: options.output_format,
            ..HumeOptions::default()
        };
        let generation = self.synthesize_utterance(text, &hume_options).await?;
        Ok(generation.audio)
    }

    fn voices(&self) -> &ParamDomain {
        &VOICES
    }

    fn models(&self) -> &ParamDomain {
        &MODELS
    }
}

pub struct HumeTtsBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
}

impl HumeTtsBuilder {
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

    pub fn build(self) -> Result<HumeTts> {
        let api_key = self
            .api_key
            .or_else(|| config::resolve_api_key("hume", "HUME_API_KEY"))
            .ok_or_else(|| Error::configuration("Hume API key required"))?;
        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(HumeTts {
            http_client: http_client(self.timeout)?,
            base_url,
            api_key,
        })
    }
}

impl Default for HumeTtsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
