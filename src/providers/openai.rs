//! OpenAI text-to-speech adapter (`POST /v1/audio/speech`).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{http_client, normalize_base_url, read_audio_body, TtsProvider};
use crate::config;
use crate::domain::ParamDomain;
use crate::types::{AudioFormat, AudioOutput, SynthesisOptions};
use crate::{Error, Result};

pub(crate) static VOICES: ParamDomain = ParamDomain::new(
    "openai voice",
    &["alloy", "echo", "fable", "onyx", "nova", "shimmer"],
);
pub(crate) static MODELS: ParamDomain = ParamDomain::new("openai model", &["tts-1", "tts-1-hd"]);

const DEFAULT_VOICE: &str = "alloy";
const DEFAULT_MODEL: &str = "tts-1";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for the OpenAI speech endpoint.
pub struct OpenAiTts {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    organization_id: Option<String>,
}

impl OpenAiTts {
    pub fn builder() -> OpenAiTtsBuilder {
        OpenAiTtsBuilder::new()
    }
}

#[async_trait]
impl TtsProvider for OpenAiTts {
    fn id(&self) -> &'static str {
        "openai"
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> Result<AudioOutput> {
        let voice = match options.voice.as_deref() {
            Some(v) => {
                VOICES.require(v)?;
                v
            }
            None => DEFAULT_VOICE,
        };
        let model = match options.model.as_deref() {
            Some(m) => {
                MODELS.require(m)?;
                m
            }
            None => DEFAULT_MODEL,
        };

        let endpoint = format!("{}/v1/audio/speech", self.base_url);
        let mut body = serde_json::json!({
            "model": model,
            "input": text,
            "voice": voice,
        });
        if let Some(speed) = options.speed {
            body["speed"] = serde_json::json!(speed);
        }
        if let Some(format) = options.output_format {
            body["response_format"] = serde_json::Value::String(format.as_str().to_string());
        }

        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let mut request = self
            .http_client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(org) = &self.organization_id {
            request = request.header("OpenAI-Organization", org);
        }
        let response = request.send().await.map_err(|e| {
            Error::network_with_context(
                format!("OpenAI TTS request failed: {}", e),
                crate::ErrorContext::new().with_source("openai"),
            )
        })?;
        let bytes = read_audio_body(response, "openai").await?;

        debug!(
            provider = "openai",
            voice,
            model,
            request_id = request_id.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            bytes = bytes.len(),
            "synthesis complete"
        );
        Ok(AudioOutput {
            data: bytes.to_vec(),
            format: options.output_format.unwrap_or(AudioFormat::Mp3),
        })
    }

    fn voices(&self) -> &ParamDomain {
        &VOICES
    }

    fn models(&self) -> &ParamDomain {
        &MODELS
    }
}

pub struct OpenAiTtsBuilder {
    api_key: Option<String>,
    organization_id: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
}

impl OpenAiTtsBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            organization_id: None,
            base_url: None,
            timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
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

    pub fn build(self) -> Result<OpenAiTts> {
        let api_key = self
            .api_key
            .or_else(|| config::resolve_api_key("openai", "OPENAI_API_KEY"))
            .ok_or_else(|| Error::configuration("OpenAI API key required"))?;
        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(OpenAiTts {
            http_client: http_client(self.timeout)?,
            base_url,
            api_key,
            organization_id: self.organization_id,
        })
    }
}

impl Default for OpenAiTtsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
