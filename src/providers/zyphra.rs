//! Zyphra (Zonos) text-to-speech adapter (`POST /v1/audio/text-to-speech`).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{http_client, normalize_base_url, read_audio_body, TtsProvider};
use crate::config;
use crate::domain::ParamDomain;
use crate::types::{AudioFormat, AudioOutput, SynthesisOptions};
use crate::{Error, ErrorContext, Result};

pub(crate) static VOICES: ParamDomain = ParamDomain::new(
    "zyphra voice",
    &[
        "american_female",
        "american_male",
        "anime_girl",
        "british_female",
        "british_male",
        "energetic_boy",
        "energetic_girl",
        "japanese_female",
        "japanese_male",
    ],
);
pub(crate) static MODELS: ParamDomain = ParamDomain::new(
    "zyphra model",
    &["zonos-v0.1-transformer", "zonos-v0.1-hybrid"],
);

const DEFAULT_MODEL: &str = "zonos-v0.1-transformer";
const DEFAULT_BASE_URL: &str = "https://api.zyphra.com";

/// Client for the Zyphra speech endpoint.
pub struct ZyphraTts {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ZyphraTts {
    pub fn builder() -> ZyphraTtsBuilder {
        ZyphraTtsBuilder::new()
    }
}

#[async_trait]
impl TtsProvider for ZyphraTts {
    fn id(&self) -> &'static str {
        "zyphra"
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> Result<AudioOutput> {
        let model = match options.model.as_deref() {
            Some(m) => {
                MODELS.require(m)?;
                m
            }
            None => DEFAULT_MODEL,
        };

        let endpoint = format!("{}/v1/audio/text-to-speech", self.base_url);
        let mut body = serde_json::json!({
            "text": text,
            "model": model,
        });
        if let Some(voice) = options.voice.as_deref() {
            VOICES.require(voice)?;
            body["default_voice_name"] = serde_json::Value::String(voice.to_string());
        }
        if let Some(speed) = options.speed {
            body["speaking_rate"] = serde_json::json!(speed);
        }
        if let Some(format) = options.output_format {
            body["mime_type"] = serde_json::Value::String(format.mime_type().to_string());
        }

        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let response = self
            .http_client
            .post(&endpoint)
            .header("X-API-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("Zyphra TTS request failed: {}", e),
                    ErrorContext::new().with_source("zyphra"),
                )
            })?;
        let bytes = read_audio_body(response, "zyphra").await?;

        debug!(
            provider = "zyphra",
            voice = options.voice.as_deref().unwrap_or(""),
            model,
            request_id = request_id.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            bytes = bytes.len(),
            "synthesis complete"
        );
        Ok(AudioOutput {
            data: bytes.to_vec(),
            format: options.output_format.unwrap_or(AudioFormat::Wav),
        })
    }

    fn voices(&self) -> &ParamDomain {
        &VOICES
    }

    fn models(&self) -> &ParamDomain {
        &MODELS
    }
}

pub struct ZyphraTtsBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
}

impl ZyphraTtsBuilder {
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

    pub fn build(self) -> Result<ZyphraTts> {
        let api_key = self
            .api_key
            .or_else(|| config::resolve_api_key("zyphra", "ZYPHRA_API_KEY"))
            .ok_or_else(|| Error::configuration("Zyphra API key required"))?;
        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(ZyphraTts {
            http_client: http_client(self.timeout)?,
            base_url,
            api_key,
        })
    }
}

impl Default for ZyphraTtsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
