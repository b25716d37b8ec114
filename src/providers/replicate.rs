//! Replicate-hosted model adapters (Kokoro, Orpheus).
//!
//! Predictions are created against the blocking endpoint (`Prefer: wait`), so
//! one request returns the finished prediction; the audio itself is then
//! fetched from the delivery URL in the prediction output. A hung prediction
//! is bounded by this adapter's HTTP timeout.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::{http_client, normalize_base_url, read_audio_body, TtsProvider};
use crate::config;
use crate::domain::ParamDomain;
use crate::types::{AudioFormat, AudioOutput, SynthesisOptions};
use crate::{Error, ErrorContext, Result};

pub(crate) static KOKORO_VOICES: ParamDomain = ParamDomain::new(
    "kokoro voice",
    &[
        "af_bella",
        "af_nicole",
        "af_sarah",
        "af_sky",
        "am_adam",
        "am_michael",
        "bf_emma",
        "bf_isabella",
        "bm_george",
        "bm_lewis",
    ],
);
pub(crate) static KOKORO_MODELS: ParamDomain = ParamDomain::new("kokoro model", &["kokoro-82m"]);

pub(crate) static ORPHEUS_VOICES: ParamDomain = ParamDomain::new(
    "orpheus voice",
    &["tara", "leah", "jess", "leo", "dan", "mia", "zac", "zoe"],
);
pub(crate) static ORPHEUS_MODELS: ParamDomain =
    ParamDomain::new("orpheus model", &["orpheus-3b-0.1-ft"]);

const DEFAULT_BASE_URL: &str = "https://api.replicate.com";

/// Which Replicate-hosted model an adapter instance targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicateModel {
    Kokoro,
    Orpheus,
}

impl ReplicateModel {
    fn provider_id(&self) -> &'static str {
        match self {
            Self::Kokoro => "kokoro",
            Self::Orpheus => "orpheus",
        }
    }

    /// `owner/name` path segment on Replicate.
    fn model_path(&self) -> &'static str {
        match self {
            Self::Kokoro => "jaaari/kokoro-82m",
            Self::Orpheus => "lucataco/orpheus-3b-0.1-ft",
        }
    }

    fn default_voice(&self) -> &'static str {
        match self {
            Self::Kokoro => "af_bella",
            Self::Orpheus => "tara",
        }
    }

    fn voice_domain(&self) -> &'static ParamDomain {
        match self {
            Self::Kokoro => &KOKORO_VOICES,
            Self::Orpheus => &ORPHEUS_VOICES,
        }
    }

    fn model_domain(&self) -> &'static ParamDomain {
        match self {
            Self::Kokoro => &KOKORO_MODELS,
            Self::Orpheus => &ORPHEUS_MODELS,
        }
    }
}

#[derive(Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    output: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for one Replicate-hosted TTS model.
pub struct ReplicateTts {
    http_client: reqwest::Client,
    base_url: String,
    api_token: String,
    model: ReplicateModel,
}

impl ReplicateTts {
    pub fn builder(model: ReplicateModel) -> ReplicateTtsBuilder {
        ReplicateTtsBuilder::new(model)
    }

    fn output_url(output: &serde_json::Value) -> Option<&str> {
        match output {
            serde_json::Value::String(url) => Some(url.as_str()),
            serde_json::Value::Array(urls) => urls.first().and_then(|v| v.as_str()),
            _ => None,
        }
    }
}

#[async_trait]
impl TtsProvider for ReplicateTts {
    fn id(&self) -> &'static str {
        self.model.provider_id()
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> Result<AudioOutput> {
        let voice = match options.voice.as_deref() {
            Some(v) => {
                self.model.voice_domain().require(v)?;
                v
            }
            None => self.model.default_voice(),
        };
        if let Some(m) = options.model.as_deref() {
            self.model.model_domain().require(m)?;
        }

        let mut input = serde_json::json!({ "text": text, "voice": voice });
        if let Some(speed) = options.speed {
            input["speed"] = serde_json::json!(speed);
        }
        let body = serde_json::json!({ "input": input });
        let endpoint = format!("{}/v1/models/{}/predictions", self.base_url, self.model.model_path());

        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let response = self
            .http_client
            .post(&endpoint)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("Replicate prediction request failed: {}", e),
                    ErrorContext::new().with_source(self.model.provider_id()),
                )
            })?;
        let status = response.status();
        let text_body = response.text().await.map_err(|e| {
            Error::network_with_context(
                format!("failed to read Replicate response: {}", e),
                ErrorContext::new().with_source(self.model.provider_id()),
            )
        })?;
        if !status.is_success() {
            return Err(Error::api(
                status.as_u16(),
                text_body,
                ErrorContext::new().with_source(self.model.provider_id()),
            ));
        }

        let prediction: PredictionResponse = serde_json::from_str(&text_body)?;
        if let Some(error) = prediction.error {
            return Err(Error::api(
                status.as_u16(),
                format!("prediction failed: {}", error),
                ErrorContext::new().with_source(self.model.provider_id()),
            ));
        }
        let output_url = prediction
            .output
            .as_ref()
            .and_then(Self::output_url)
            .ok_or_else(|| {
                Error::api(
                    status.as_u16(),
                    format!(
                        "prediction finished with status '{}' but no output URL",
                        prediction.status
                    ),
                    ErrorContext::new().with_source(self.model.provider_id()),
                )
            })?;

        // Delivery URLs are unauthenticated; reuse the same client for the fetch.
        let audio_response = self.http_client.get(output_url).send().await.map_err(|e| {
            Error::network_with_context(
                format!("failed to fetch prediction output: {}", e),
                ErrorContext::new().with_source(self.model.provider_id()),
            )
        })?;
        let bytes = read_audio_body(audio_response, "replicate").await?;

        debug!(
            provider = self.model.provider_id(),
            voice,
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
        self.model.voice_domain()
    }

    fn models(&self) -> &ParamDomain {
        self.model.model_domain()
    }
}

pub struct ReplicateTtsBuilder {
    model: ReplicateModel,
    api_token: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
}

impl ReplicateTtsBuilder {
    pub fn new(model: ReplicateModel) -> Self {
        Self {
            model,
            api_token: None,
            base_url: None,
            timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
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

    pub fn build(self) -> Result<ReplicateTts> {
        let api_token = self
            .api_token
            .or_else(|| config::resolve_api_key("replicate", "REPLICATE_API_TOKEN"))
            .ok_or_else(|| Error::configuration("Replicate API token required"))?;
        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(ReplicateTts {
            http_client: http_client(self.timeout)?,
            base_url,
            api_token,
            model: self.model,
        })
    }
}
