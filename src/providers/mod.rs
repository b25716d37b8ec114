//! Provider adapters: one call-and-decode wrapper per vendor TTS API.
//!
//! Every adapter is a thin layer over the vendor HTTP endpoint — build the
//! request body, send it, map transport failures to [`Error::Network`] and
//! non-2xx statuses to [`Error::Api`], decode the audio payload. Policy
//! (retries, rate limiting, caching) deliberately lives nowhere in this
//! module; the only resilience knob an adapter owns is its request timeout.
//!
//! All adapters implement [`TtsProvider`], which is object-safe so the batch
//! engine and the unified client can hold them as `Arc<dyn TtsProvider>`.

mod cartesia;
mod elevenlabs;
mod hume;
mod openai;
mod replicate;
mod zyphra;

pub use cartesia::{CartesiaTts, CartesiaTtsBuilder};
pub use elevenlabs::{ElevenLabsTts, ElevenLabsTtsBuilder};
pub use hume::{HumeGeneration, HumeOptions, HumeTts, HumeTtsBuilder};
pub use openai::{OpenAiTts, OpenAiTtsBuilder};
pub use replicate::{ReplicateModel, ReplicateTts, ReplicateTtsBuilder};
pub use zyphra::{ZyphraTts, ZyphraTtsBuilder};

pub(crate) use cartesia::{LANGUAGES as CARTESIA_LANGUAGES, MODELS as CARTESIA_MODELS, VOICES as CARTESIA_VOICES};
pub(crate) use elevenlabs::{MODELS as ELEVENLABS_MODELS, VOICES as ELEVENLABS_VOICES};
pub(crate) use hume::{MODELS as HUME_MODELS, VOICES as HUME_VOICES};
pub(crate) use openai::{MODELS as OPENAI_MODELS, VOICES as OPENAI_VOICES};
pub(crate) use replicate::{
    KOKORO_MODELS, KOKORO_VOICES, ORPHEUS_MODELS, ORPHEUS_VOICES,
};
pub(crate) use zyphra::{MODELS as ZYPHRA_MODELS, VOICES as ZYPHRA_VOICES};

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::domain::ParamDomain;
use crate::types::{AudioOutput, SynthesisOptions};
use crate::{Error, ErrorContext, Result};

/// One TTS vendor integration.
///
/// `synthesize` is a single request/response exchange: text plus optional
/// overrides in, raw audio bytes out, or a provider-specific error. The
/// voice/model domains describe the enumerable parameter values the vendor
/// documents, and feed random parameter selection for comparison batches.
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Stable provider identifier (e.g., "elevenlabs").
    fn id(&self) -> &'static str;

    /// Generate audio for `text`, honoring any overrides in `options`.
    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> Result<AudioOutput>;

    /// Enumerable voice values for this provider.
    fn voices(&self) -> &ParamDomain;

    /// Enumerable model values for this provider.
    fn models(&self) -> &ParamDomain;
}

/// Build the shared reqwest client with the adapter's request timeout.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::configuration(format!("failed to create HTTP client: {}", e)))
}

/// Validate a base URL override and strip any trailing slash.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String> {
    Url::parse(base_url).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid base URL '{}': {}", base_url, e),
            ErrorContext::new().with_field_path("base_url"),
        )
    })?;
    Ok(base_url.trim_end_matches('/').to_string())
}

/// Read a response expected to carry raw audio, mapping non-success statuses
/// to [`Error::Api`] with the response body as the message.
pub(crate) async fn read_audio_body(response: reqwest::Response, source: &'static str) -> Result<Bytes> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| {
        Error::network_with_context(
            format!("failed to read response body: {}", e),
            ErrorContext::new().with_source(source),
        )
    })?;
    if !status.is_success() {
        return Err(Error::api(
            status.as_u16(),
            String::from_utf8_lossy(&bytes).into_owned(),
            ErrorContext::new().with_source(source),
        ));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.example.com/").unwrap(),
            "https://api.example.com"
        );
        assert_eq!(
            normalize_base_url("http://127.0.0.1:4010").unwrap(),
            "http://127.0.0.1:4010"
        );
    }

    #[test]
    fn normalize_base_url_rejects_garbage() {
        let err = normalize_base_url("not a url").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
