//! Unified text-to-speech client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::batch::{self, SpeechTask, TaskOutcome};
use crate::config::Settings;
use crate::providers::{
    CartesiaTts, ElevenLabsTts, HumeTts, OpenAiTts, ReplicateModel, ReplicateTts, TtsProvider,
    ZyphraTts,
};
use crate::registry::ProviderId;
use crate::types::{AudioOutput, SynthesisOptions};
use crate::{Error, ErrorContext, Result};

/// One client over every configured provider.
///
/// An adapter exists iff its API key was configured; Kokoro and Orpheus share
/// the Replicate token. Calls against an unconfigured provider fail with a
/// configuration error rather than a provider error.
pub struct UttsClient {
    providers: HashMap<ProviderId, Arc<dyn TtsProvider>>,
}

impl UttsClient {
    pub fn builder() -> UttsClientBuilder {
        UttsClientBuilder::new()
    }

    /// Build a client from `.env` + environment settings.
    pub fn from_env() -> Result<Self> {
        Self::builder().settings(Settings::from_env()).build()
    }

    /// Look up a configured provider adapter.
    pub fn provider(&self, id: ProviderId) -> Option<&Arc<dyn TtsProvider>> {
        self.providers.get(&id)
    }

    /// Providers with a configured adapter, in registry order.
    pub fn configured(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.providers.contains_key(id))
            .collect()
    }

    /// Generate audio with one provider.
    pub async fn synthesize(
        &self,
        id: ProviderId,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<AudioOutput> {
        let provider = self.provider(id).ok_or_else(|| {
            Error::configuration_with_context(
                format!("provider '{}' is not configured (missing API key)", id),
                ErrorContext::new().with_field_path(format!("settings.{}", id)),
            )
        })?;
        provider.synthesize(text, options).await
    }

    /// Run a comparison batch; see [`crate::batch::generate_batch`].
    pub async fn generate_batch(&self, tasks: Vec<SpeechTask>) -> Vec<TaskOutcome> {
        batch::generate_batch(self, tasks).await
    }
}

/// Builder for [`UttsClient`].
///
/// Keys can be set explicitly or pulled from [`Settings`]; base-URL overrides
/// exist so tests can point an adapter at a mock server.
pub struct UttsClientBuilder {
    settings: Settings,
    base_url_overrides: HashMap<ProviderId, String>,
}

impl UttsClientBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            base_url_overrides: HashMap::new(),
        }
    }

    /// Replace the whole settings block (e.g. with `Settings::from_env()`).
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.openai_api_key = Some(key.into());
        self
    }

    pub fn openai_organization_id(mut self, org: impl Into<String>) -> Self {
        self.settings.openai_organization_id = Some(org.into());
        self
    }

    pub fn elevenlabs_api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.elevenlabs_api_key = Some(key.into());
        self
    }

    pub fn replicate_api_token(mut self, token: impl Into<String>) -> Self {
        self.settings.replicate_api_token = Some(token.into());
        self
    }

    pub fn zyphra_api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.zyphra_api_key = Some(key.into());
        self
    }

    pub fn hume_api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.hume_api_key = Some(key.into());
        self
    }

    pub fn cartesia_api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.cartesia_api_key = Some(key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout_secs = timeout.as_secs();
        self
    }

    /// Point one provider's adapter at a different base URL.
    pub fn base_url_override(mut self, id: ProviderId, base_url: impl Into<String>) -> Self {
        self.base_url_overrides.insert(id, base_url.into());
        self
    }

    pub fn build(self) -> Result<UttsClient> {
        let timeout = Duration::from_secs(self.settings.timeout_secs);
        let mut providers: HashMap<ProviderId, Arc<dyn TtsProvider>> = HashMap::new();

        if let Some(key) = self.settings.openai_api_key.clone() {
            let mut builder = OpenAiTts::builder().api_key(key).timeout(timeout);
            if let Some(org) = self.settings.openai_organization_id.clone() {
                builder = builder.organization_id(org);
            }
            if let Some(url) = self.base_url_overrides.get(&ProviderId::OpenAi) {
                builder = builder.base_url(url.clone());
            }
            providers.insert(ProviderId::OpenAi, Arc::new(builder.build()?));
        }

        if let Some(key) = self.settings.elevenlabs_api_key.clone() {
            let mut builder = ElevenLabsTts::builder().api_key(key).timeout(timeout);
            if let Some(url) = self.base_url_overrides.get(&ProviderId::ElevenLabs) {
                builder = builder.base_url(url.clone());
            }
            providers.insert(ProviderId::ElevenLabs, Arc::new(builder.build()?));
        }

        if let Some(key) = self.settings.cartesia_api_key.clone() {
            let mut builder = CartesiaTts::builder().api_key(key).timeout(timeout);
            if let Some(url) = self.base_url_overrides.get(&ProviderId::Cartesia) {
                builder = builder.base_url(url.clone());
            }
            providers.insert(ProviderId::Cartesia, Arc::new(builder.build()?));
        }

        if let Some(key) = self.settings.hume_api_key.clone() {
            let mut builder = HumeTts::builder().api_key(key).timeout(timeout);
            if let Some(url) = self.base_url_overrides.get(&ProviderId::Hume) {
                builder = builder.base_url(url.clone());
            }
            providers.insert(ProviderId::Hume, Arc::new(builder.build()?));
        }

        if let Some(key) = self.settings.zyphra_api_key.clone() {
            let mut builder = ZyphraTts::builder().api_key(key).timeout(timeout);
            if let Some(url) = self.base_url_overrides.get(&ProviderId::Zyphra) {
                builder = builder.base_url(url.clone());
            }
            providers.insert(ProviderId::Zyphra, Arc::new(builder.build()?));
        }

        if let Some(token) = self.settings.replicate_api_token.clone() {
            for (id, model) in [
                (ProviderId::Kokoro, ReplicateModel::Kokoro),
                (ProviderId::Orpheus, ReplicateModel::Orpheus),
            ] {
                let mut builder = ReplicateTts::builder(model)
                    .api_token(token.clone())
                    .timeout(timeout);
                if let Some(url) = self.base_url_overrides.get(&id) {
                    builder = builder.base_url(url.clone());
                }
                providers.insert(id, Arc::new(builder.build()?));
            }
        }

        Ok(UttsClient { providers })
    }
}

impl Default for UttsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keys_means_no_providers() {
        let client = UttsClient::builder().build().unwrap();
        assert!(client.configured().is_empty());
        assert!(client.provider(ProviderId::OpenAi).is_none());
    }

    #[test]
    fn replicate_token_configures_both_hosted_models() {
        let client = UttsClient::builder()
            .replicate_api_token("r8_test")
            .build()
            .unwrap();
        assert_eq!(
            client.configured(),
            vec![ProviderId::Kokoro, ProviderId::Orpheus]
        );
    }

    #[tokio::test]
    async fn unconfigured_provider_fails_with_configuration_error() {
        let client = UttsClient::builder().build().unwrap();
        let err = client
            .synthesize(ProviderId::Zyphra, "hi", &SynthesisOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("zyphra"));
    }
}
