//! Batch task construction.

use crate::registry::ProviderId;
use crate::types::SynthesisOptions;
use crate::{Error, ErrorContext, Result};

/// One requested generation call: target provider, text, optional overrides.
///
/// Tasks are immutable once constructed, have no identity beyond their
/// position in the batch, and are consumed exactly once by the engine.
/// Construction validates the caller contract up front so a malformed task
/// fails the whole call immediately instead of surfacing as a captured
/// provider failure.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechTask {
    provider: ProviderId,
    text: String,
    options: SynthesisOptions,
}

impl SpeechTask {
    pub fn new(provider: ProviderId, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::validation_with_context(
                "task text must not be empty",
                ErrorContext::new().with_field_path("task.text"),
            ));
        }
        Ok(Self {
            provider,
            text,
            options: SynthesisOptions::default(),
        })
    }

    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.options.voice = Some(voice.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options.model = Some(model.into());
        self
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_empty_text() {
        let err = SpeechTask::new(ProviderId::OpenAi, "   ").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn builder_style_overrides() {
        let task = SpeechTask::new(ProviderId::Kokoro, "hello")
            .unwrap()
            .with_voice("af_bella")
            .with_model("kokoro-82m");
        assert_eq!(task.provider(), ProviderId::Kokoro);
        assert_eq!(task.text(), "hello");
        assert_eq!(task.options().voice.as_deref(), Some("af_bella"));
        assert_eq!(task.options().model.as_deref(), Some("kokoro-82m"));
    }
}
