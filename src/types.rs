//! Core types: audio payloads and synthesis options.

/// Audio returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioOutput {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioOutput {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Supported audio container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Pcm => "audio/pcm",
        }
    }

    /// Wire name used by provider request bodies (`response_format`, `mime_type`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "opus" => Self::Opus,
            "aac" => Self::Aac,
            "flac" => Self::Flac,
            "wav" => Self::Wav,
            "pcm" => Self::Pcm,
            _ => Self::Mp3,
        }
    }
}

/// Per-call overrides for synthesis. Every field defaults to "provider decides".
///
/// Enumerable axes (model, language, named voices) are validated against the
/// provider's [`crate::domain::ParamDomain`] before a request is issued;
/// free-form voice-id axes are passed through as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisOptions {
    pub voice: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub speed: Option<f32>,
    pub output_format: Option<AudioFormat>,
}

impl SynthesisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_output_format(mut self, format: AudioFormat) -> Self {
        self.output_format = Some(format);
        self
    }
}
