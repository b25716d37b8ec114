//! Data-driven provider registry.
//!
//! Each provider is an entry: a stable string id plus its enumerable voice and
//! model domains, available without constructing an adapter. The batch engine
//! and the unified client dispatch through [`ProviderId`] instead of branching
//! on per-provider code.

use std::fmt;
use std::str::FromStr;

use crate::domain::ParamDomain;
use crate::providers;
use crate::{Error, ErrorContext};

/// Identifier for one supported TTS provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAi,
    ElevenLabs,
    Cartesia,
    Hume,
    Zyphra,
    /// Kokoro-82M, hosted on Replicate.
    Kokoro,
    /// Orpheus 3B, hosted on Replicate.
    Orpheus,
}

impl ProviderId {
    pub const ALL: [ProviderId; 7] = [
        ProviderId::OpenAi,
        ProviderId::ElevenLabs,
        ProviderId::Cartesia,
        ProviderId::Hume,
        ProviderId::Zyphra,
        ProviderId::Kokoro,
        ProviderId::Orpheus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::ElevenLabs => "elevenlabs",
            ProviderId::Cartesia => "cartesia",
            ProviderId::Hume => "hume",
            ProviderId::Zyphra => "zyphra",
            ProviderId::Kokoro => "kokoro",
            ProviderId::Orpheus => "orpheus",
        }
    }

    /// Enumerable voice values for this provider.
    pub fn voices(&self) -> &'static ParamDomain {
        match self {
            ProviderId::OpenAi => &providers::OPENAI_VOICES,
            ProviderId::ElevenLabs => &providers::ELEVENLABS_VOICES,
            ProviderId::Cartesia => &providers::CARTESIA_VOICES,
            ProviderId::Hume => &providers::HUME_VOICES,
            ProviderId::Zyphra => &providers::ZYPHRA_VOICES,
            ProviderId::Kokoro => &providers::KOKORO_VOICES,
            ProviderId::Orpheus => &providers::ORPHEUS_VOICES,
        }
    }

    /// Enumerable model values for this provider.
    pub fn models(&self) -> &'static ParamDomain {
        match self {
            ProviderId::OpenAi => &providers::OPENAI_MODELS,
            ProviderId::ElevenLabs => &providers::ELEVENLABS_MODELS,
            ProviderId::Cartesia => &providers::CARTESIA_MODELS,
            ProviderId::Hume => &providers::HUME_MODELS,
            ProviderId::Zyphra => &providers::ZYPHRA_MODELS,
            ProviderId::Kokoro => &providers::KOKORO_MODELS,
            ProviderId::Orpheus => &providers::ORPHEUS_MODELS,
        }
    }

    /// Language domain, for providers that expose one.
    pub fn languages(&self) -> Option<&'static ParamDomain> {
        match self {
            ProviderId::Cartesia => Some(&providers::CARTESIA_LANGUAGES),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let known = Self::ALL
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Error::validation_with_context(
                    format!("unknown provider '{}'", s),
                    ErrorContext::new().with_details(format!("known providers: {}", known)),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for id in ProviderId::ALL {
            assert_eq!(id.as_str().parse::<ProviderId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_id_is_rejected_with_known_list() {
        let err = "polly".parse::<ProviderId>().unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("unknown provider 'polly'"));
        assert!(rendered.contains("elevenlabs"));
    }

    #[test]
    fn every_provider_has_nonempty_domains() {
        for id in ProviderId::ALL {
            assert!(!id.voices().is_empty(), "{} has no voices", id);
            assert!(!id.models().is_empty(), "{} has no models", id);
        }
    }

    #[test]
    fn only_cartesia_exposes_languages() {
        assert!(ProviderId::Cartesia.languages().is_some());
        assert!(ProviderId::OpenAi.languages().is_none());
    }
}
