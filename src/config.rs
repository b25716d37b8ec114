//! Settings loaded from the environment.
//!
//! One optional API key per provider; an adapter is only constructed for
//! providers whose key resolves. Keys are looked up in the OS keyring first
//! (service "utts", one entry per provider id), then in the environment.
//! A `.env` file in the working directory is honored if present.

use std::env;

use keyring::Entry;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// API credentials and shared client settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub openai_organization_id: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    /// Shared by the Kokoro and Orpheus adapters.
    pub replicate_api_token: Option<String>,
    pub zyphra_api_key: Option<String>,
    pub hume_api_key: Option<String>,
    pub cartesia_api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_organization_id: None,
            elevenlabs_api_key: None,
            replicate_api_token: None,
            zyphra_api_key: None,
            hume_api_key: None,
            cartesia_api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        // A missing .env file is not an error; variables may already be set.
        let _ = dotenvy::dotenv();

        Self {
            openai_api_key: resolve_api_key("openai", "OPENAI_API_KEY"),
            openai_organization_id: env::var("OPENAI_ORGANIZATION_ID").ok(),
            elevenlabs_api_key: resolve_api_key("elevenlabs", "ELEVENLABS_API_KEY"),
            replicate_api_token: resolve_api_key("replicate", "REPLICATE_API_TOKEN"),
            zyphra_api_key: resolve_api_key("zyphra", "ZYPHRA_API_KEY"),
            hume_api_key: resolve_api_key("hume", "HUME_API_KEY"),
            cartesia_api_key: resolve_api_key("cartesia", "CARTESIA_API_KEY"),
            timeout_secs: env::var("UTTS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Resolve one provider's credential: keyring entry first, environment second.
pub(crate) fn resolve_api_key(provider_id: &str, env_var: &str) -> Option<String> {
    if let Ok(entry) = Entry::new("utts", provider_id) {
        if let Ok(key) = entry.get_password() {
            return Some(key);
        }
    }
    env::var(env_var).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_no_keys_and_standard_timeout() {
        let settings = Settings::default();
        assert!(settings.openai_api_key.is_none());
        assert!(settings.cartesia_api_key.is_none());
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn resolve_api_key_falls_back_to_environment() {
        // Unique variable name so parallel tests cannot interfere.
        env::set_var("UTTS_TEST_FAKE_PROVIDER_KEY", "sk-test");
        assert_eq!(
            resolve_api_key("utts-test-fake-provider", "UTTS_TEST_FAKE_PROVIDER_KEY").as_deref(),
            Some("sk-test")
        );
        env::remove_var("UTTS_TEST_FAKE_PROVIDER_KEY");
    }
}
