//! Configuration for the OpenAI-compatible provider.

use secrecy::ExposeSecret;

use crate::config::{LlmSettings, DEFAULT_OPENAI_BASE_URL};

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name used in logs.
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: String,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: DEFAULT_OPENAI_BASE_URL.into(),
        api_key: api_key.into(),
        model: model.into(),
    }
}

impl From<&LlmSettings> for OpenAiCompatConfig {
    fn from(settings: &LlmSettings) -> Self {
        let mut config = openai_defaults(settings.api_key.expose_secret(), &settings.model);
        config.base_url = settings.base_url.trim_end_matches('/').to_string();
        config
    }
}
