//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `voicemate-core`, plus [`create_provider`] which builds
//! it from [`LlmSettings`].
//!
//! [`LlmProvider`]: voicemate_core::llm::provider::LlmProvider

pub mod openai_compat;

use voicemate_core::llm::box_provider::BoxLlmProvider;

use crate::config::LlmSettings;

use self::openai_compat::config::OpenAiCompatConfig;
use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from the configured LLM settings.
pub fn create_provider(settings: &LlmSettings) -> BoxLlmProvider {
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig::from(settings));
    BoxLlmProvider::new(provider)
}

/// Provider for optional settings; `None` keeps the assistant rule-based.
pub fn optional_provider(settings: Option<&LlmSettings>) -> Option<BoxLlmProvider> {
    settings.map(create_provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn settings() -> LlmSettings {
        LlmSettings {
            api_key: SecretString::from("sk-test"),
            model: "gpt-4o-mini".into(),
            base_url: "https://api.openai.com/v1".into(),
        }
    }

    #[test]
    fn test_create_provider() {
        let provider = create_provider(&settings());
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_optional_provider() {
        assert!(optional_provider(None).is_none());
        assert!(optional_provider(Some(&settings())).is_some());
    }
}
