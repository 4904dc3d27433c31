//! Provider Factory
//!
//! Turns a user-supplied API key into a ready provider.

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::provider::{CompletionProvider, LLMError};
use crate::providers::OpenAIProvider;

/// Where users obtain an OpenAI API key.
pub const API_KEYS_URL: &str = "https://platform.openai.com/account/api-keys";

/// Shown instead of any generation when no API key is available.
pub const API_KEY_GUIDANCE: &str =
    "Please add your OpenAI API key to continue. You can get one at https://platform.openai.com/account/api-keys";

pub trait ProviderFactory: Send + Sync {
    fn create(&self, api_key: &str) -> Result<Arc<dyn CompletionProvider>, LLMError>;
}

pub struct OpenAIProviderFactory {
    config: LlmConfig,
}

impl OpenAIProviderFactory {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }
}

impl ProviderFactory for OpenAIProviderFactory {
    fn create(&self, api_key: &str) -> Result<Arc<dyn CompletionProvider>, LLMError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LLMError::MissingApiKey);
        }

        log::info!(
            "Creating OpenAI provider: base URL {}, model {}, key {}",
            self.config.base_url,
            self.config.model,
            mask_api_key(api_key)
        );

        Ok(Arc::new(
            OpenAIProvider::new(api_key)
                .with_base_url(self.config.base_url.clone())
                .with_model(self.config.model.clone())
                .with_timeout(self.config.timeout),
        ))
    }
}

/// Loggable form of a key: the first three and last four characters.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_rejected() {
        let factory = OpenAIProviderFactory::new(LlmConfig::default());

        assert!(matches!(factory.create(""), Err(LLMError::MissingApiKey)));
        assert!(matches!(factory.create("   "), Err(LLMError::MissingApiKey)));
    }

    #[test]
    fn creates_openai_provider() {
        let factory = OpenAIProviderFactory::new(LlmConfig::default());
        let provider = factory.create("sk-abcdef123456").unwrap();

        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn guidance_points_at_key_page() {
        assert!(API_KEY_GUIDANCE.ends_with(API_KEYS_URL));
    }

    #[test]
    fn mask_hides_middle_of_key() {
        assert_eq!(mask_api_key("sk-abcdef123456"), "sk-...3456");
        assert_eq!(mask_api_key("short"), "****");
    }
}
