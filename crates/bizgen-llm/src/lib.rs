pub mod config;
pub mod provider;
pub mod provider_factory;
pub mod providers;

pub use config::LlmConfig;
pub use provider::{CompletionProvider, CompletionRequest, LLMError, Result};
pub use provider_factory::{
    mask_api_key, OpenAIProviderFactory, ProviderFactory, API_KEYS_URL, API_KEY_GUIDANCE,
};
pub use providers::OpenAIProvider;
