//! LLM connection settings.
//!
//! Environment variables:
//! - `OPENAI_BASE_URL`: API base URL (default: `https://api.openai.com/v1`)
//! - `OPENAI_MODEL`: chat model name (default: `gpt-3.5-turbo`)
//! - `OPENAI_TIMEOUT_SECS`: per-request timeout in seconds (default: 120)

use std::time::Duration;

use crate::providers::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: non_empty("OPENAI_MODEL").unwrap_or(defaults.model),
            timeout: non_empty("OPENAI_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = base_url;
        }
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|model| !model.trim().is_empty()) {
            self.model = model;
        }
        self
    }
}
