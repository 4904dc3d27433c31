use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::provider::{CompletionProvider, CompletionRequest, Result};

use super::common::openai_compat::{
    build_openai_compat_body, parse_openai_compat_error, parse_openai_compat_response,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = build_openai_compat_body(&self.model, request);

        log::debug!(
            "OpenAI request: model={}, temperature={}, prompt_chars={}",
            self.model,
            request.temperature,
            request.prompt.chars().count()
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::warn!("OpenAI returned HTTP {}", status);
            return Err(parse_openai_compat_error(status.as_u16(), &text));
        }

        parse_openai_compat_response(&text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
