use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned an empty response")]
    EmptyResponse,

    #[error("Missing API key")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, LLMError>;

/// A single prompt submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit one prompt and wait for the full completion text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Short name used in log lines.
    fn name(&self) -> &str {
        "llm"
    }
}
