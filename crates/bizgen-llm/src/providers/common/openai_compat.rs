//! OpenAI-compatible chat completion helpers.
//!
//! The pipeline only ever sends one user message per request and reads the
//! first choice back, so these helpers cover exactly that shape.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::provider::{CompletionRequest, LLMError, Result};

/// Build a non-streaming chat completion body for a single user prompt.
pub fn build_openai_compat_body(model: &str, request: &CompletionRequest) -> Value {
    let mut body = json!({
        "model": model,
        "messages": [
            { "role": "user", "content": request.prompt }
        ],
        "temperature": request.temperature,
        "stream": false,
    });

    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }

    body
}

#[derive(Debug, Deserialize)]
struct OpenAICompatResponse {
    #[serde(default)]
    choices: Vec<OpenAICompatChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAICompatChoice {
    message: OpenAICompatMessage,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAICompatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAICompatErrorEnvelope {
    error: OpenAICompatErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAICompatErrorBody {
    message: String,
}

/// Extract the completion text of the first choice.
///
/// - Invalid JSON -> `LLMError::Json`
/// - No choices, null or blank content -> `LLMError::EmptyResponse`
pub fn parse_openai_compat_response(body: &str) -> Result<String> {
    let response: OpenAICompatResponse = serde_json::from_str(body)?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(LLMError::EmptyResponse)?;

    if content.trim().is_empty() {
        return Err(LLMError::EmptyResponse);
    }

    Ok(content)
}

/// Map a non-success response to `LLMError::Api`, preferring the provider's own
/// error message when the body is an OpenAI error envelope.
pub fn parse_openai_compat_error(status: u16, body: &str) -> LLMError {
    let message = serde_json::from_str::<OpenAICompatErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    LLMError::Api { status, message }
}
