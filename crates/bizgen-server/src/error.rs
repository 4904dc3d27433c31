use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use bizgen_core::PipelineError;
use bizgen_llm::{LLMError, API_KEYS_URL, API_KEY_GUIDANCE};
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", API_KEY_GUIDANCE)]
    MissingCredential,

    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    #[error("Unknown analysis kind '{0}'")]
    UnknownAnalysisKind(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Too many open sessions (limit {0}), try again later")]
    SessionLimitReached(usize),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("LLM provider error: {0}")]
    Provider(#[from] LLMError),
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingCredential | AppError::Provider(LLMError::MissingApiKey) => {
                "missing_credential"
            }
            AppError::SessionNotFound(_) | AppError::Pipeline(PipelineError::IdeaNotFound(_)) => {
                "not_found"
            }
            AppError::UnknownAnalysisKind(_)
            | AppError::InvalidBody(_)
            | AppError::Pipeline(PipelineError::EmptyContext)
            | AppError::Pipeline(PipelineError::InvalidIdeaCount(_)) => "invalid_request",
            AppError::Pipeline(PipelineError::MissingPrerequisite { .. }) => "ordering_error",
            AppError::SessionLimitReached(_) => "capacity",
            AppError::Pipeline(PipelineError::Llm { .. }) | AppError::Provider(_) => "llm_error",
        }
    }
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help_url: Option<&'static str>,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::UNAUTHORIZED,
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnknownAnalysisKind(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::SessionLimitReached(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Pipeline(err) => match err {
                PipelineError::EmptyContext | PipelineError::InvalidIdeaCount(_) => {
                    StatusCode::BAD_REQUEST
                }
                PipelineError::IdeaNotFound(_) => StatusCode::NOT_FOUND,
                PipelineError::MissingPrerequisite { .. } => StatusCode::CONFLICT,
                PipelineError::Llm { .. } => StatusCode::BAD_GATEWAY,
            },
            AppError::Provider(LLMError::MissingApiKey) => StatusCode::UNAUTHORIZED,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_type = self.error_type();
        let message = match error_type {
            "missing_credential" => API_KEY_GUIDANCE.to_string(),
            _ => self.to_string(),
        };
        let help_url = (error_type == "missing_credential").then_some(API_KEYS_URL);

        HttpResponse::build(self.status_code()).json(JsonErrorWrapper {
            error: JsonError {
                message,
                r#type: error_type.to_string(),
                help_url,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizgen_core::AnalysisKind;

    #[test]
    fn status_codes_follow_error_taxonomy() {
        assert_eq!(AppError::MissingCredential.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Provider(LLMError::MissingApiKey).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Pipeline(PipelineError::EmptyContext).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Pipeline(PipelineError::MissingPrerequisite {
                idea_index: 1,
                missing: vec![AnalysisKind::Stp],
            })
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Provider(LLMError::EmptyResponse).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::InvalidBody("missing field `context`".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::SessionLimitReached(10).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn error_types_are_stable() {
        assert_eq!(AppError::MissingCredential.error_type(), "missing_credential");
        assert_eq!(
            AppError::SessionNotFound("abc".to_string()).error_type(),
            "not_found"
        );
        assert_eq!(
            AppError::Pipeline(PipelineError::Llm {
                stage: "business idea 1".to_string(),
                message: "timeout".to_string(),
            })
            .error_type(),
            "llm_error"
        );
    }
}
