use actix_web::{http::header, web, HttpRequest, HttpResponse};
use bizgen_core::{Analysis, BusinessSession, Idea};
use bizgen_llm::{mask_api_key, LLMError};
use bizgen_pipeline::{GenerateIdeasRequest, Pipeline};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::{AppState, SessionEntry};

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(flatten)]
    pub ideas: GenerateIdeasRequest,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub ideas: Vec<Idea>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub context: String,
    pub ideas: Vec<Idea>,
    pub analyses: Vec<Analysis>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    fn new(session_id: String, session: &BusinessSession) -> Self {
        Self {
            session_id,
            context: session.context().as_str().to_string(),
            ideas: session.ideas().to_vec(),
            analyses: session
                .ideas()
                .iter()
                .flat_map(|idea| session.analyses_for(idea.index))
                .cloned()
                .collect(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// `POST /api/v1/sessions`: generate ideas and open a session for them.
pub async fn create(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let origin = http_req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());

    let Some(api_key) = state.resolve_api_key(req.api_key.as_deref(), origin) else {
        log::warn!("Idea generation requested without an API key");
        return Err(AppError::MissingCredential);
    };

    let provider = state.providers.create(&api_key).map_err(|e| match e {
        LLMError::MissingApiKey => AppError::MissingCredential,
        other => AppError::Provider(other),
    })?;
    log::debug!("Using API key {}", mask_api_key(&api_key));

    let pipeline = Pipeline::new(provider, state.pipeline_config.clone());
    let session = pipeline.generate_ideas(req.ideas).await?;
    let ideas = session.ideas().to_vec();

    let session_id = state
        .insert_session(SessionEntry::new(session, pipeline))
        .await?;
    log::info!("[{}] Session created with {} ideas", session_id, ideas.len());

    Ok(HttpResponse::Created().json(CreateSessionResponse { session_id, ideas }))
}

/// `GET /api/v1/sessions/{session_id}`
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let session_id = path.into_inner();
    let entry = state
        .session(&session_id)
        .await
        .ok_or_else(|| AppError::SessionNotFound(session_id.clone()))?;

    let session = entry.snapshot().await;
    Ok(HttpResponse::Ok().json(SessionView::new(session_id, &session)))
}

/// `DELETE /api/v1/sessions/{session_id}`
pub async fn delete(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    if !state.remove_session(&session_id).await {
        return Err(AppError::SessionNotFound(session_id));
    }

    log::info!("[{}] Session deleted", session_id);
    Ok(HttpResponse::Ok().finish())
}
