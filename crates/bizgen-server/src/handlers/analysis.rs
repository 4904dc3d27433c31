use actix_web::{web, HttpResponse};
use bizgen_core::AnalysisKind;
use bizgen_pipeline::AnalysisRequest;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// `POST /api/v1/sessions/{session_id}/ideas/{index}/analysis/{kind}`
pub async fn generate(
    state: web::Data<AppState>,
    path: web::Path<(String, usize, String)>,
) -> Result<HttpResponse> {
    let (session_id, idea_index, kind) = path.into_inner();
    let kind: AnalysisKind = kind
        .parse()
        .map_err(|_| AppError::UnknownAnalysisKind(kind.clone()))?;

    let entry = state
        .session(&session_id)
        .await
        .ok_or_else(|| AppError::SessionNotFound(session_id.clone()))?;

    log::info!(
        "[{}] Generating {} for business idea {}",
        session_id,
        kind,
        idea_index
    );
    let analysis = entry
        .generate_analysis(AnalysisRequest::new(idea_index, kind))
        .await?;

    Ok(HttpResponse::Ok().json(analysis))
}
