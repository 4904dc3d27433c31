use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;

pub async fn handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "api_key_configured": state.has_default_api_key(),
    }))
}
