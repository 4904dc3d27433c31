use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use std::io;
use std::time::Duration;

use crate::error::AppError;
use crate::handlers;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidBody(err.to_string()).into()),
    )
    .route("/", web::get().to(handlers::page::index))
    .service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health::handler))
            .route("/sessions", web::post().to(handlers::sessions::create))
            .route(
                "/sessions/{session_id}",
                web::get().to(handlers::sessions::get),
            )
            .route(
                "/sessions/{session_id}",
                web::delete().to(handlers::sessions::delete),
            )
            .route(
                "/sessions/{session_id}/ideas/{index}/analysis/{kind}",
                web::post().to(handlers::analysis::generate),
            ),
    );
}

/// CORS for the page and any extra origins; every other origin is refused.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let origins = allowed_origins.to_vec();

    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            origins
                .iter()
                .any(|allowed| origin.as_bytes() == allowed.as_bytes())
        })
        .allowed_methods(vec!["GET", "POST", "DELETE"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// Origins the bundled page is served from when bound to `host:port`.
pub fn local_origins(host: &str, port: u16) -> Vec<String> {
    let mut origins = vec![format!("http://{}:{}", host, port)];

    if matches!(host, "127.0.0.1" | "localhost" | "0.0.0.0") {
        for alias in ["127.0.0.1", "localhost"] {
            let origin = format!("http://{}:{}", alias, port);
            if !origins.contains(&origin) {
                origins.push(origin);
            }
        }
    }

    origins
}

pub async fn run_server(host: &str, port: u16, state: AppState) -> io::Result<()> {
    let state = web::Data::new(state);

    log::info!("Starting BizGen server on http://{}:{}", host, port);
    log::info!("Allowed origins: {}", state.allowed_origins().join(", "));
    if !state.has_default_api_key() {
        log::info!("No server API key configured; each user must supply one");
    }

    let sweeper = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let evicted = sweeper.evict_idle_sessions().await;
            if evicted > 0 {
                log::debug!("Evicted {} idle sessions", evicted);
            }
        }
    });

    let origins = state.allowed_origins().to_vec();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&origins))
            .configure(app_config)
    })
    .bind((host, port))?
    .run()
    .await
}
