use bizgen_core::{Analysis, BusinessSession, PipelineError};
use bizgen_llm::ProviderFactory;
use bizgen_pipeline::{AnalysisRequest, Pipeline, PipelineConfig};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::AppError;

/// Sessions idle for longer than this are dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// A session's generated content and the pipeline bound to the key that created it.
///
/// Generation is serialized per session by `generation`. Readers only take the
/// `session` lock, which is never held across a provider call.
pub struct SessionEntry {
    pipeline: Pipeline,
    session: RwLock<BusinessSession>,
    generation: Mutex<()>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl SessionEntry {
    pub fn new(session: BusinessSession, pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            session: RwLock::new(session),
            generation: Mutex::new(()),
            last_activity: RwLock::new(Utc::now()),
        }
    }

    /// Current state of the session, without waiting for a generation in flight.
    pub async fn snapshot(&self) -> BusinessSession {
        self.touch().await;
        self.session.read().await.clone()
    }

    pub async fn generate_analysis(&self, request: AnalysisRequest) -> Result<Analysis, PipelineError> {
        let _turn = self.generation.lock().await;
        self.touch().await;

        let mut working = self.session.read().await.clone();
        let analysis = self.pipeline.generate_analysis(&mut working, request).await?;
        *self.session.write().await = working;

        self.touch().await;
        Ok(analysis)
    }

    pub async fn last_activity(&self) -> DateTime<Utc> {
        *self.last_activity.read().await
    }

    fn is_busy(&self) -> bool {
        self.generation.try_lock().is_err()
    }

    /// Idle for at least `ttl`. A session with a generation in flight is never idle.
    pub async fn is_inactive(&self, ttl: Duration) -> bool {
        if self.is_busy() {
            return false;
        }
        Utc::now()
            .signed_duration_since(self.last_activity().await)
            .to_std()
            .map(|idle| idle >= ttl)
            .unwrap_or(false)
    }

    async fn touch(&self) {
        *self.last_activity.write().await = Utc::now();
    }
}

pub type SharedSession = Arc<SessionEntry>;

pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, SharedSession>>>,
    pub providers: Arc<dyn ProviderFactory>,
    pub pipeline_config: PipelineConfig,
    default_api_key: Option<String>,
    allowed_origins: Vec<String>,
    session_ttl: Duration,
    max_sessions: usize,
}

impl AppState {
    pub fn new(
        providers: Arc<dyn ProviderFactory>,
        pipeline_config: PipelineConfig,
        default_api_key: Option<String>,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            providers,
            pipeline_config,
            default_api_key: non_blank(default_api_key),
            allowed_origins: Vec::new(),
            session_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    /// Browser origins allowed to call the API and to spend the server's key.
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    pub fn with_session_limits(mut self, ttl: Duration, max_sessions: usize) -> Self {
        self.session_ttl = ttl;
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    pub fn has_default_api_key(&self) -> bool {
        self.default_api_key.is_some()
    }

    /// The key sent with the request, or the server's configured key.
    ///
    /// The server's key is only handed out to requests without an `Origin`
    /// header or from an allowed origin.
    pub fn resolve_api_key(&self, supplied: Option<&str>, origin: Option<&str>) -> Option<String> {
        if let Some(key) = non_blank(supplied.map(str::to_string)) {
            return Some(key);
        }

        match origin {
            Some(origin) if !self.is_allowed_origin(origin) => {
                if self.default_api_key.is_some() {
                    log::warn!("Not using the server API key for origin {}", origin);
                }
                None
            }
            _ => self.default_api_key.clone(),
        }
    }

    pub async fn insert_session(&self, entry: SessionEntry) -> Result<String, AppError> {
        self.evict_idle_sessions().await;

        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            let mut oldest: Option<(String, DateTime<Utc>)> = None;
            for (id, candidate) in sessions.iter() {
                if candidate.is_busy() {
                    continue;
                }
                let seen = candidate.last_activity().await;
                if oldest.as_ref().map_or(true, |(_, at)| seen < *at) {
                    oldest = Some((id.clone(), seen));
                }
            }

            let Some((evicted, _)) = oldest else {
                log::warn!("Session limit of {} reached, all sessions busy", self.max_sessions);
                return Err(AppError::SessionLimitReached(self.max_sessions));
            };
            sessions.remove(&evicted);
            log::info!("[{}] Session evicted to stay within the session limit", evicted);
        }

        let session_id = Uuid::new_v4().to_string();
        sessions.insert(session_id.clone(), Arc::new(entry));
        Ok(session_id)
    }

    pub async fn session(&self, session_id: &str) -> Option<SharedSession> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id).is_some()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session idle for longer than the configured TTL.
    pub async fn evict_idle_sessions(&self) -> usize {
        // Collect first so no map guard is held while checking each session.
        let candidates: Vec<(String, SharedSession)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect();

        let mut idle = Vec::new();
        for (id, entry) in candidates {
            if entry.is_inactive(self.session_ttl).await {
                idle.push(id);
            }
        }
        if idle.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        let mut removed = 0;
        for id in idle {
            if sessions.remove(&id).is_some() {
                log::info!("[{}] Session idle and was evicted", id);
                removed += 1;
            }
        }
        removed
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
