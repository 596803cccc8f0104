use super::SharedState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: &'static str,
    pub model_features: usize,
}

/// Liveness.
pub async fn home() -> &'static str {
    "API Ativa!"
}

/// Readiness: checks the database and reports the loaded model.
pub async fn health(State(state): State<SharedState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "ok"),
        Err(e) => {
            warn!("Health check could not reach the database: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
        }
    };

    let response = HealthResponse {
        status,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
        model_features: state.model.features().len(),
    };

    (code, Json(response))
}
