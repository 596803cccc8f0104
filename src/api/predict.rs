use super::{ApiError, SharedState};
use crate::models::prediction::PredictionResponse;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::{debug, warn};

/// `POST /prever`: one feature row in, one rounded delay out.
pub async fn predict(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Value::Object(row) = body else {
        return Err(ApiError::BadRequest(
            "Entrada deve ser um objeto JSON".to_string(),
        ));
    };

    let model = state.model.clone();
    let raw = tokio::task::spawn_blocking(move || model.predict(&row))
        .await
        .map_err(|e| ApiError::BadRequest(format!("Falha na avaliação do modelo: {}", e)))?
        .map_err(|e| {
            warn!("Prediction rejected: {}", e);
            ApiError::BadRequest(e.to_string())
        })?;

    debug!("Raw prediction {}", raw);
    Ok(Json(PredictionResponse::from_raw(raw)))
}
