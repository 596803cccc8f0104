use super::{ApiError, SharedState};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct StationQuery {
    pub estacao: Option<String>,
}

/// `GET /dados_estacao?estacao=...`
pub async fn station_data(
    State(state): State<SharedState>,
    Query(params): Query<StationQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    // A missing station can't match any row.
    let Some(estacao) = params.estacao else {
        return Ok(Json(Vec::new()));
    };

    let rows = state
        .store
        .station_rows(&estacao)
        .await
        .map_err(|e| ApiError::database("Erro ao consultar dados da estação", e))?;

    Ok(Json(rows))
}
