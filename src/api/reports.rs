use super::{ApiError, SharedState};
use crate::models::report::{CreateReportRequest, ReportCreated, ReportSummary, UpdateReportRequest};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

/// Caller identity header. Not authenticated.
pub const USER_HEADER: &str = "X-User-ID";

/// `Ok(None)` when the header is absent or blank.
fn caller_id(headers: &HeaderMap) -> Result<Option<i64>, ApiError> {
    let Some(raw) = headers.get(USER_HEADER) else {
        return Ok(None);
    };

    let raw = raw
        .to_str()
        .map_err(|_| ApiError::BadRequest(format!("{} inválido", USER_HEADER)))?
        .trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| ApiError::BadRequest(format!("{} inválido", USER_HEADER)))
}

fn report_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound("Report não encontrado".to_string()))
}

/// `POST /reports`
pub async fn create_report(
    State(state): State<SharedState>,
    body: Result<Json<CreateReportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReportCreated>), ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let report = request.validate().map_err(|required| {
        ApiError::BadRequest(format!("Campos obrigatórios: {}", required.join(", ")))
    })?;

    if let Some(id_usuario) = report.id_usuario {
        let exists = state
            .store
            .user_exists(id_usuario)
            .await
            .map_err(|e| ApiError::database("Erro ao inserir report", e))?;
        if !exists {
            return Err(ApiError::NotFound(format!(
                "ID de usuário {} não encontrado",
                id_usuario
            )));
        }
    }

    let id_report = state
        .store
        .insert_report(&report)
        .await
        .map_err(|e| ApiError::database("Erro ao inserir report", e))?;

    info!(
        "Created report {} ({}) for station {}",
        id_report, report.tipo_alerta, report.estacao
    );

    Ok((
        StatusCode::CREATED,
        Json(ReportCreated {
            mensagem: "Report criado com sucesso".to_string(),
            id_report,
        }),
    ))
}

/// `GET /reports`: the caller's own reports, newest first.
pub async fn list_reports(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReportSummary>>, ApiError> {
    let id_usuario = caller_id(&headers)?.ok_or(ApiError::Unauthorized)?;

    let reports = state
        .store
        .reports_for_user(id_usuario)
        .await
        .map_err(|e| ApiError::database("Erro no banco de dados", e))?;

    Ok(Json(reports))
}

/// `PUT /reports/{id}`: only the description can change, and only by its owner.
pub async fn update_report(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    body: Result<Json<UpdateReportRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id_report = report_id(path)?;

    let Json(request) =
        body.map_err(|_| ApiError::BadRequest("Dados JSON ausentes".to_string()))?;
    let nova_descricao = request
        .nova_descricao
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Campo \"nova_descricao\" obrigatório".to_string()))?;

    let id_usuario = caller_id(&headers)?.ok_or(ApiError::Unauthorized)?;

    let affected = state
        .store
        .update_description(id_report, id_usuario, &nova_descricao)
        .await
        .map_err(|e| ApiError::database("Falha na atualização", e))?;

    if affected == 0 {
        return Err(ApiError::NotFound(
            "Report não encontrado ou não pertence ao usuário".to_string(),
        ));
    }

    info!("Updated description of report {}", id_report);
    Ok(Json(json!({ "mensagem": "Descrição atualizada com sucesso" })))
}

/// `DELETE /reports/{id}`
pub async fn delete_report(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let not_found = || ApiError::NotFound("Report não encontrado ou não autorizado".to_string());

    let id_report = report_id(path)?;
    // Without a usable owner id no row can match.
    let Ok(Some(id_usuario)) = caller_id(&headers) else {
        return Err(not_found());
    };

    let affected = state
        .store
        .delete_report(id_report, id_usuario)
        .await
        .map_err(|e| ApiError::database("Falha ao deletar report", e))?;

    if affected == 0 {
        return Err(not_found());
    }

    info!("Deleted report {}", id_report);
    Ok(Json(json!({ "mensagem": "Report deletado com sucesso" })))
}
