use crate::db::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure a handler can return. The body is always `{"erro": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Acesso não autorizado")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    /// Driver detail is logged, never sent to the caller.
    #[error("{context}")]
    Database {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn database(context: &'static str, source: StoreError) -> Self {
        ApiError::Database { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database { context, source } = &self {
            error!("{}: {}", context, source);
        }

        (self.status(), Json(json!({ "erro": self.to_string() }))).into_response()
    }
}
