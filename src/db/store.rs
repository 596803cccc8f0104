use crate::models::report::{NewReport, ReportSummary};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Data access used by the HTTP handlers. Each call runs on its own
/// connection; writes run in their own transaction and roll back on failure.
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All telemetry rows for a station, one JSON object per row.
    async fn station_rows(&self, estacao: &str) -> Result<Vec<Value>, StoreError>;

    async fn user_exists(&self, id_usuario: i64) -> Result<bool, StoreError>;

    /// Inserts the report and returns its database-generated id.
    async fn insert_report(&self, report: &NewReport) -> Result<i64, StoreError>;

    /// Reports owned by `id_usuario`, newest first.
    async fn reports_for_user(&self, id_usuario: i64) -> Result<Vec<ReportSummary>, StoreError>;

    /// Returns the number of rows changed (0 when missing or not owned).
    async fn update_description(
        &self,
        id_report: i64,
        id_usuario: i64,
        descricao: &str,
    ) -> Result<u64, StoreError>;

    /// Returns the number of rows removed (0 when missing or not owned).
    async fn delete_report(&self, id_report: i64, id_usuario: i64) -> Result<u64, StoreError>;
}
