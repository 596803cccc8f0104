use super::queries;
use super::store::{ReportStore, StoreError};
use super::DbPool;
use crate::models::report::{NewReport, ReportSummary};
use futures::TryStreamExt;
use serde_json::Value;
use sqlx::types::Json;
use tracing::debug;

/// Postgres-backed store. The pool hands every request its own connection.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ReportStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query(queries::PING).execute(&self.pool).await?;
        Ok(())
    }

    async fn station_rows(&self, estacao: &str) -> Result<Vec<Value>, StoreError> {
        let mut stream = sqlx::query_scalar::<_, Json<Value>>(queries::SELECT_STATION_ROWS)
            .bind(estacao)
            .fetch(&self.pool);

        let mut rows = Vec::new();
        while let Some(Json(row)) = stream.try_next().await? {
            rows.push(row);
        }

        debug!("Fetched {} rows for station {}", rows.len(), estacao);
        Ok(rows)
    }

    async fn user_exists(&self, id_usuario: i64) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(queries::SELECT_USER_EXISTS)
            .bind(id_usuario)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_report(&self, report: &NewReport) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let id_report = sqlx::query_scalar::<_, i64>(queries::INSERT_REPORT)
            .bind(report.id_usuario)
            .bind(&report.tipo_alerta)
            .bind(&report.descricao_alerta)
            .bind(report.nome_anonimo.as_deref())
            .bind(report.email_anonimo.as_deref())
            .bind(&report.estacao)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(id_report)
    }

    async fn reports_for_user(&self, id_usuario: i64) -> Result<Vec<ReportSummary>, StoreError> {
        let reports = sqlx::query_as::<_, ReportSummary>(queries::SELECT_REPORTS_FOR_USER)
            .bind(id_usuario)
            .fetch_all(&self.pool)
            .await?;
        Ok(reports)
    }

    async fn update_description(
        &self,
        id_report: i64,
        id_usuario: i64,
        descricao: &str,
    ) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(queries::UPDATE_REPORT_DESCRIPTION)
            .bind(descricao)
            .bind(id_report)
            .bind(id_usuario)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if affected == 0 {
            tx.rollback().await?;
        } else {
            tx.commit().await?;
        }
        Ok(affected)
    }

    async fn delete_report(&self, id_report: i64, id_usuario: i64) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(queries::DELETE_REPORT)
            .bind(id_report)
            .bind(id_usuario)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if affected == 0 {
            tx.rollback().await?;
        } else {
            tx.commit().await?;
        }
        Ok(affected)
    }
}
