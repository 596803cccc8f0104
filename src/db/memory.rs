//! In-memory store for handler tests.

use super::store::{ReportStore, StoreError};
use crate::models::report::{NewReport, ReportSummary};
use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct StoredReport {
    pub id_report: i64,
    pub report: NewReport,
    pub data_report: NaiveDateTime,
}

#[derive(Default)]
struct Inner {
    users: HashSet<i64>,
    reports: Vec<StoredReport>,
    stations: HashMap<String, Vec<Value>>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn with_users(users: impl IntoIterator<Item = i64>) -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().users.extend(users);
        store
    }

    pub fn add_station_row(&self, estacao: &str, row: Value) {
        self.inner
            .lock()
            .unwrap()
            .stations
            .entry(estacao.to_string())
            .or_default()
            .push(row);
    }

    pub fn report(&self, id_report: i64) -> Option<StoredReport> {
        self.inner
            .lock()
            .unwrap()
            .reports
            .iter()
            .find(|r| r.id_report == id_report)
            .cloned()
    }

    pub fn report_count(&self) -> usize {
        self.inner.lock().unwrap().reports.len()
    }
}

#[async_trait::async_trait]
impl ReportStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn station_rows(&self, estacao: &str) -> Result<Vec<Value>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.stations.get(estacao).cloned().unwrap_or_default())
    }

    async fn user_exists(&self, id_usuario: i64) -> Result<bool, StoreError> {
        Ok(self.inner.lock().unwrap().users.contains(&id_usuario))
    }

    async fn insert_report(&self, report: &NewReport) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.last_id += 1;
        let id_report = inner.last_id;
        // Spread timestamps so listing order is deterministic.
        let data_report = Utc::now().naive_utc() + Duration::seconds(id_report);
        inner.reports.push(StoredReport {
            id_report,
            report: report.clone(),
            data_report,
        });
        Ok(id_report)
    }

    async fn reports_for_user(&self, id_usuario: i64) -> Result<Vec<ReportSummary>, StoreError> {
        let inner = self.inner.lock().unwrap();
        if !inner.users.contains(&id_usuario) {
            return Ok(Vec::new());
        }

        let mut reports: Vec<ReportSummary> = inner
            .reports
            .iter()
            .filter(|r| r.report.id_usuario == Some(id_usuario))
            .map(|r| ReportSummary {
                id_report: r.id_report,
                tipo_alerta: r.report.tipo_alerta.clone(),
                descricao_alerta: r.report.descricao_alerta.clone(),
                data_report: r.data_report,
                estacao: r.report.estacao.clone(),
            })
            .collect();
        reports.sort_by(|a, b| {
            b.data_report
                .cmp(&a.data_report)
                .then(b.id_report.cmp(&a.id_report))
        });
        Ok(reports)
    }

    async fn update_description(
        &self,
        id_report: i64,
        id_usuario: i64,
        descricao: &str,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let mut affected = 0;
        for stored in inner
            .reports
            .iter_mut()
            .filter(|r| r.id_report == id_report && r.report.id_usuario == Some(id_usuario))
        {
            stored.report.descricao_alerta = descricao.to_string();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete_report(&self, id_report: i64, id_usuario: i64) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.reports.len();
        inner
            .reports
            .retain(|r| !(r.id_report == id_report && r.report.id_usuario == Some(id_usuario)));
        Ok((before - inner.reports.len()) as u64)
    }
}

/// Store whose every call fails the way an unreachable database does.
pub struct FailingStore;

impl FailingStore {
    fn error() -> StoreError {
        StoreError::Database(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait::async_trait]
impl ReportStore for FailingStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(Self::error())
    }

    async fn station_rows(&self, _estacao: &str) -> Result<Vec<Value>, StoreError> {
        Err(Self::error())
    }

    async fn user_exists(&self, _id_usuario: i64) -> Result<bool, StoreError> {
        Err(Self::error())
    }

    async fn insert_report(&self, _report: &NewReport) -> Result<i64, StoreError> {
        Err(Self::error())
    }

    async fn reports_for_user(&self, _id_usuario: i64) -> Result<Vec<ReportSummary>, StoreError> {
        Err(Self::error())
    }

    async fn update_description(
        &self,
        _id_report: i64,
        _id_usuario: i64,
        _descricao: &str,
    ) -> Result<u64, StoreError> {
        Err(Self::error())
    }

    async fn delete_report(&self, _id_report: i64, _id_usuario: i64) -> Result<u64, StoreError> {
        Err(Self::error())
    }
}
