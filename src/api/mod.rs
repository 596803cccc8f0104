//! HTTP surface.
//!
//! Thin axum handlers over the shared [`ReportStore`] and delay model.

mod error;
mod health;
mod predict;
mod reports;
mod stations;


pub use error::ApiError;

use crate::db::ReportStore;
use crate::predictor::SharedModel;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info_span, warn};
use uuid::Uuid;

/// Process-wide dependencies, built once at startup.
pub struct AppState {
    pub store: Arc<dyn ReportStore>,
    pub model: SharedModel,
    pub version: String,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn ReportStore>, model: SharedModel) -> Self {
        Self {
            store,
            model,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }
}

pub type SharedState = Arc<AppState>;

pub fn create_router(state: SharedState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health))
        .route("/dados_estacao", get(stations::station_data))
        .route("/prever", post(predict::predict))
        .route(
            "/reports",
            post(reports::create_report).get(reports::list_reports),
        )
        .route(
            "/reports/:id_report",
            put(reports::update_report).delete(reports::delete_report),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %Uuid::new_v4(),
            )
        }))
        .with_state(state)
}

/// `*` (or nothing) allows any origin; otherwise an explicit allow-list.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
