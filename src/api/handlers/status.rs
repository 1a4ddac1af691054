//! Liveness endpoint

use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;

use super::DashboardState;
use crate::api::envelope::ApiResponse;
use crate::types::RecordCounts;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub site: String,
    pub version: &'static str,
    pub uptime_secs: i64,
    pub record_counts: RecordCounts,
    /// False when preferences are served from defaults only
    pub preferences_persisted: bool,
}

/// GET /health
pub async fn health(State(state): State<DashboardState>) -> Response {
    let record_counts = state.store.read().await.counts();
    ApiResponse::ok(HealthResponse {
        status: "ok",
        site: crate::config::get().site.name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        record_counts,
        preferences_persisted: state.preferences.is_some(),
    })
}
