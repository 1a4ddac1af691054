//! Derived views: joined report table, chart data, dashboard summary

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use super::DashboardState;
use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::reports;
use crate::types::{FieldDescriptor, ReportField};

// ============================================================================
// Report Table
// ============================================================================

/// Query parameters for the joined report table
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Case-insensitive search across all rendered fields
    #[serde(default)]
    pub q: Option<String>,
    /// Field key or label to sort by
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub desc: bool,
}

/// GET /api/v1/reports/joined
pub async fn joined_report(
    State(state): State<DashboardState>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let sort_field = match query.sort.as_deref().map(str::parse::<ReportField>) {
        Some(Err(e)) => return ApiErrorResponse::bad_request(e),
        Some(Ok(field)) => Some(field),
        None => None,
    };

    let rows = {
        let store = state.store.read().await;
        reports::joined_rows(&store)
    };

    let mut rows = match query.q.as_deref() {
        Some(q) => reports::filter_rows(rows, q),
        None => rows,
    };
    if let Some(field) = sort_field {
        reports::sort_rows(&mut rows, field, query.desc);
    }
    ApiResponse::ok(rows)
}

/// GET /api/v1/reports/fields - every exportable field, table columns first
pub async fn report_fields() -> Response {
    let mut fields: Vec<ReportField> = ReportField::TABLE_COLUMNS.to_vec();
    fields.extend(
        ReportField::ALL
            .iter()
            .copied()
            .filter(|f| !ReportField::TABLE_COLUMNS.contains(f)),
    );
    let descriptors: Vec<FieldDescriptor> = fields.into_iter().map(FieldDescriptor::from).collect();
    ApiResponse::ok(descriptors)
}

// ============================================================================
// Charts
// ============================================================================

/// GET /api/v1/charts/maintenance-status
pub async fn maintenance_status_chart(State(state): State<DashboardState>) -> Response {
    let store = state.store.read().await;
    ApiResponse::ok(reports::maintenance_status_distribution(store.maintenance_logs()))
}

/// GET /api/v1/charts/rock-types
pub async fn rock_type_chart(State(state): State<DashboardState>) -> Response {
    let store = state.store.read().await;
    ApiResponse::ok(reports::rock_type_distribution(store.core_samples()))
}

/// GET /api/v1/charts/monthly-progress
pub async fn monthly_progress_chart(State(state): State<DashboardState>) -> Response {
    let store = state.store.read().await;
    ApiResponse::ok(reports::monthly_progress(store.progress_reports()))
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/v1/dashboard/summary
pub async fn dashboard_summary(State(state): State<DashboardState>) -> Response {
    let store = state.store.read().await;
    ApiResponse::ok(reports::dashboard_summary(&store))
}
