//! API route definitions
//!
//! - /api/v1/{drilling,core-samples,progress,maintenance} - list / append
//! - /api/v1/reports/* - joined report table and field list
//! - /api/v1/charts/* - chart distributions and series
//! - /api/v1/dashboard/summary - KPI cards
//! - /api/v1/export - xlsx download
//! - /api/v1/preferences - persisted UI preferences

use axum::routing::get;
use axum::Router;

use super::handlers::{self, DashboardState};
use crate::types::{CoreSample, DrillingRecord, MaintenanceLog, ProgressReport};

/// Create all v1 API routes
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        // Record collections
        .route(
            "/drilling",
            get(handlers::list_records::<DrillingRecord>)
                .post(handlers::append_record::<DrillingRecord>),
        )
        .route(
            "/core-samples",
            get(handlers::list_records::<CoreSample>).post(handlers::append_record::<CoreSample>),
        )
        .route(
            "/progress",
            get(handlers::list_records::<ProgressReport>)
                .post(handlers::append_record::<ProgressReport>),
        )
        .route(
            "/maintenance",
            get(handlers::list_records::<MaintenanceLog>)
                .post(handlers::append_record::<MaintenanceLog>),
        )
        // Reports
        .route("/reports/joined", get(handlers::joined_report))
        .route("/reports/fields", get(handlers::report_fields))
        // Charts
        .route("/charts/maintenance-status", get(handlers::maintenance_status_chart))
        .route("/charts/rock-types", get(handlers::rock_type_chart))
        .route("/charts/monthly-progress", get(handlers::monthly_progress_chart))
        // Dashboard
        .route("/dashboard/summary", get(handlers::dashboard_summary))
        // Export
        .route("/export", get(handlers::export_report))
        // Preferences
        .route(
            "/preferences",
            get(handlers::get_preferences).post(handlers::update_preferences),
        )
        .with_state(state)
}

/// Health endpoint at root level
pub fn health_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
}
