//! Spreadsheet export endpoint

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use super::DashboardState;
use crate::api::envelope::ApiErrorResponse;
use crate::export::{self, DateRange, ExportError};
use crate::reports;
use crate::types::{parse_flexible_date, ReportField};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Query parameters for the export download
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    /// Range start, `YYYY-MM-DD` or RFC 3339
    #[serde(default)]
    pub from: Option<String>,
    /// Range end, inclusive
    #[serde(default)]
    pub to: Option<String>,
    /// Comma-separated field keys or labels, in output order
    #[serde(default)]
    pub fields: Option<String>,
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_flexible_date(s)
            .map(Some)
            .ok_or_else(|| format!("{name}: invalid date '{s}'")),
    }
}

/// Resolve the requested range, defaulting to the configured window ending today.
fn resolve_range(query: &ExportQuery, today: NaiveDate) -> Result<DateRange, String> {
    let window = DateRange::last_days(today, crate::config::get().export.default_window_days);
    let start = parse_bound("from", query.from.as_deref())?.unwrap_or(window.start);
    let end = parse_bound("to", query.to.as_deref())?.unwrap_or(window.end);
    DateRange::new(start, end).map_err(|e| e.to_string())
}

/// GET /api/v1/export - download the joined report as xlsx
pub async fn export_report(
    State(state): State<DashboardState>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let range = match resolve_range(&query, Utc::now().date_naive()) {
        Ok(range) => range,
        Err(msg) => return ApiErrorResponse::bad_request(msg),
    };
    let fields = match query.fields.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(list) => match ReportField::parse_list(list) {
            Ok(fields) => fields,
            Err(e) => return ApiErrorResponse::bad_request(e),
        },
        None => ReportField::TABLE_COLUMNS.to_vec(),
    };

    let rows = {
        let store = state.store.read().await;
        reports::joined_rows(&store)
    };

    let settings = &crate::config::get().export;
    match export::build_export(&rows, range, &fields, &settings.sheet_name) {
        Ok(bytes) => {
            let filename = export::export_filename(&settings.file_prefix, Utc::now());
            info!(filename = %filename, bytes = bytes.len(), "Export ready");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(ExportError::NoFields) => ApiErrorResponse::bad_request("no fields selected for export"),
        Err(e @ ExportError::TooManyColumns { .. }) => ApiErrorResponse::bad_request(e.to_string()),
        Err(e) => {
            warn!(error = %e, "Export failed");
            ApiErrorResponse::internal(format!("Export failed: {e}"))
        }
    }
}
