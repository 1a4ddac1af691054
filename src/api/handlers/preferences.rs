//! UI preference endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use tracing::warn;

use super::DashboardState;
use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::types::{Preferences, PreferencesUpdate};

/// GET /api/v1/preferences
///
/// Defaults are served when no preference database is available.
pub async fn get_preferences(State(state): State<DashboardState>) -> Response {
    let Some(store) = state.preferences.as_ref() else {
        return ApiResponse::ok(Preferences::default());
    };
    match store.load() {
        Ok(prefs) => ApiResponse::ok(prefs),
        Err(e) => {
            warn!(error = %e, "Failed to load preferences");
            ApiErrorResponse::internal(format!("Preferences error: {e}"))
        }
    }
}

/// POST /api/v1/preferences - apply a partial update and persist it
pub async fn update_preferences(
    State(state): State<DashboardState>,
    payload: Result<Json<PreferencesUpdate>, JsonRejection>,
) -> Response {
    let Json(update) = match payload {
        Ok(body) => body,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };
    let Some(store) = state.preferences.as_ref() else {
        return ApiErrorResponse::service_unavailable("Preference storage not available");
    };
    match store.update(update) {
        Ok(prefs) => ApiResponse::ok(prefs),
        Err(e) => {
            warn!(error = %e, "Failed to save preferences");
            ApiErrorResponse::internal(format!("Preferences error: {e}"))
        }
    }
}
