//! List / append endpoints for the record collections
//!
//! One generic pair serves all four kinds; the route table picks the type.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::DashboardState;
use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::store::StoredRecord;
use crate::submission::{self, Validate};

/// GET /api/v1/{kind} - all records of one kind, oldest first
pub async fn list_records<R>(State(state): State<DashboardState>) -> Response
where
    R: StoredRecord + Serialize,
{
    let store = state.store.read().await;
    ApiResponse::ok(store.list::<R>())
}

/// POST /api/v1/{kind} - validate and append one record
///
/// Invalid submissions get 400 with every violated rule; the store is only
/// touched once the record passes.
pub async fn append_record<R>(
    State(state): State<DashboardState>,
    payload: Result<Json<R>, JsonRejection>,
) -> Response
where
    R: StoredRecord + Validate + DeserializeOwned + Serialize,
{
    let Json(record) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            debug!(kind = %R::KIND, error = %rejection.body_text(), "Rejected malformed submission");
            return ApiErrorResponse::bad_request(rejection.body_text());
        }
    };

    let record = match submission::accept(record) {
        Ok(record) => record,
        Err(e) => {
            info!(kind = %R::KIND, error = %e, "Submission failed validation");
            return ApiErrorResponse::validation(e.messages().to_vec());
        }
    };

    let mut store = state.store.write().await;
    store.append(record.clone());
    ApiResponse::created(record)
}
