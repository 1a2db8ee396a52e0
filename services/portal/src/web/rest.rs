//! services/portal/src/web/rest.rs
//!
//! The JSON endpoints test harnesses use to control the mock, plus the master
//! definition for their OpenAPI specification.

use crate::web::state::AppState;
use attendance_core::DayView;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        reset_handler,
        sessions_handler,
    ),
    components(
        schemas(ResetResponse)
    ),
    tags(
        (name = "Mock Portal Control", description = "Endpoints for driving the mock attendance portal from tests.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// The response payload sent after the dataset has been reloaded.
#[derive(Serialize, ToSchema)]
pub struct ResetResponse {
    status: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Reset every session to the state defined in the dataset file.
///
/// The file is re-read, so edits made since startup take effect. If it cannot
/// be loaded the current sessions are left untouched.
#[utoipa::path(
    post,
    path = "/mock/reset",
    responses(
        (status = 200, description = "Dataset reloaded", body = ResetResponse),
        (status = 500, description = "The dataset could not be loaded")
    )
)]
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResetResponse>, (StatusCode, String)> {
    match state.store.reload(state.dataset.as_ref()).await {
        Ok(()) => {
            info!("Mock portal reset");
            Ok(Json(ResetResponse {
                status: "ok".to_string(),
            }))
        }
        Err(e) => {
            error!("Failed to reload dataset: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// List every session grouped by day, in display order. Codes are never included.
#[utoipa::path(
    get,
    path = "/mock/sessions",
    responses(
        (status = 200, description = "Days with their sessions")
    )
)]
pub async fn sessions_handler(State(state): State<Arc<AppState>>) -> Json<Vec<DayView>> {
    Json(state.store.list_by_day().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_doc_describes_both_control_endpoints() {
        let json = ApiDoc::openapi().to_json().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(doc["paths"]["/mock/reset"]["post"].is_object());
        assert!(doc["paths"]["/mock/sessions"]["get"].is_object());
        assert!(doc["components"]["schemas"]["ResetResponse"].is_object());
    }
}
