//! Notion export endpoint.
//!
//! Receives user-edited minutes and creates a workspace page from them
//! (POST /export-to-notion).

use axum::{extract::State, response::Json, routing::post, Router};
use serde_json::{json, Value};
use tracing::error;

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::minutes::MeetingMinutes;

const EXPORT_FAILURE_DETAIL: &str = "Failed to export to Notion.";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/export-to-notion", post(export_to_notion))
        .with_state(state)
}

async fn export_to_notion(
    State(state): State<AppState>,
    Json(minutes): Json<MeetingMinutes>,
) -> ApiResult<Json<Value>> {
    match state.export.export_minutes(&minutes).await {
        Ok(()) => Ok(Json(json!({
            "status": "success",
            "message": "Successfully exported to Notion!"
        }))),
        Err(e) => {
            error!("Notion export failed: {}", e);
            Err(ApiError::internal(EXPORT_FAILURE_DETAIL))
        }
    }
}
