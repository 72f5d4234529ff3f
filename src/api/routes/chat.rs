//! Transcript Q&A endpoint.
//!
//! Answers a question against a previously returned transcript
//! (POST /chat).

use axum::{extract::State, response::Json, routing::post, Router};
use serde_json::{json, Value};
use tracing::error;

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::minutes::ChatQuery;

const CHAT_FAILURE_DETAIL: &str = "Failed to get an answer from the AI.";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat_with_transcript))
        .with_state(state)
}

async fn chat_with_transcript(
    State(state): State<AppState>,
    Json(query): Json<ChatQuery>,
) -> ApiResult<Json<Value>> {
    match state
        .minutes
        .answer_question(&query.question, &query.transcript)
        .await
    {
        Ok(answer) => Ok(Json(json!({ "answer": answer }))),
        Err(e) => {
            error!("Transcript chat failed: {}", e);
            Err(ApiError::internal(CHAT_FAILURE_DETAIL))
        }
    }
}
