//! Google Calendar endpoints.
//!
//! The calendar integration is switched off. The routes stay mounted
//! and answer with a fixed notice, and the OAuth callback sends the
//! browser back to the frontend.

use axum::{
    response::{Json, Redirect},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

const CALENDAR_DISABLED_NOTICE: &str = "Google Calendar integration is temporarily disabled.";
const FRONTEND_URL: &str = "http://localhost:3000/";

pub fn router() -> Router {
    Router::new()
        .route("/login/google", get(login_google))
        .route("/oauth2callback", get(oauth2_callback))
        .route("/export-to-calendar", post(export_to_calendar))
}

async fn login_google() -> Json<Value> {
    Json(json!({ "message": CALENDAR_DISABLED_NOTICE }))
}

async fn oauth2_callback() -> Redirect {
    Redirect::temporary(FRONTEND_URL)
}

async fn export_to_calendar() -> Json<Value> {
    Json(json!({ "message": CALENDAR_DISABLED_NOTICE }))
}
