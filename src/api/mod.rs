//! REST API server for the Momentum backend.
//!
//! Provides HTTP endpoints for:
//! - Meeting processing (upload, transcribe, extract minutes)
//! - Notion export of reviewed minutes
//! - Transcript Q&A
//! - Disabled Google Calendar integration
//! - Health check for the hosting service

pub mod error;
pub mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::http::{request::Parts, HeaderValue};
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::export::ExportService;
use crate::minutes::MinutesService;
use crate::providers::CompletionProvider;

/// Handles shared by all routes.
#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<dyn CompletionProvider>,
    pub minutes: Arc<MinutesService>,
    pub export: Arc<ExportService>,
    pub transcription_model: String,
}

pub struct ApiServer {
    interface: String,
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(state: AppState, config: &Config) -> Self {
        Self {
            interface: config.interface.clone(),
            port: config.port,
            state,
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = build_router(self.state);

        let listener =
            tokio::net::TcpListener::bind(&format!("{}:{}", self.interface, self.port)).await?;

        info!(
            "API server listening on http://{}:{}",
            self.interface, self.port
        );
        info!("Endpoints:");
        info!("  GET  /                   - Health check");
        info!("  POST /process-meeting    - Transcribe a recording and extract minutes");
        info!("  POST /export-to-notion   - Export reviewed minutes to Notion");
        info!("  POST /chat               - Answer a question about a transcript");
        info!("  GET  /login/google       - Calendar integration (disabled)");
        info!("  GET  /oauth2callback     - Calendar OAuth callback");
        info!("  POST /export-to-calendar - Calendar export (disabled)");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .merge(routes::meeting::router(state.clone()))
        .merge(routes::export::router(state.clone()))
        .merge(routes::chat::router(state))
        .merge(routes::calendar::router())
        .layer(ServiceBuilder::new().layer(cors_layer()))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Momentum AI Backend is running."
    }))
}

/// Origins are checked against the frontend allow list. Methods and
/// headers mirror the preflight request, credentials are allowed.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _request_parts: &Parts| origin_allowed(origin),
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// The local dev frontend, the deployed frontend and its Vercel preview
/// deployments.
fn origin_allowed(origin: &HeaderValue) -> bool {
    let origin = match origin.to_str() {
        Ok(origin) => origin,
        Err(_) => return false,
    };

    origin == "http://localhost:3000"
        || origin == "https://momentum-ai-tutorial.vercel.app"
        || (origin.starts_with("https://") && origin.ends_with("--agaazs-projects.vercel.app"))
}
