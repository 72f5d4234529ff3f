//! Meeting processing endpoint.
//!
//! Accepts an uploaded recording, transcribes it and returns structured
//! minutes together with the transcript (POST /process-meeting).

use anyhow::{bail, Context, Result};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::post,
    Router,
};
use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::minutes::ProcessedMeeting;

const PROCESSING_FAILURE_DETAIL: &str = "An internal error occurred during processing.";

pub fn router(state: AppState) -> Router {
    // Recordings are far larger than the default request body cap
    Router::new()
        .route("/process-meeting", post(process_meeting))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

async fn process_meeting(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<ProcessedMeeting>> {
    match run_pipeline(&state, multipart).await {
        Ok(processed) => Ok(Json(processed)),
        Err(e) => {
            error!("Meeting processing failed: {:#}", e);
            Err(ApiError::internal(PROCESSING_FAILURE_DETAIL))
        }
    }
}

async fn run_pipeline(state: &AppState, mut multipart: Multipart) -> Result<ProcessedMeeting> {
    let (filename, audio) = read_audio_upload(&mut multipart).await?;

    info!(
        "Received meeting recording {} ({} bytes)",
        filename,
        audio.len()
    );

    let transcript = state
        .completion
        .transcribe(&state.transcription_model, &filename, audio)
        .await?;

    let processed = state.minutes.extract_minutes(&transcript).await?;
    Ok(processed)
}

/// Pull the uploaded `file` part out of the form.
async fn read_audio_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .context("Failed to read multipart field")?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("recording").to_string();
            let audio = field
                .bytes()
                .await
                .context("Failed to read uploaded file")?;
            return Ok((filename, audio.to_vec()));
        }
    }

    bail!("upload did not contain a file part");
}
