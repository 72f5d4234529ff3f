use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::CompletionProvider;

const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";
const REQUEST_TIMEOUT_SECS: u64 = 120;

// Transient failures are retried with exponential backoff plus jitter
const MAX_RETRIES: u32 = 2;
const RETRY_BASE_DELAY_MS: u64 = 500;
const RETRY_JITTER_MS: u64 = 250;

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    r#type: Option<String>,
    code: Option<String>,
}

pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GroqClient {
    pub fn new(api_key: String, endpoint: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build Groq HTTP client")?;
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        info!("Initialized Groq provider with endpoint: {}", endpoint);

        Ok(Self {
            client,
            api_key,
            endpoint,
        })
    }

    /// Send a request, retrying server errors and connection failures.
    /// Client errors are returned to the caller on the first attempt.
    async fn send_with_retry<F>(&self, make_request: F, operation: &str) -> Result<reqwest::Response>
    where
        F: Fn() -> Result<reqwest::RequestBuilder>,
    {
        let mut attempt: u32 = 0;

        loop {
            match make_request()?.send().await {
                Ok(response) if response.status().is_server_error() && attempt < MAX_RETRIES => {
                    warn!("{} returned {}, retrying", operation, response.status());
                }
                Err(e) if (e.is_timeout() || e.is_connect()) && attempt < MAX_RETRIES => {
                    warn!("{} failed: {}, retrying", operation, e);
                }
                Ok(response) => return Ok(response),
                Err(e) => return Err(e).with_context(|| format!("{} request failed", operation)),
            }

            attempt += 1;
            let backoff = RETRY_BASE_DELAY_MS * 2u64.pow(attempt - 1);
            let jitter = rand::thread_rng().gen_range(0..=RETRY_JITTER_MS);
            tokio::time::sleep(Duration::from_millis(backoff + jitter)).await;
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    async fn transcribe(&self, model: &str, filename: &str, audio: Vec<u8>) -> Result<String> {
        info!(
            "Transcribing {} ({} bytes) with model {}",
            filename,
            audio.len(),
            model
        );

        let url = format!("{}/audio/transcriptions", self.endpoint);
        let mime_type = audio_mime_type(filename);

        let response = self
            .send_with_retry(
                || -> Result<reqwest::RequestBuilder> {
                    let part = Part::bytes(audio.clone())
                        .file_name(filename.to_string())
                        .mime_str(mime_type)?;
                    let form = Form::new()
                        .text("model", model.to_string())
                        .part("file", part);

                    Ok(self
                        .client
                        .post(&url)
                        .header("Authorization", format!("Bearer {}", self.api_key))
                        .multipart(form))
                },
                "Groq transcription",
            )
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read transcription response body")?;

        if !status.is_success() {
            error!(
                "Groq transcription failed with status {}: {}",
                status, body
            );
            return Err(api_error(status, &body, "Groq transcription"));
        }

        let transcription: TranscriptionResponse =
            serde_json::from_str(&body).context("Failed to parse transcription response")?;

        info!("Transcription complete: {} chars", transcription.text.len());
        debug!("Raw transcription: {}", transcription.text);

        Ok(transcription.text)
    }

    async fn complete(
        &self,
        model: &str,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String> {
        debug!("Requesting chat completion from model {}", model);

        let url = format!("{}/chat/completions", self.endpoint);
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
        };

        let response = self
            .send_with_retry(
                || -> Result<reqwest::RequestBuilder> {
                    Ok(self
                        .client
                        .post(&url)
                        .header("Authorization", format!("Bearer {}", self.api_key))
                        .json(&request))
                },
                "Groq chat completion",
            )
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read completion response body")?;

        if !status.is_success() {
            error!(
                "Groq chat completion failed with status {}: {}",
                status, body
            );
            return Err(api_error(status, &body, "Groq chat completion"));
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).context("Failed to parse completion response")?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Groq returned no completion choices"))?;

        Ok(choice.message.content)
    }
}

/// Build an error from a non-success response, preferring the structured
/// message the API returns over the raw body.
fn api_error(status: StatusCode, body: &str, operation: &str) -> anyhow::Error {
    if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(body) {
        return anyhow::anyhow!(
            "Groq API error: {} (type: {:?}, code: {:?})",
            error_response.error.message,
            error_response.error.r#type,
            error_response.error.code
        );
    }

    anyhow::anyhow!("{} failed with status {}: {}", operation, status, body)
}

/// Best-effort MIME type from the uploaded file name.
fn audio_mime_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("mp4") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}
