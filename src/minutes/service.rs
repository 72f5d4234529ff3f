use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::providers::CompletionProvider;

use super::{prompts, MinutesError, ProcessedMeeting, ResponseRepairer};

/// Turns transcripts into structured minutes and answers questions
/// about them.
pub struct MinutesService {
    completion: Arc<dyn CompletionProvider>,
    repairer: ResponseRepairer,
    summary_model: String,
    chat_model: String,
}

impl MinutesService {
    pub fn new(
        completion: Arc<dyn CompletionProvider>,
        summary_model: String,
        chat_model: String,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            completion,
            repairer: ResponseRepairer::new()?,
            summary_model,
            chat_model,
        })
    }

    /// Extract structured minutes from a transcript. The transcript is
    /// carried along in the result so the client can keep both together.
    pub async fn extract_minutes(
        &self,
        transcript: &str,
    ) -> Result<ProcessedMeeting, MinutesError> {
        info!(
            "Extracting minutes from transcript ({} chars)",
            transcript.len()
        );

        let system_prompt = prompts::secretary_prompt(Utc::now().date_naive());
        let raw = self
            .completion
            .complete(&self.summary_model, &system_prompt, transcript)
            .await
            .map_err(|e| MinutesError::ExtractionFailed(format!("{:#}", e)))?;

        debug!("Raw extraction reply: {} chars", raw.len());

        let value = self
            .repairer
            .repair(&raw)
            .map_err(|e| MinutesError::ExtractionFailed(e.to_string()))?;

        let mut minutes = match value {
            Value::Object(map) => map,
            _ => {
                return Err(MinutesError::ExtractionFailed(
                    "model reply was not a JSON object".to_string(),
                ))
            }
        };
        minutes.insert("transcript".to_string(), Value::from(transcript));

        serde_json::from_value(Value::Object(minutes)).map_err(|e| {
            MinutesError::ExtractionFailed(format!("reply did not match the minutes schema: {}", e))
        })
    }

    /// Answer a question using only the provided transcript as context.
    pub async fn answer_question(
        &self,
        question: &str,
        transcript: &str,
    ) -> Result<String, MinutesError> {
        info!("Answering transcript question ({} chars)", question.len());

        let user_message = prompts::transcript_question(transcript, question);
        self.completion
            .complete(
                &self.chat_model,
                prompts::TRANSCRIPT_ASSISTANT_PROMPT,
                &user_message,
            )
            .await
            .map_err(|e| MinutesError::AnswerFailed(format!("{:#}", e)))
    }
}
