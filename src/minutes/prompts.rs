//! Prompt templates for the extraction and Q&A models.

use chrono::NaiveDate;

/// System prompt for the transcript Q&A assistant.
pub const TRANSCRIPT_ASSISTANT_PROMPT: &str =
    "You are a helpful AI assistant. Your task is to answer a user's question based ONLY on the \
     provided meeting transcript.\nBe concise. If the answer is not in the transcript, say \"The \
     answer is not found in the transcript.\"";

/// System prompt for minutes extraction, with the current date filled in
/// so the model can resolve relative deadlines.
pub fn secretary_prompt(today: NaiveDate) -> String {
    format!(
        "You are a meticulous meeting secretary AI. Your task is to analyze a meeting transcript \
         and produce a comprehensive and detailed set of minutes in a structured JSON format. Do \
         not summarize too aggressively; capture all significant points.\n\
         The current date is {}.\n\
         **CRITICAL INSTRUCTIONS:** Your entire response MUST be a single, valid JSON object \
         following the schema provided.\n\
         1. **overall_sentiment**: A single word describing the mood of the meeting.\n\
         2. **topics**: A list of 2-5 short string keywords or tags.\n\
         3. **discussion_points**: A detailed list of objects for each major topic, including a \
         'topic' and a 'summary'.\n\
         4. **action_items**: A comprehensive list of all explicit and implied tasks, including \
         an 'id', 'task', 'owner' (as a list), and 'deadline'.",
        today.format("%Y-%m-%d")
    )
}

/// User message for the Q&A assistant: the transcript as context, then
/// the actual question.
pub fn transcript_question(transcript: &str, question: &str) -> String {
    format!("Context:\n{}\n\nUser Question: {}", transcript, question)
}
