//! Meeting minutes domain.
//!
//! Defines the structured records extracted from a meeting transcript
//! and the errors the extraction pipeline can produce.

pub mod prompts;
pub mod repair;
pub mod service;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use repair::ResponseRepairer;
pub use service::MinutesService;

/// A task captured from the meeting, with the people responsible for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: u32,
    pub task: String,
    pub owner: Vec<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

/// One major topic of the meeting and what was said about it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionPoint {
    pub id: u32,
    pub topic: String,
    pub summary: String,
}

/// Structured minutes as reviewed by the user and accepted for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingMinutes {
    pub overall_sentiment: String,
    pub topics: Vec<String>,
    pub discussion_points: Vec<DiscussionPoint>,
    pub action_items: Vec<ActionItem>,
}

/// Minutes together with the transcript they were extracted from.
/// This is the response shape of the meeting processing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedMeeting {
    pub overall_sentiment: String,
    pub topics: Vec<String>,
    pub discussion_points: Vec<DiscussionPoint>,
    pub action_items: Vec<ActionItem>,
    pub transcript: String,
}

/// Request body for the transcript Q&A endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatQuery {
    pub question: String,
    pub transcript: String,
}

/// Errors from the minutes pipeline.
#[derive(Debug, Error)]
pub enum MinutesError {
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
    #[error("Minutes extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("Transcript answer failed: {0}")]
    AnswerFailed(String),
    #[error("Workspace export failed: {0}")]
    ExportFailed(String),
    #[error("No workspace database configured for export")]
    WorkspaceNotConfigured,
}
