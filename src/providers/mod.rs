//! External service providers.
//!
//! The Groq client handles transcription and chat completions, the
//! Notion client handles workspace page creation. Services depend on
//! the traits here rather than the concrete clients.

pub mod groq;
pub mod notion;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use groq::GroqClient;
pub use notion::NotionClient;

/// Speech-to-text and chat completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Transcribe an uploaded audio file to plain text.
    async fn transcribe(&self, model: &str, filename: &str, audio: Vec<u8>) -> Result<String>;

    /// Run a chat completion with a system prompt and a single user
    /// message, returning the assistant reply.
    async fn complete(
        &self,
        model: &str,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String>;
}

/// A page to create in the workspace, addressed by its parent database.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub database_id: String,
    pub title: String,
    pub children: Vec<Value>,
}

/// Document workspace backend that receives exported minutes.
#[async_trait]
pub trait WorkspaceProvider: Send + Sync {
    async fn create_page(&self, page: PageRequest) -> Result<()>;
}
