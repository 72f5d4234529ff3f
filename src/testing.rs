//! In-process fakes for the provider traits, shared across test modules.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::providers::{CompletionProvider, PageRequest, WorkspaceProvider};

/// One recorded chat completion call.
pub struct CompletionCall {
    pub model: String,
    pub system_prompt: String,
    pub user_message: String,
}

/// Completion provider that returns canned replies and records calls.
pub struct FakeCompletion {
    pub transcript: String,
    pub reply: String,
    pub fail: bool,
    pub calls: Mutex<Vec<CompletionCall>>,
    pub transcribed: Mutex<Vec<(String, String)>>,
}

impl FakeCompletion {
    pub fn with_reply(reply: &str) -> Self {
        Self {
            transcript: "the transcript".to_string(),
            reply: reply.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
            transcribed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_transcript_and_reply(transcript: &str, reply: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            ..Self::with_reply(reply)
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_reply("")
        }
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletion {
    async fn transcribe(&self, model: &str, filename: &str, _audio: Vec<u8>) -> Result<String> {
        if self.fail {
            anyhow::bail!("transcription backend unavailable");
        }
        self.transcribed
            .lock()
            .unwrap()
            .push((model.to_string(), filename.to_string()));
        Ok(self.transcript.clone())
    }

    async fn complete(
        &self,
        model: &str,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String> {
        if self.fail {
            anyhow::bail!("completion backend unavailable");
        }
        self.calls.lock().unwrap().push(CompletionCall {
            model: model.to_string(),
            system_prompt: system_prompt.to_string(),
            user_message: user_message.to_string(),
        });
        Ok(self.reply.clone())
    }
}

/// Workspace provider that records created pages.
#[derive(Default)]
pub struct FakeWorkspace {
    pub fail: bool,
    pub pages: Mutex<Vec<PageRequest>>,
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl WorkspaceProvider for FakeWorkspace {
    async fn create_page(&self, page: PageRequest) -> Result<()> {
        if self.fail {
            anyhow::bail!("workspace unavailable");
        }
        self.pages.lock().unwrap().push(page);
        Ok(())
    }
}
