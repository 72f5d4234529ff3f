use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::api::{ApiServer, AppState};
use crate::config::Config;
use crate::export::ExportService;
use crate::minutes::MinutesService;
use crate::providers::{CompletionProvider, GroqClient, NotionClient, WorkspaceProvider};

pub async fn run_service(config: Config) -> Result<()> {
    info!("Starting Momentum backend");

    let completion: Arc<dyn CompletionProvider> =
        Arc::new(GroqClient::new(config.groq_api_key.clone(), None)?);
    let workspace: Arc<dyn WorkspaceProvider> =
        Arc::new(NotionClient::new(config.notion_api_key.clone(), None)?);

    if config.notion_database_id.is_none() {
        warn!("NOTION_DATABASE_ID is not set, Notion export will fail until it is configured");
    }

    let minutes = Arc::new(MinutesService::new(
        completion.clone(),
        config.summary_model.clone(),
        config.chat_model.clone(),
    )?);
    let export = Arc::new(ExportService::new(
        workspace,
        config.notion_database_id.clone(),
    ));

    let state = AppState {
        completion,
        minutes,
        export,
        transcription_model: config.transcription_model.clone(),
    };

    ApiServer::new(state, &config).start().await
}
