use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};

use super::{PageRequest, WorkspaceProvider};

const DEFAULT_ENDPOINT: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct NotionClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl NotionClient {
    pub fn new(api_key: String, endpoint: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build Notion HTTP client")?;
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        info!("Initialized Notion provider with endpoint: {}", endpoint);

        Ok(Self {
            client,
            api_key,
            endpoint,
        })
    }
}

#[async_trait]
impl WorkspaceProvider for NotionClient {
    async fn create_page(&self, page: PageRequest) -> Result<()> {
        info!(
            "Creating Notion page \"{}\" with {} blocks",
            page.title,
            page.children.len()
        );

        let url = format!("{}/pages", self.endpoint);
        let body = page_body(&page);

        // Page creation is never retried, a repeated request would
        // produce duplicate pages
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .context("Failed to send page creation request to Notion")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            error!("Notion page creation failed with status {}: {}", status, body);
            return Err(anyhow::anyhow!(
                "Notion page creation failed with status {}: {}",
                status,
                body
            ));
        }

        info!("Notion page created");
        Ok(())
    }
}

/// Request body for the Notion page creation endpoint.
fn page_body(page: &PageRequest) -> Value {
    json!({
        "parent": { "database_id": page.database_id },
        "properties": {
            "title": { "title": [{ "text": { "content": page.title } }] }
        },
        "children": page.children,
    })
}

// Block constructors, keyed by block type the way the page API expects

pub fn heading_2(text: &str) -> Value {
    json!({ "heading_2": { "rich_text": [{ "text": { "content": text } }] } })
}

pub fn heading_3(text: &str) -> Value {
    json!({ "heading_3": { "rich_text": [{ "text": { "content": text } }] } })
}

pub fn paragraph(text: &str) -> Value {
    json!({ "paragraph": { "rich_text": [{ "text": { "content": text } }] } })
}

pub fn bulleted_list_item(text: &str) -> Value {
    json!({ "bulleted_list_item": { "rich_text": [{ "text": { "content": text } }] } })
}

pub fn to_do(text: &str, checked: bool) -> Value {
    json!({
        "to_do": {
            "rich_text": [{ "text": { "content": text } }],
            "checked": checked,
        }
    })
}
