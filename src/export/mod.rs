//! Export of reviewed minutes to the connected workspace.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Kolkata;
use serde_json::Value;
use tracing::info;

use crate::minutes::{MeetingMinutes, MinutesError};
use crate::providers::{notion, PageRequest, WorkspaceProvider};

/// Renders minutes into workspace blocks and creates the page.
pub struct ExportService {
    workspace: Arc<dyn WorkspaceProvider>,
    database_id: Option<String>,
}

impl ExportService {
    pub fn new(workspace: Arc<dyn WorkspaceProvider>, database_id: Option<String>) -> Self {
        Self {
            workspace,
            database_id,
        }
    }

    /// Export minutes as a new page in the configured database.
    pub async fn export_minutes(&self, minutes: &MeetingMinutes) -> Result<(), MinutesError> {
        let database_id = match self.database_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => return Err(MinutesError::WorkspaceNotConfigured),
        };

        let title = page_title(Utc::now());
        let children = minutes_blocks(minutes);

        info!("Exporting minutes to page \"{}\"", title);

        self.workspace
            .create_page(PageRequest {
                database_id: database_id.to_string(),
                title,
                children,
            })
            .await
            .map_err(|e| MinutesError::ExportFailed(format!("{:#}", e)))
    }
}

/// Page title carrying the export time in Indian Standard Time.
fn page_title(now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&Kolkata);
    format!("Meeting Minutes - {}", local.format("%Y-%m-%d %H:%M %Z"))
}

/// Render minutes into the fixed block layout: a Key Info section, then
/// one section per non-empty list.
fn minutes_blocks(minutes: &MeetingMinutes) -> Vec<Value> {
    let mut children = vec![
        notion::heading_2("Key Info"),
        notion::bulleted_list_item(&format!(
            "Overall Sentiment: {}",
            minutes.overall_sentiment
        )),
        notion::bulleted_list_item(&format!("Topics: {}", minutes.topics.join(", "))),
    ];

    if !minutes.discussion_points.is_empty() {
        children.push(notion::heading_2("Discussion Points"));
        for point in &minutes.discussion_points {
            children.push(notion::heading_3(&point.topic));
            children.push(notion::paragraph(&point.summary));
        }
    }

    if !minutes.action_items.is_empty() {
        children.push(notion::heading_2("Action Items"));
        for item in &minutes.action_items {
            let owners = item.owner.join(", ");
            let deadline = item
                .deadline
                .as_deref()
                .filter(|deadline| !deadline.is_empty())
                .unwrap_or("N/A");
            children.push(notion::to_do(
                &format!("{} (Owner: {}, Deadline: {})", item.task, owners, deadline),
                false,
            ));
        }
    }

    children
}
