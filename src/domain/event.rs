use super::types::Content;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One incremental unit of agent output within a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEvent {
    pub id: String,
    /// Shared by every event produced while answering the same query
    pub invocation_id: String,
    pub author: String,
    pub content: Option<Content>,
    pub timestamp: DateTime<Utc>,
}

impl AgentEvent {
    pub fn new(
        invocation_id: impl Into<String>,
        author: impl Into<String>,
        content: Option<Content>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            invocation_id: invocation_id.into(),
            author: author.into(),
            content,
            timestamp: Utc::now(),
        }
    }
}
