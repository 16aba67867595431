//! Session lifecycle and query streaming on one assembled facilitator.

use super::agent::{AgentError, AgentRunner, EventStream, LlmAgent};
use super::cache::CacheKey;
use super::catalog::ToolDescriptor;
use super::facilitator::FacilitatorBuild;
use crate::domain::Content;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// One configured facilitator plus the session lifecycle around it.
///
/// Shared by every session created for the same tool set. Turns within a
/// session are not serialized here; callers must not stream two queries into
/// one session concurrently.
pub struct SessionRuntime {
    key: CacheKey,
    agent: Arc<LlmAgent>,
    tools: Vec<ToolDescriptor>,
    runner: Arc<dyn AgentRunner>,
}

impl SessionRuntime {
    pub fn new(key: CacheKey, build: FacilitatorBuild, runner: Arc<dyn AgentRunner>) -> Self {
        Self {
            key,
            agent: build.agent,
            tools: build.tools,
            runner,
        }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn agent(&self) -> &Arc<LlmAgent> {
        &self.agent
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    /// Allocate a fresh conversation for `user_id` and return its id.
    pub async fn create_session(&self, user_id: &str) -> Result<String, AgentError> {
        let session_id = Uuid::new_v4().simple().to_string();
        self.runner.create_session(user_id, &session_id).await?;
        info!(
            app = self.runner.app_name(),
            user_id,
            session_id = session_id.as_str(),
            key = %self.key,
            "Session created"
        );
        Ok(session_id)
    }

    /// Submit `query` as a user turn; the returned stream is consumed once.
    pub async fn stream(
        &self,
        query: &str,
        session_id: &str,
        user_id: &str,
    ) -> Result<EventStream, AgentError> {
        debug!(session_id, user_id, key = %self.key, "Streaming query");
        self.runner
            .run(user_id, session_id, Content::user_text(query))
            .await
    }
}
