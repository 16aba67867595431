use crate::infrastructure::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("session '{session_id}' not found for user '{user_id}'")]
    SessionNotFound { user_id: String, session_id: String },
    #[error("session '{session_id}' already exists for user '{user_id}'")]
    SessionExists { user_id: String, session_id: String },
}

impl AgentError {
    pub fn session_not_found(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::SessionNotFound {
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    /// Whether the failure stems from the caller naming a session that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound { .. })
    }
}
