use super::errors::AgentError;
use crate::domain::Content;
use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

type SessionKey = (String, String);

/// Conversation histories keyed by `(user_id, session_id)`, bounded by LRU capacity.
pub struct InMemorySessionService {
    sessions: Mutex<LruCache<SessionKey, Vec<Content>>>,
}

impl InMemorySessionService {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub async fn create(&self, user_id: &str, session_id: &str) -> Result<(), AgentError> {
        let key = (user_id.to_string(), session_id.to_string());
        let mut sessions = self.sessions.lock().await;
        if sessions.contains(&key) {
            return Err(AgentError::SessionExists {
                user_id: key.0,
                session_id: key.1,
            });
        }
        if let Some(((user, session), _)) = sessions.push(key, Vec::new()) {
            warn!(user_id = %user, session_id = %session, "Evicted least recently used session history");
        }
        debug!(user_id, session_id, total = sessions.len(), "Session history created");
        Ok(())
    }

    pub async fn append(
        &self,
        user_id: &str,
        session_id: &str,
        content: Content,
    ) -> Result<(), AgentError> {
        let key = (user_id.to_string(), session_id.to_string());
        let mut sessions = self.sessions.lock().await;
        let history = sessions
            .get_mut(&key)
            .ok_or_else(|| AgentError::session_not_found(user_id, session_id))?;
        history.push(content);
        Ok(())
    }

    pub async fn history(&self, user_id: &str, session_id: &str) -> Result<Vec<Content>, AgentError> {
        let key = (user_id.to_string(), session_id.to_string());
        let mut sessions = self.sessions.lock().await;
        sessions
            .get(&key)
            .cloned()
            .ok_or_else(|| AgentError::session_not_found(user_id, session_id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
