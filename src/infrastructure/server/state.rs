use crate::application::AgentInstanceCache;
use std::sync::Arc;

pub(crate) struct ServerState {
    cache: Arc<AgentInstanceCache>,
}

impl ServerState {
    pub(crate) fn new(cache: Arc<AgentInstanceCache>) -> Self {
        Self { cache }
    }

    pub(crate) fn cache(&self) -> &AgentInstanceCache {
        &self.cache
    }
}
