mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use dto::{
    CreateSessionRequest, CreateSessionResponse, ErrorResponse, HealthResponse, QueryRequest,
    QueryResponse, ToolListResponse, ToolSummary,
};
pub use error::ServerError;
pub use router::build_router;

use crate::application::AgentInstanceCache;
use crate::config::RestServerConfig;
use std::sync::Arc;

pub async fn serve(
    cache: Arc<AgentInstanceCache>,
    config: &RestServerConfig,
) -> Result<(), ServerError> {
    router::serve(cache, config).await
}
