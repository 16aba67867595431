use super::super::dto::{ToolListResponse, ToolSummary};
use super::super::state::ServerState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    responses(
        (status = 200, description = "Catalog tools in registration order", body = ToolListResponse)
    )
)]
pub async fn tools_handler(State(state): State<Arc<ServerState>>) -> Json<ToolListResponse> {
    let tools: Vec<ToolSummary> = state
        .cache()
        .catalog()
        .list_tools()
        .iter()
        .map(ToolSummary::from)
        .collect();
    debug!(tool_count = tools.len(), "Serving /tools request");
    Json(ToolListResponse { tools })
}
