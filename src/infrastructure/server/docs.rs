use super::dto::{
    CreateSessionRequest, CreateSessionResponse, ErrorResponse, HealthResponse, QueryRequest,
    QueryResponse, ToolListResponse, ToolSummary,
};
use super::routes;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_handler,
        routes::tools::tools_handler,
        routes::sessions::create_session_handler,
        routes::query::query_handler
    ),
    components(
        schemas(
            HealthResponse,
            ToolSummary,
            ToolListResponse,
            CreateSessionRequest,
            CreateSessionResponse,
            QueryRequest,
            QueryResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "tools", description = "Agents the facilitator can call"),
        (name = "sessions", description = "Conversation lifecycle"),
        (name = "query", description = "Ask the facilitator")
    )
)]
pub(super) struct ApiDoc;
