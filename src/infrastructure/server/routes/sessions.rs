use super::super::dto::{CreateSessionRequest, CreateSessionResponse, ErrorResponse};
use super::super::error::{ApiError, bad_request, internal_error};
use super::super::state::ServerState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/sessions/create",
    tag = "sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = CreateSessionResponse),
        (status = 400, description = "Missing user id", body = ErrorResponse),
        (status = 500, description = "Agent runtime could not allocate the session", body = ErrorResponse)
    )
)]
pub async fn create_session_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    info!(
        user_id = payload.user_id.as_str(),
        tools = ?payload.tool_names,
        "Received /sessions/create request"
    );

    if payload.user_id.trim().is_empty() {
        error!("Rejecting /sessions/create request due to empty user_id");
        return Err(bad_request("user_id cannot be empty"));
    }

    let cache = state.cache();
    let runtime = cache.get_or_create(&payload.tool_names).await;
    let session_id = runtime
        .create_session(&payload.user_id)
        .await
        .map_err(internal_error)?;
    cache
        .bind_session(session_id.clone(), runtime.key().clone())
        .await;

    info!(
        session_id = session_id.as_str(),
        key = %runtime.key(),
        "Session bound to agent runtime"
    );
    Ok(Json(CreateSessionResponse { session_id }))
}
