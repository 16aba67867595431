use super::super::dto::{ErrorResponse, QueryRequest, QueryResponse};
use super::super::error::{ApiError, agent_failure, bad_request, internal_error, session_not_found};
use super::super::state::ServerState;
use crate::application::{SessionRuntime, collect_response};
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::{error, info, warn};

#[utoipa::path(
    post,
    path = "/query",
    tag = "query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Facilitator answered", body = QueryResponse),
        (status = 400, description = "Missing user id or query", body = ErrorResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 500, description = "Model backend failed", body = ErrorResponse)
    )
)]
pub async fn query_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    info!(
        user_id = payload.user_id.as_str(),
        session = payload.session_id.as_deref(),
        "Received /query request"
    );

    if payload.user_id.trim().is_empty() {
        error!("Rejecting /query request due to empty user_id");
        return Err(bad_request("user_id cannot be empty"));
    }
    if payload.query.trim().is_empty() {
        error!("Rejecting /query request due to empty query");
        return Err(bad_request("query cannot be empty"));
    }

    let (runtime, session_id) = match payload.session_id {
        Some(session_id) => {
            let Some(runtime) = state.cache().runtime_for_session(&session_id).await else {
                warn!(session_id = session_id.as_str(), "Query for unknown session");
                return Err(session_not_found(&session_id));
            };
            (runtime, session_id)
        }
        None => start_default_session(&state, &payload.user_id).await?,
    };

    let events = runtime
        .stream(&payload.query, &session_id, &payload.user_id)
        .await
        .map_err(|failure| agent_failure(&session_id, failure))?;
    let response = collect_response(events)
        .await
        .map_err(|failure| agent_failure(&session_id, failure))?;

    info!(
        session_id = session_id.as_str(),
        chars = response.len(),
        "Query completed"
    );
    Ok(Json(QueryResponse {
        response,
        session_id,
    }))
}

/// New session on the runtime holding every catalog tool.
async fn start_default_session(
    state: &ServerState,
    user_id: &str,
) -> Result<(Arc<SessionRuntime>, String), ApiError> {
    let cache = state.cache();
    let runtime = cache.get_or_create(&cache.catalog().names()).await;
    let session_id = runtime
        .create_session(user_id)
        .await
        .map_err(internal_error)?;
    cache
        .bind_session(session_id.clone(), runtime.key().clone())
        .await;
    info!(
        session_id = session_id.as_str(),
        "Started session for query without session_id"
    );
    Ok((runtime, session_id))
}
