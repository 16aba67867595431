use super::dto::ErrorResponse;
use crate::application::agent::AgentError;
use axum::Json;
use axum::http::StatusCode;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Rejection shape shared by every handler.
pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub(crate) fn bad_request(message: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, message)
}

pub(crate) fn session_not_found(session_id: &str) -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        format!("session '{session_id}' not found"),
    )
}

/// Unknown sessions become 404; anything else is a 500 carrying the error text.
pub(crate) fn agent_failure(session_id: &str, failure: AgentError) -> ApiError {
    if failure.is_not_found() {
        return session_not_found(session_id);
    }
    internal_error(failure)
}

pub(crate) fn internal_error(failure: AgentError) -> ApiError {
    error!(%failure, "Agent invocation failed");
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("agent invocation failed: {failure}"),
    )
}
