use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by route handlers; each one renders as `{"error": msg}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Service(ServiceError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            // duplicate netid is a client error, reported as 400 rather than 409
            ApiError::Service(ServiceError::Conflict(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Service(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Service(e @ ServiceError::Io(_)) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %msg, "request failed");
        }
        (status, Json(ErrorBody::new(msg))).into_response()
    }
}
