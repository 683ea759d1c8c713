//! HTTP Error Taxonomy
//!
//! Every handler returns `Result<_, ApiError>`. The variants map one-to-one onto
//! response status codes; unexpected failures are logged and surface to the
//! client as a generic 500 body so internals never leak.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input (400).
    #[error("{0}")]
    Validation(String),

    /// Uniqueness conflict (409).
    #[error("{0}")]
    Conflict(String),

    /// Missing, invalid, or expired credential (401).
    #[error("{0}")]
    Auth(String),

    /// Authenticated but not entitled (403).
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity absent (404).
    #[error("{0}")]
    NotFound(String),

    /// Third-party provider unreachable or rejecting; status already mapped
    /// from the upstream response (401/404/502/504).
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// Anything unexpected (500).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body. Internal failures keep their specifics in the log
    /// only; the client sees a fixed message.
    pub fn body(&self) -> ErrorBody {
        let message = match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        ErrorBody { message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!("Internal server error: {:#}", err);
        }

        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_internal_body_never_carries_specifics() {
        let error = ApiError::Internal(anyhow!("db handle poisoned at 0x1234"));

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = serde_json::to_value(error.body()).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Internal server error" }));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let error = ApiError::NotFound("Movie not found".to_string());

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.body().message, "Movie not found");
    }
}
