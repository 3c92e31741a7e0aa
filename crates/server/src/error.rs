//! HTTP error responses for the finews server.
//!
//! The two endpoints report failures differently: the news endpoint answers
//! with a client error or a `{success: false, ...}` envelope, the digest
//! endpoint with a bare `{error}` object.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use finews_core::Error;
use serde_json::json;

const NEWS_FAILURE: &str = "Failed to fetch and process news";
const DIGEST_FAILURE: &str = "Failed to fetch news summary.";

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Failure inside the news aggregation endpoint.
    #[error(transparent)]
    News(#[from] Error),

    /// Failure inside the headline digest endpoint.
    #[error("digest failed: {0}")]
    Digest(Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::News(err) => {
                let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                match err {
                    Error::InvalidInput(msg) => {
                        tracing::warn!(reason = %msg, "rejected news request");
                        (status, Json(json!({ "error": msg }))).into_response()
                    }
                    Error::MethodNotAllowed(method) => {
                        tracing::warn!(%method, "unsupported method on news endpoint");
                        (status, Json(json!({ "error": "Method not allowed" }))).into_response()
                    }
                    err => {
                        tracing::error!(error = %err, "news request failed");
                        (
                            status,
                            Json(json!({ "success": false, "error": NEWS_FAILURE, "message": err.detail() })),
                        )
                            .into_response()
                    }
                }
            }
            ApiError::Digest(err) => {
                tracing::error!(error = %err, "digest request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": DIGEST_FAILURE }))).into_response()
            }
        }
    }
}
