//! Completion client error types.

use std::sync::Arc;

/// Errors from the chat completion service client.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API key configured.
    #[error("missing API key: OPENAI_API_KEY not set")]
    MissingApiKey,

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the completion service.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response envelope could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service returned no choices or an empty message.
    #[error("completion returned no content")]
    EmptyCompletion,
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { CompletionError::Timeout } else { CompletionError::Network(Arc::new(err)) }
    }
}

impl From<CompletionError> for finews_core::Error {
    fn from(err: CompletionError) -> Self {
        finews_core::Error::SummarizeFailed(err.to_string())
    }
}
