//! News API client error types.

use std::sync::Arc;

/// Errors from the news search service client.
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    /// No API key configured.
    #[error("missing API key: NEWS_API_KEY not set")]
    MissingApiKey,

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the news service.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The service answered 200 but flagged the body as an error.
    #[error("upstream error {code}: {message}")]
    Upstream { code: String, message: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for NewsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { NewsError::Timeout } else { NewsError::Network(Arc::new(err)) }
    }
}

impl From<NewsError> for finews_core::Error {
    fn from(err: NewsError) -> Self {
        finews_core::Error::FetchFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NewsError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = NewsError::HttpError { status: 500, message: "boom".into() };
        assert_eq!(err.to_string(), "HTTP error 500: boom");
    }

    #[test]
    fn test_into_core_error() {
        let err: finews_core::Error = NewsError::RateLimited.into();
        assert!(matches!(err, finews_core::Error::FetchFailed(msg) if msg.contains("rate limited")));
    }
}
