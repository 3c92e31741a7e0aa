//! Unified error types for finews.
//!
//! Every failure that can end a request is funnelled into [`Error`], which
//! knows the HTTP status it should be reported with.

/// Unified error types for the finews server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an unparseable date).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// HTTP method not supported by the endpoint.
    #[error("METHOD_NOT_ALLOWED: {0}")]
    MethodNotAllowed(String),

    /// The news service could not be reached or rejected the request.
    #[error("FETCH_FAILED: {0}")]
    FetchFailed(String),

    /// The completion service could not be reached or rejected the request.
    #[error("SUMMARIZE_FAILED: {0}")]
    SummarizeFailed(String),
}

impl Error {
    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidInput(_) => 400,
            Error::MethodNotAllowed(_) => 405,
            Error::FetchFailed(_) | Error::SummarizeFailed(_) => 500,
        }
    }

    /// Message without the error-code prefix, safe to echo to callers.
    pub fn detail(&self) -> &str {
        match self {
            Error::InvalidInput(msg)
            | Error::MethodNotAllowed(msg)
            | Error::FetchFailed(msg)
            | Error::SummarizeFailed(msg) => msg,
        }
    }
}
