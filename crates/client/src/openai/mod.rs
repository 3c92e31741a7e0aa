//! Chat completion API client.
//!
//! Talks to an OpenAI-compatible `chat/completions` endpoint and returns the
//! text of the first choice. One call per request, no retries.

pub mod error;
pub mod request;
pub mod response;

pub use error::CompletionError;
pub use request::{ChatMessage, ChatRequest, Role};
pub use response::ChatResponse;

use async_trait::async_trait;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the completion service.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "finews/0.1";

/// Text completion service.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Run one chat completion and return the assistant's text.
    async fn complete(&self, request: ChatRequest) -> Result<String, CompletionError>;
}

/// Completion client configuration.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key; checked when a request is made, not at construction.
    pub api_key: String,
    /// Base URL (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl OpenAiConfig {
    /// Build client configuration from the application config.
    pub fn from_app(config: &finews_core::AppConfig) -> Self {
        Self {
            api_key: config.require_openai_api_key().map(str::to_string).unwrap_or_default(),
            base_url: config.openai_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// HTTP client for the completion service.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new completion client with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| CompletionError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl Completion for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, CompletionError> {
        request.validate()?;

        if self.config.api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let start = Instant::now();
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        tracing::debug!(model = %request.model, messages = request.messages.len(), "requesting completion");

        let http_response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "completion request failed"))?;

        let status = http_response.status();
        tracing::debug!(%status, "completion response status");

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthError);
        }

        if status == 429 {
            return Err(CompletionError::RateLimited);
        }

        let bytes = http_response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            let message = serde_json::from_slice::<response::ErrorEnvelope>(&bytes)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
            tracing::error!(status = status.as_u16(), %message, "completion service returned an error");
            return Err(CompletionError::HttpError { status: status.as_u16(), message });
        }

        let response: ChatResponse =
            serde_json::from_slice(&bytes).map_err(|e| CompletionError::Parse(e.to_string()))?;

        if response.truncated() {
            tracing::warn!("completion stopped at the token limit; output may be cut short");
        }

        let content = response.first_content().ok_or(CompletionError::EmptyCompletion)?;

        tracing::debug!("completion finished in {:?} ({} chars)", start.elapsed(), content.len());

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, api_key: &str) -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig {
            api_key: api_key.to_string(),
            base_url: server.base_url(),
            ..Default::default()
        })
        .unwrap()
    }

    fn request() -> ChatRequest {
        ChatRequest::new("gpt-4o-mini").system("summarize").user("ASX up")
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .header("content-type", "application/json");
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "- ASX up"}, "finish_reason": "stop"}]
                }));
            })
            .await;

        let text = client_for(&server, "sk-test").complete(request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "- ASX up");
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let result = client_for(&server, "sk-test").complete(request()).await;
        assert!(matches!(result, Err(CompletionError::EmptyCompletion)));
    }

    #[tokio::test]
    async fn test_server_error_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(503)
                    .json_body(json!({"error": {"message": "overloaded", "type": "server_error"}}));
            })
            .await;

        let result = client_for(&server, "sk-test").complete(request()).await;
        assert!(matches!(result, Err(CompletionError::HttpError { status: 503, message }) if message == "overloaded"));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401);
            })
            .await;

        let result = client_for(&server, "bad").complete(request()).await;
        assert!(matches!(result, Err(CompletionError::AuthError)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let result = client_for(&server, "").complete(request()).await;
        assert!(matches!(result, Err(CompletionError::MissingApiKey)));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_locally() {
        let server = MockServer::start_async().await;
        let result = client_for(&server, "sk-test").complete(ChatRequest::new("m")).await;
        assert!(matches!(result, Err(CompletionError::InvalidRequest(_))));
    }
}
