//! News search API client.
//!
//! Wraps the two read operations of a NewsAPI-compatible service and
//! normalizes results into [`Article`] records.
//!
//! ### Behavior
//!
//! - **Endpoints**: `{base}/top-headlines` (category/region feed) and
//!   `{base}/everything` (free-text relevance search).
//! - **Authentication**: `X-Api-Key` header, so the key never appears in a URL.
//! - **Failures**: transport and non-2xx responses are errors; an empty or
//!   `null` article list is not.
//! - **No retries**: a failed call is reported to the caller as-is.

pub mod error;
pub mod request;
pub mod response;

pub use error::NewsError;
pub use request::{EverythingRequest, HeadlinesRequest, SortBy};
pub use response::{Article, ArticleSource, NewsApiResponse};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the news service.
const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "finews/0.1";

/// Read operations the aggregation pipeline needs from a news service.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Regional business headlines for `date`, sorted by popularity.
    async fn fetch_regional_headlines(&self, date: NaiveDate, page_size: u8) -> Result<Vec<Article>, NewsError>;

    /// Articles matching `term` and the regional qualifiers on `date`, sorted by relevance.
    async fn search_by_term(&self, term: &str, date: NaiveDate, page_size: u8) -> Result<Vec<Article>, NewsError>;

    /// Current business headlines from any region.
    async fn fetch_top_headlines(&self, page_size: u8) -> Result<Vec<Article>, NewsError>;
}

/// News client configuration.
#[derive(Clone)]
pub struct NewsApiConfig {
    /// API key; checked when a request is made, not at construction.
    pub api_key: String,
    /// Base URL (default: https://newsapi.org/v2).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: finews/0.x).
    pub user_agent: String,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl NewsApiConfig {
    /// Build client configuration from the application config.
    ///
    /// A missing key is tolerated here and reported on the first request.
    pub fn from_app(config: &finews_core::AppConfig) -> Self {
        Self {
            api_key: config.require_news_api_key().map(str::to_string).unwrap_or_default(),
            base_url: config.news_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// HTTP client for the news service.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    config: NewsApiConfig,
}

impl NewsApiClient {
    /// Create a new news client with the given configuration.
    pub fn new(config: NewsApiConfig) -> Result<Self, NewsError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| NewsError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Fetch from the `top-headlines` endpoint.
    pub async fn headlines(&self, req: &HeadlinesRequest) -> Result<Vec<Article>, NewsError> {
        req.validate()?;
        self.get("top-headlines", req).await
    }

    /// Fetch from the `everything` endpoint.
    pub async fn everything(&self, req: &EverythingRequest) -> Result<Vec<Article>, NewsError> {
        req.validate()?;
        self.get("everything", req).await
    }

    async fn get<Q: Serialize + ?Sized>(&self, endpoint: &str, query: &Q) -> Result<Vec<Article>, NewsError> {
        if self.config.api_key.trim().is_empty() {
            return Err(NewsError::MissingApiKey);
        }

        let start = Instant::now();
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);

        tracing::debug!(endpoint, "requesting news service");

        let http_response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!(endpoint, %status, "news service response status");

        if status == 401 {
            return Err(NewsError::AuthError);
        }

        if status == 429 {
            return Err(NewsError::RateLimited);
        }

        let bytes = http_response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            let message = serde_json::from_slice::<NewsApiResponse>(&bytes)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(NewsError::HttpError { status: status.as_u16(), message });
        }

        let api_response: NewsApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| NewsError::Parse(e.to_string()))?;

        if !api_response.is_ok() {
            return Err(NewsError::Upstream {
                code: api_response.code.unwrap_or_else(|| "unknown".into()),
                message: api_response.message.unwrap_or_default(),
            });
        }

        let articles = api_response.into_articles();
        tracing::debug!(endpoint, "fetched {} articles in {:?}", articles.len(), start.elapsed());

        Ok(articles)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch_regional_headlines(&self, date: NaiveDate, page_size: u8) -> Result<Vec<Article>, NewsError> {
        self.headlines(&HeadlinesRequest::regional(date, page_size))
            .await
            .inspect_err(|e| tracing::error!(error = %e, %date, "regional headline fetch failed"))
    }

    async fn search_by_term(&self, term: &str, date: NaiveDate, page_size: u8) -> Result<Vec<Article>, NewsError> {
        self.everything(&EverythingRequest::regional_search(term, date, page_size))
            .await
            .inspect_err(|e| tracing::error!(error = %e, term, %date, "news search failed"))
    }

    async fn fetch_top_headlines(&self, page_size: u8) -> Result<Vec<Article>, NewsError> {
        self.headlines(&HeadlinesRequest::business(page_size))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "top headline fetch failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, api_key: &str) -> NewsApiClient {
        NewsApiClient::new(NewsApiConfig {
            api_key: api_key.to_string(),
            base_url: server.base_url(),
            ..Default::default()
        })
        .unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[tokio::test]
    async fn test_regional_headlines_request_shape() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/top-headlines")
                    .header("x-api-key", "secret")
                    .query_param("country", "au")
                    .query_param("category", "business")
                    .query_param("pageSize", "50")
                    .query_param("from", "2024-01-15")
                    .query_param("to", "2024-01-15")
                    .query_param("sortBy", "popularity")
                    .query_param("language", "en");
                then.status(200).json_body(json!({
                    "status": "ok",
                    "totalResults": 1,
                    "articles": [{"source": {"name": "ABC"}, "title": "ASX rallies", "description": "Up 1%"}]
                }));
            })
            .await;

        let articles = client_for(&server, "secret")
            .fetch_regional_headlines(day(), 50)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "ASX rallies");
        assert_eq!(articles[0].source_name(), Some("ABC"));
    }

    #[tokio::test]
    async fn test_search_request_shape() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/everything")
                    .query_param("q", "banking AND (Australia OR Australian OR ASX OR RBA)")
                    .query_param("sortBy", "relevancy")
                    .query_param("pageSize", "20");
                then.status(200)
                    .json_body(json!({"status": "ok", "totalResults": 0, "articles": []}));
            })
            .await;

        let articles = client_for(&server, "secret")
            .search_by_term("banking", day(), 20)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_null_articles_is_empty_not_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/top-headlines");
                then.status(200).json_body(json!({"status": "ok", "articles": null}));
            })
            .await;

        let articles = client_for(&server, "secret").fetch_top_headlines(20).await.unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/top-headlines");
                then.status(500)
                    .json_body(json!({"status": "error", "code": "unexpectedError", "message": "boom"}));
            })
            .await;

        let result = client_for(&server, "secret").fetch_top_headlines(20).await;
        assert!(matches!(result, Err(NewsError::HttpError { status: 500, message }) if message == "boom"));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/everything");
                then.status(401).json_body(json!({"status": "error", "code": "apiKeyInvalid"}));
            })
            .await;

        let result = client_for(&server, "wrong").search_by_term("finance", day(), 20).await;
        assert!(matches!(result, Err(NewsError::AuthError)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/top-headlines");
                then.status(429);
            })
            .await;

        let result = client_for(&server, "secret").fetch_top_headlines(20).await;
        assert!(matches!(result, Err(NewsError::RateLimited)));
    }

    #[tokio::test]
    async fn test_error_status_in_ok_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/top-headlines");
                then.status(200)
                    .json_body(json!({"status": "error", "code": "parametersMissing", "message": "missing"}));
            })
            .await;

        let result = client_for(&server, "secret").fetch_top_headlines(20).await;
        assert!(matches!(result, Err(NewsError::Upstream { code, .. }) if code == "parametersMissing"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/top-headlines");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let result = client_for(&server, "secret").fetch_top_headlines(20).await;
        assert!(matches!(result, Err(NewsError::Parse(_))));
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

        let result = client_for(&server, "").fetch_top_headlines(20).await;
        assert!(matches!(result, Err(NewsError::MissingApiKey)));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = NewsApiConfig { api_key: "super-secret".into(), ..Default::default() };
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn test_config_from_app() {
        let app = finews_core::AppConfig {
            news_api_key: Some("k".into()),
            news_base_url: "http://localhost:9999".into(),
            ..Default::default()
        };
        let config = NewsApiConfig::from_app(&app);
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, "http://localhost:9999");

        let config = NewsApiConfig::from_app(&finews_core::AppConfig::default());
        assert!(config.api_key.is_empty());
    }
}
