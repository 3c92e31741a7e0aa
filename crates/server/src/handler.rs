//! HTTP router and shared application state.
//!
//! This module wires the two endpoints to their implementations and holds
//! the collaborators every request needs.

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get},
};
use finews_client::{Completion, NewsApiClient, NewsApiConfig, NewsSource, OpenAiClient, OpenAiConfig, Summarizer};
use finews_core::{AppConfig, NewsCache};

use crate::routes::{finance_news, news};

/// State shared by all requests for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cache: Arc<NewsCache>,
    pub news: Arc<dyn NewsSource>,
    pub llm: Arc<dyn Completion>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>, cache: Arc<NewsCache>, news: Arc<dyn NewsSource>, llm: Arc<dyn Completion>,
    ) -> Self {
        Self { config, cache, news, llm }
    }

    /// State backed by the live news and completion services.
    pub fn live(config: AppConfig) -> anyhow::Result<Self> {
        let news = NewsApiClient::new(NewsApiConfig::from_app(&config))?;
        let llm = OpenAiClient::new(OpenAiConfig::from_app(&config))?;

        Ok(Self::new(Arc::new(config), Arc::new(NewsCache::new()), Arc::new(news), Arc::new(llm)))
    }

    /// Summarizer used for the ranked daily list.
    pub fn ranking_summarizer(&self) -> Summarizer {
        Summarizer::new(self.llm.clone(), self.config.summary_model.clone())
    }

    /// Summarizer used for the free-text headline digest.
    pub fn digest_summarizer(&self) -> Summarizer {
        Summarizer::new(self.llm.clone(), self.config.digest_model.clone())
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/news", any(news::news_impl))
        .route("/api/finance-news", get(finance_news::digest_impl))
        .with_state(state)
}
