//! Client code for finews.
//!
//! This crate provides the outbound side of the service: the news search
//! client, the chat completion client, and the summarization layer that
//! turns article lists into ranked stories.

pub mod newsapi;
pub mod openai;
pub mod summarize;

pub use newsapi::{Article, ArticleSource, NewsApiClient, NewsApiConfig, NewsError, NewsSource};
pub use openai::{ChatRequest, Completion, CompletionError, OpenAiClient, OpenAiConfig};
pub use summarize::{ParseOutcome, StorySummary, Summarizer};
