//! News summarization on top of a [`Completion`] service.
//!
//! [`Summarizer::summarize`] turns a list of articles into at most
//! [`MAX_STORIES`] ranked stories with one completion call. A structured
//! parse failure is not an error: the fallback extractor runs instead and
//! the degradation is only logged.

pub mod parse;
pub mod prompt;

pub use parse::{FALLBACK_SOURCE, ParseOutcome, StorySummary, fallback_extract, parse_completion};
pub use prompt::{MAX_STORIES, build_summary_prompt, format_articles};

use std::sync::Arc;

use crate::newsapi::Article;
use crate::openai::{ChatRequest, Completion, CompletionError};

/// Output budget for the ranking call.
const SUMMARY_MAX_TOKENS: u32 = 3000;

/// Sampling temperature for the ranking call.
const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Longest slice of raw output included in fallback log lines.
const LOG_PREVIEW_CHARS: usize = 200;

/// Ranks and summarizes articles with a completion model.
#[derive(Clone)]
pub struct Summarizer {
    llm: Arc<dyn Completion>,
    model: String,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn Completion>, model: impl Into<String>) -> Self {
        Self { llm, model: model.into() }
    }

    /// Summarize `articles` into ranked stories, in the model's order.
    ///
    /// Returns an empty list without calling the model when `articles` is empty.
    pub async fn summarize(&self, articles: &[Article]) -> Result<Vec<StorySummary>, CompletionError> {
        if articles.is_empty() {
            return Ok(Vec::new());
        }

        let request = ChatRequest::new(&self.model)
            .system(prompt::SUMMARY_SYSTEM_PROMPT)
            .user(build_summary_prompt(articles))
            .max_tokens(SUMMARY_MAX_TOKENS)
            .temperature(SUMMARY_TEMPERATURE);

        let raw = self
            .llm
            .complete(request)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "summarization call failed"))?;

        let stories = match parse_completion(&raw) {
            ParseOutcome::Parsed(stories) => stories,
            ParseOutcome::Unparsed(raw) => {
                let recovered = fallback_extract(&raw);
                tracing::warn!(
                    recovered = recovered.len(),
                    preview = %preview(&raw),
                    "completion was not a JSON list; used line fallback"
                );
                recovered
            }
        };

        tracing::info!(articles = articles.len(), stories = stories.len(), "summarization complete");

        Ok(stories)
    }

    /// Free-text bullet digest of the headline titles.
    pub async fn digest(&self, articles: &[Article]) -> Result<String, CompletionError> {
        let request = ChatRequest::new(&self.model)
            .system(prompt::DIGEST_SYSTEM_PROMPT)
            .user(prompt::headline_list(articles));

        self.llm.complete(request).await
    }
}

fn preview(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() { format!("{head}…") } else { head }
}
