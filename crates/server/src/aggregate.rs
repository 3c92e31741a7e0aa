//! News aggregation pipeline.
//!
//! One request runs strictly in sequence:
//! cache lookup → headline fetch → supplemental searches → dedupe →
//! summarize → rank/stamp → cache write. Outbound calls are issued one at a
//! time and any failure aborts the request; nothing is retried.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use finews_client::{Article, NewsError, NewsSource, StorySummary, Summarizer};
use finews_core::{Error, NewsCache, RankedSummary, cache::news_cache_key};

/// Page size of the primary regional headline fetch.
pub const PRIMARY_PAGE_SIZE: u8 = 50;

/// Page size of each supplemental keyword search.
pub const SEARCH_PAGE_SIZE: u8 = 20;

/// Below this many headlines, keyword searches are added.
pub const MIN_PRIMARY_ARTICLES: usize = 10;

/// Supplemental searching stops once this many articles are collected.
pub const TARGET_ARTICLES: usize = 30;

/// Keyword searches tried in order when headlines are scarce.
pub const SUPPLEMENTAL_TERMS: [&str; 5] = ["finance", "banking", "ASX", "economy", "investment"];

/// Outcome of aggregating news for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    /// Served from the cache.
    Cached(Vec<RankedSummary>),
    /// Freshly fetched, summarized, and cached.
    Fresh(Vec<RankedSummary>),
    /// No articles were found; nothing was cached.
    Empty,
}

/// Collect articles for `date`: headlines first, then keyword searches if
/// headlines are scarce.
///
/// Searches run one term at a time and stop as soon as the running total
/// reaches [`TARGET_ARTICLES`] or the terms run out.
pub async fn collect_articles(news: &dyn NewsSource, date: NaiveDate) -> Result<Vec<Article>, NewsError> {
    let mut articles = news.fetch_regional_headlines(date, PRIMARY_PAGE_SIZE).await?;
    tracing::debug!(count = articles.len(), "primary headline fetch");

    if articles.len() < MIN_PRIMARY_ARTICLES {
        for term in SUPPLEMENTAL_TERMS {
            let found = news.search_by_term(term, date, SEARCH_PAGE_SIZE).await?;
            articles.extend(found);
            tracing::debug!(term, total = articles.len(), "supplemental search");

            if articles.len() >= TARGET_ARTICLES {
                break;
            }
        }
    }

    Ok(articles)
}

/// Keep the first article for each exact title, preserving order.
pub fn dedupe_by_title(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(a.title.clone()))
        .collect()
}

/// Attach list position, time-of-day, and the echoed date to each story.
///
/// Ranks are 1-based and follow list order; any model-assigned rank is
/// discarded.
pub fn rank_and_stamp(stories: Vec<StorySummary>, time: &str, date: &str) -> Vec<RankedSummary> {
    stories
        .into_iter()
        .enumerate()
        .map(|(i, story)| RankedSummary {
            title: story.title,
            summary: story.summary,
            source: story.source,
            rank: i + 1,
            time: time.to_string(),
            date: date.to_string(),
        })
        .collect()
}

/// Current local time as a 12-hour `hh:mm am` label.
pub fn local_time_label() -> String {
    Local::now().format("%I:%M %P").to_string()
}

/// Run the full pipeline for `date`, echoing `date_label` into each item.
pub async fn aggregate(
    cache: &NewsCache, news: &dyn NewsSource, summarizer: &Summarizer, date: NaiveDate, date_label: &str,
) -> Result<Aggregation, Error> {
    let cache_key = news_cache_key(date);

    if let Some(cached) = cache.get(&cache_key) {
        tracing::debug!(key = %cache_key, "cache hit");
        return Ok(Aggregation::Cached(cached));
    }

    tracing::info!(date = %date_label, "fetching news");

    let articles = collect_articles(news, date).await?;
    let fetched = articles.len();
    let unique = dedupe_by_title(articles);

    if unique.is_empty() {
        tracing::info!(date = %date_label, "no articles found");
        return Ok(Aggregation::Empty);
    }

    tracing::info!(fetched, unique = unique.len(), "sending articles for summarization");

    let stories = summarizer.summarize(&unique).await?;
    let formatted = rank_and_stamp(stories, &local_time_label(), date_label);

    cache.set(&cache_key, formatted.clone());

    tracing::info!(items = formatted.len(), "processed news items");

    Ok(Aggregation::Fresh(formatted))
}
