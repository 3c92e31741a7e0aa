//! Prompt construction for news summarization.

use crate::newsapi::Article;

/// Maximum number of stories requested from, and accepted back from, the model.
pub const MAX_STORIES: usize = 20;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a financial news analyst specializing in Australian markets. \
Provide accurate, concise summaries focusing on market impact and investor relevance.";

pub const DIGEST_SYSTEM_PROMPT: &str = "Summarize finance news clearly in bullet points.";

const NO_DESCRIPTION: &str = "No description available";

const UNKNOWN_SOURCE: &str = "Unknown";

/// Render one article as a numbered block.
///
/// `index` is 0-based; the rendered number is 1-based.
pub fn format_article(index: usize, article: &Article) -> String {
    format!(
        "{}. {}\n{}\nSource: {}\n",
        index + 1,
        article.title,
        article.body().unwrap_or(NO_DESCRIPTION),
        article.source_name().unwrap_or(UNKNOWN_SOURCE),
    )
}

/// Render every article, separated by blank lines.
pub fn format_articles(articles: &[Article]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, a)| format_article(i, a))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ranking instruction sent as the user message.
pub fn build_summary_prompt(articles: &[Article]) -> String {
    format!(
        "Analyze these Australian finance news articles and create the top {MAX_STORIES} most important stories. \
For each story, provide:

1. A clear, engaging title
2. A concise 2-3 sentence summary highlighting key financial impacts
3. Rank by importance to Australian investors and economy

Format as JSON array with objects containing: title, summary, source, rank (1-{MAX_STORIES})

News articles:
{}

Focus on: ASX movements, RBA decisions, major corporate earnings, housing market, banking sector, \
mining/commodities, economic indicators, and regulatory changes.",
        format_articles(articles)
    )
}

/// Headline titles, one per line, for the free-text digest.
pub fn headline_list(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|a| a.title.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
