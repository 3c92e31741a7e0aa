//! News API response types and normalization.

use serde::{Deserialize, Serialize};

/// Raw response envelope from the news service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    /// `null` or absent when nothing matched.
    #[serde(default)]
    pub articles: Option<Vec<RawArticle>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Article as delivered by the service; every field may be null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

/// Normalized article record.
///
/// Two articles are the same story when their titles match exactly;
/// no other field takes part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub source: Option<ArticleSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

/// Publisher of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub name: String,
}

impl Article {
    /// Article with only a title, useful for fixtures and fakes.
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into(), description: None, content: None, source: None, url: None, published_at: None }
    }

    /// Best available body text: description, then content.
    pub fn body(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.content.as_deref().filter(|c| !c.is_empty()))
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.name.as_str())
    }
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            title: raw.title.unwrap_or_default(),
            description: raw.description,
            content: raw.content,
            source: raw
                .source
                .and_then(|s| s.name)
                .map(|name| ArticleSource { name }),
            url: raw.url,
            published_at: raw.published_at,
        }
    }
}

impl NewsApiResponse {
    /// Whether the body reports success.
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }

    /// Normalized articles, empty when the service returned none.
    pub fn into_articles(self) -> Vec<Article> {
        self.articles
            .unwrap_or_default()
            .into_iter()
            .map(Article::from)
            .collect()
    }
}
