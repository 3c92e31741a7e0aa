//! Parsing of model output into ranked stories.
//!
//! The model is asked for a JSON array. When it complies, [`parse_completion`]
//! yields [`ParseOutcome::Parsed`]; otherwise the raw text is kept in
//! [`ParseOutcome::Unparsed`] and [`fallback_extract`] recovers what it can
//! from lines shaped like one JSON object each.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::prompt::MAX_STORIES;

/// Source attributed to stories that do not name one.
pub const FALLBACK_SOURCE: &str = "Various";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""title":\s*"([^"]+)""#).expect("valid title pattern"));

static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""summary":\s*"([^"]+)""#).expect("valid summary pattern"));

/// One story as produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySummary {
    pub title: String,
    pub summary: String,
    pub source: String,
    /// Model-assigned rank; replaced by list position downstream.
    pub rank: Option<u32>,
}

/// Loosely typed story object as it appears in the model's JSON array.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStory {
    title: Option<serde_json::Value>,
    summary: Option<serde_json::Value>,
    source: Option<serde_json::Value>,
    rank: Option<serde_json::Value>,
}

impl RawStory {
    fn into_story(self) -> Option<StorySummary> {
        Some(StorySummary {
            title: non_empty_text(self.title)?,
            summary: non_empty_text(self.summary)?,
            source: non_empty_text(self.source).unwrap_or_else(|| FALLBACK_SOURCE.to_string()),
            rank: self.rank.as_ref().and_then(loose_rank),
        })
    }
}

fn non_empty_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Accepts `3` as well as `"3"`.
fn loose_rank(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Result of reading model output as a structured list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Output was a JSON array; usable stories, truncated to [`MAX_STORIES`].
    Parsed(Vec<StorySummary>),
    /// Output was not JSON; carries the raw text.
    Unparsed(String),
}

/// Interpret model output as a JSON list of stories.
///
/// Any JSON array is a successful parse. Items are read one at a time and
/// those without a text title and summary are skipped. A missing or null
/// source becomes [`FALLBACK_SOURCE`]. Valid JSON that is not an array
/// counts as a successful parse with no stories.
pub fn parse_completion(raw: &str) -> ParseOutcome {
    let body = strip_code_fence(raw);

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => {
            let stories = items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<RawStory>(item).ok()?.into_story())
                .take(MAX_STORIES)
                .collect();
            ParseOutcome::Parsed(stories)
        }
        Ok(_) => ParseOutcome::Parsed(Vec::new()),
        Err(_) => ParseOutcome::Unparsed(raw.to_string()),
    }
}

/// Recover stories from lines holding both a `"title"` and a `"summary"`.
///
/// Only the one-object-per-line shape is recognized. Recovered stories get
/// [`FALLBACK_SOURCE`] and sequential ranks starting at 1.
pub fn fallback_extract(raw: &str) -> Vec<StorySummary> {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.contains("\"title\"") && line.contains("\"summary\""))
        .filter_map(|line| {
            let title = TITLE_RE.captures(line)?.get(1)?.as_str();
            let summary = SUMMARY_RE.captures(line)?.get(1)?.as_str();
            Some((title.to_string(), summary.to_string()))
        })
        .take(MAX_STORIES)
        .enumerate()
        .map(|(i, (title, summary))| StorySummary {
            title,
            summary,
            source: FALLBACK_SOURCE.to_string(),
            rank: Some(i as u32 + 1),
        })
        .collect()
}

/// Drop a surrounding markdown code fence (```` ```json ... ``` ````), if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Skip the info string (e.g. `json`) on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}
