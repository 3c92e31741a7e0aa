//! News API request types and validation.

use chrono::NaiveDate;
use serde::Serialize;

use crate::newsapi::NewsError;

/// Region the headline feed is restricted to (ISO 3166-1 alpha-2).
pub const REGION_COUNTRY: &str = "au";

/// Terms every keyword search is conjoined with to keep results regional.
pub const REGION_QUALIFIER: &str = "(Australia OR Australian OR ASX OR RBA)";

/// Headline category requested from the feed.
pub const BUSINESS_CATEGORY: &str = "business";

const LANGUAGE: &str = "en";

/// Largest page the service will return.
const MAX_PAGE_SIZE: u8 = 100;

/// Longest query string the service accepts.
const MAX_QUERY_CHARS: usize = 500;

/// Result ordering understood by the service.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Popularity,
    Relevancy,
}

/// Query parameters for the `top-headlines` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlinesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub page_size: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl HeadlinesRequest {
    /// Regional business headlines published on `date`, most popular first.
    pub fn regional(date: NaiveDate, page_size: u8) -> Self {
        let day = format_day(date);
        Self {
            country: Some(REGION_COUNTRY.into()),
            category: Some(BUSINESS_CATEGORY.into()),
            page_size,
            from: Some(day.clone()),
            to: Some(day),
            sort_by: Some(SortBy::Popularity),
            language: Some(LANGUAGE.into()),
        }
    }

    /// Current business headlines from any region.
    pub fn business(page_size: u8) -> Self {
        Self {
            country: None,
            category: Some(BUSINESS_CATEGORY.into()),
            page_size,
            from: None,
            to: None,
            sort_by: None,
            language: None,
        }
    }

    pub fn validate(&self) -> Result<(), NewsError> {
        validate_page_size(self.page_size)
    }
}

/// Query parameters for the `everything` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EverythingRequest {
    /// Bare search term, before regional qualification.
    #[serde(skip)]
    pub term: String,
    pub q: String,
    pub from: String,
    pub to: String,
    pub sort_by: SortBy,
    pub language: String,
    pub page_size: u8,
}

impl EverythingRequest {
    /// Search for `term` within the region on `date`, most relevant first.
    pub fn regional_search(term: &str, date: NaiveDate, page_size: u8) -> Self {
        let day = format_day(date);
        Self {
            term: term.to_string(),
            q: format!("{term} AND {REGION_QUALIFIER}"),
            from: day.clone(),
            to: day,
            sort_by: SortBy::Relevancy,
            language: LANGUAGE.into(),
            page_size,
        }
    }

    /// Validate the search request parameters.
    pub fn validate(&self) -> Result<(), NewsError> {
        if self.term.trim().is_empty() {
            return Err(NewsError::InvalidRequest("search term cannot be empty".into()));
        }

        if self.q.chars().count() > MAX_QUERY_CHARS {
            return Err(NewsError::InvalidRequest(format!(
                "query too long: {} chars (max {MAX_QUERY_CHARS})",
                self.q.chars().count()
            )));
        }

        validate_page_size(self.page_size)
    }
}

fn validate_page_size(page_size: u8) -> Result<(), NewsError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(NewsError::InvalidRequest(format!("page size must be 1-{MAX_PAGE_SIZE}, got {page_size}")));
    }
    Ok(())
}

fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
