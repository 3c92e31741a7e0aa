//! `/api/news` endpoint.
//!
//! Returns the ranked, summarized finance news for one date, served from the
//! cache when a fresh entry exists.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use finews_core::{Error, RankedSummary};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregation, aggregate};
use crate::error::ApiError;
use crate::handler::AppState;

const INVALID_DATE: &str = "Invalid date format. Use YYYY-MM-DD";
const NO_NEWS: &str = "No news found for this date";

/// Length of a zero-padded `YYYY-MM-DD` date.
const DATE_LEN: usize = 10;

/// CORS headers attached to every response of this endpoint.
const CORS_HEADERS: [(header::HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// Query parameters for the news endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsParams {
    /// Target date (`YYYY-MM-DD`); defaults to today in server-local time.
    #[serde(default)]
    pub date: Option<String>,
}

/// Success envelope of the news endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsEnvelope {
    pub success: bool,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    pub data: Vec<RankedSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewsEnvelope {
    fn from_aggregation(date: String, aggregation: Aggregation) -> Self {
        match aggregation {
            Aggregation::Cached(data) => Self { success: true, date, cached: Some(true), data, message: None },
            Aggregation::Fresh(data) => Self { success: true, date, cached: Some(false), data, message: None },
            Aggregation::Empty => {
                Self { success: true, date, cached: None, data: Vec::new(), message: Some(NO_NEWS.into()) }
            }
        }
    }
}

/// Resolve the requested date, defaulting to today.
///
/// Only the zero-padded form is accepted, so each date has exactly one label.
/// Returns the parsed date and the label echoed back to the caller.
pub fn resolve_date(raw: Option<&str>) -> Result<(NaiveDate, String), Error> {
    match raw.filter(|d| !d.is_empty()) {
        None => {
            let today = Local::now().date_naive();
            Ok((today, today.format("%Y-%m-%d").to_string()))
        }
        Some(raw) if raw.len() == DATE_LEN => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| (date, raw.to_string()))
            .map_err(|_| Error::InvalidInput(INVALID_DATE.into())),
        Some(_) => Err(Error::InvalidInput(INVALID_DATE.into())),
    }
}

/// Implementation of the news endpoint.
pub async fn news_impl(
    State(state): State<AppState>, method: Method, params: Result<Query<NewsParams>, QueryRejection>,
) -> Response {
    let response = match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::GET => match handle_get(&state, params).await {
            Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
            Err(err) => err.into_response(),
        },
        other => ApiError::from(Error::MethodNotAllowed(other.to_string())).into_response(),
    };

    (CORS_HEADERS, response).into_response()
}

async fn handle_get(
    state: &AppState, params: Result<Query<NewsParams>, QueryRejection>,
) -> Result<NewsEnvelope, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "unreadable news query");
        Error::InvalidInput(INVALID_DATE.into())
    })?;
    let (date, label) = resolve_date(params.date.as_deref())?;

    let summarizer = state.ranking_summarizer();
    let aggregation = aggregate(&state.cache, state.news.as_ref(), &summarizer, date, &label).await?;

    Ok(NewsEnvelope::from_aggregation(label, aggregation))
}
