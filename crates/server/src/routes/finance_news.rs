//! `/api/finance-news` endpoint: a bullet-point digest of top business headlines.

use axum::{Json, extract::State, response::IntoResponse};
use finews_core::Error;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handler::AppState;

/// Number of headlines fed into the digest.
pub const DIGEST_HEADLINES: u8 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DigestResponse {
    pub summary: String,
}

/// Implementation of the digest endpoint.
pub async fn digest_impl(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let summary = build_digest(&state).await.map_err(ApiError::Digest)?;
    Ok(Json(DigestResponse { summary }))
}

async fn build_digest(state: &AppState) -> Result<String, Error> {
    let articles = state.news.fetch_top_headlines(DIGEST_HEADLINES).await?;
    tracing::info!(headlines = articles.len(), "building headline digest");

    Ok(state.digest_summarizer().digest(&articles).await?)
}
