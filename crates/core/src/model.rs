//! Records returned to API callers.

use serde::{Deserialize, Serialize};

/// One ranked, summarized story in the daily news list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSummary {
    pub title: String,
    pub summary: String,
    pub source: String,
    /// 1-based position in the returned list.
    pub rank: usize,
    /// Local time-of-day the list was produced, e.g. `09:05 am`.
    pub time: String,
    /// Target date echoed from the request (`YYYY-MM-DD`).
    pub date: String,
}
