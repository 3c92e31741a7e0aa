//! Cache key derivation.

use chrono::NaiveDate;

/// Cache key for the aggregated news of one calendar day.
pub fn news_cache_key(date: NaiveDate) -> String {
    format!("news_{}", date.format("%Y-%m-%d"))
}
