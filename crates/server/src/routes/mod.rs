//! HTTP endpoint implementations.

pub mod finance_news;
pub mod news;
