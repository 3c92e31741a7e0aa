//! Core types and shared functionality for finews.
//!
//! This crate provides:
//! - In-memory TTL cache for aggregated news
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{NewsCache, TtlCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::RankedSummary;
