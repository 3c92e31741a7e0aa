//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FINEWS_*)
//! 2. Bare `NEWS_API_KEY` / `OPENAI_API_KEY` secrets
//! 3. TOML config file (if FINEWS_CONFIG_FILE set)
//! 4. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FINEWS_*)
/// 2. `NEWS_API_KEY` and `OPENAI_API_KEY`
/// 3. TOML config file (if FINEWS_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// News service API key.
    ///
    /// Set via NEWS_API_KEY or FINEWS_NEWS_API_KEY.
    /// Required only when a news endpoint is called.
    #[serde(default)]
    pub news_api_key: Option<String>,

    /// Completion service API key.
    ///
    /// Set via OPENAI_API_KEY or FINEWS_OPENAI_API_KEY.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Base URL of the news service.
    #[serde(default = "default_news_base_url")]
    pub news_base_url: String,

    /// Base URL of the completion service.
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Model used to rank and summarize the daily news list.
    #[serde(default = "default_summary_model")]
    pub summary_model: String,

    /// Model used for the free-text headline digest.
    #[serde(default = "default_digest_model")]
    pub digest_model: String,

    /// Address the HTTP server listens on.
    ///
    /// Set via FINEWS_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Outbound HTTP request timeout in milliseconds.
    ///
    /// Set via FINEWS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for outbound HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".into()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_summary_model() -> String {
    "gpt-3.5-turbo".into()
}

fn default_digest_model() -> String {
    "gpt-4o-mini".into()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "finews/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            openai_api_key: None,
            news_base_url: default_news_base_url(),
            openai_base_url: default_openai_base_url(),
            summary_model: default_summary_model(),
            digest_model: default_digest_model(),
            bind_addr: default_bind_addr(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

// API keys are redacted.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("news_api_key", &self.news_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("news_base_url", &self.news_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("summary_model", &self.summary_model)
            .field("digest_model", &self.digest_model)
            .field("bind_addr", &self.bind_addr)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// The layered provider stack behind [`AppConfig::load`].
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FINEWS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment
            .merge(Env::raw().only(&["news_api_key", "openai_api_key"]))
            .merge(
                Env::prefixed("FINEWS_")
                    .ignore(&["config_file"])
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            )
    }

    /// News service key (deferred validation, checked at call time).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_news_api_key(&self) -> Result<&str, ConfigError> {
        non_empty(self.news_api_key.as_deref()).ok_or_else(|| ConfigError::Missing {
            field: "news_api_key".into(),
            hint: "Set NEWS_API_KEY environment variable".into(),
        })
    }

    /// Completion service key (deferred validation, checked at call time).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_openai_api_key(&self) -> Result<&str, ConfigError> {
        non_empty(self.openai_api_key.as_deref()).ok_or_else(|| ConfigError::Missing {
            field: "openai_api_key".into(),
            hint: "Set OPENAI_API_KEY environment variable".into(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.news_base_url, "https://newsapi.org/v2");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.summary_model, "gpt-3.5-turbo");
        assert_eq!(config.digest_model, "gpt-4o-mini");
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.user_agent, "finews/0.1");
        assert!(config.news_api_key.is_none());
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_require_keys_missing() {
        let config = AppConfig::default();
        assert!(matches!(config.require_news_api_key(), Err(ConfigError::Missing { .. })));
        assert!(matches!(config.require_openai_api_key(), Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_key_blank_is_missing() {
        let config = AppConfig { news_api_key: Some("  ".into()), ..Default::default() };
        assert!(config.require_news_api_key().is_err());
    }

    #[test]
    fn test_require_keys_present() {
        let config =
            AppConfig { news_api_key: Some("news".into()), openai_api_key: Some("llm".into()), ..Default::default() };
        assert_eq!(config.require_news_api_key().unwrap(), "news");
        assert_eq!(config.require_openai_api_key().unwrap(), "llm");
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = AppConfig { news_api_key: Some("super-secret".into()), ..Default::default() };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_load_layers_env() {
        Jail::expect_with(|jail| {
            jail.set_env("NEWS_API_KEY", "from-bare");
            jail.set_env("OPENAI_API_KEY", "llm-bare");
            jail.set_env("FINEWS_TIMEOUT_MS", "5000");
            jail.set_env("FINEWS_SUMMARY_MODEL", "gpt-4o");

            let config = AppConfig::load().expect("config loads");
            assert_eq!(config.news_api_key.as_deref(), Some("from-bare"));
            assert_eq!(config.openai_api_key.as_deref(), Some("llm-bare"));
            assert_eq!(config.timeout_ms, 5000);
            assert_eq!(config.summary_model, "gpt-4o");
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_overrides_bare_key() {
        Jail::expect_with(|jail| {
            jail.set_env("NEWS_API_KEY", "bare");
            jail.set_env("FINEWS_NEWS_API_KEY", "prefixed");

            let config = AppConfig::load().expect("config loads");
            assert_eq!(config.news_api_key.as_deref(), Some("prefixed"));
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("finews.toml", "bind_addr = \"127.0.0.1:8080\"\ndigest_model = \"gpt-4o\"")?;
            jail.set_env("FINEWS_CONFIG_FILE", "finews.toml");

            let config = AppConfig::load().expect("config loads");
            assert_eq!(config.bind_addr, "127.0.0.1:8080");
            assert_eq!(config.digest_model, "gpt-4o");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("FINEWS_TIMEOUT_MS", "10");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}
