//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SelectorConfig;
use crate::utils::parse_selector;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and pacing behavior settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Disk cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log verbosity
    #[serde(default)]
    pub logging: LoggingConfig,

    /// CSS selectors used by the extractor
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {e}", path.display())))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        url::Url::parse(&self.client.base_url)?;
        if self.client.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        if self.client.request_delay_min_ms > self.client.request_delay_max_ms {
            return Err(AppError::validation(
                "client.request_delay_min_ms must not exceed request_delay_max_ms",
            ));
        }
        if self.client.page_delay_min_ms > self.client.page_delay_max_ms {
            return Err(AppError::validation(
                "client.page_delay_min_ms must not exceed page_delay_max_ms",
            ));
        }
        for (name, selector) in self.selectors.entries() {
            parse_selector(selector)
                .map_err(|e| AppError::validation(format!("selectors.{name}: {e}")))?;
        }
        Ok(())
    }
}

/// HTTP client and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Site root every relative link is resolved against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Lower bound of the random delay before every request
    #[serde(default = "defaults::request_delay_min")]
    pub request_delay_min_ms: u64,

    /// Upper bound of the random delay before every request
    #[serde(default = "defaults::request_delay_max")]
    pub request_delay_max_ms: u64,

    /// Lower bound of the random delay between listing pages
    #[serde(default = "defaults::page_delay_min")]
    pub page_delay_min_ms: u64,

    /// Upper bound of the random delay between listing pages
    #[serde(default = "defaults::page_delay_max")]
    pub page_delay_max_ms: u64,
}

impl ClientConfig {
    /// Client settings with every pacing delay disabled.
    pub fn without_delays(mut self) -> Self {
        self.request_delay_min_ms = 0;
        self.request_delay_max_ms = 0;
        self.page_delay_min_ms = 0;
        self.page_delay_max_ms = 0;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_min_ms: defaults::request_delay_min(),
            request_delay_max_ms: defaults::request_delay_max(),
            page_delay_min_ms: defaults::page_delay_min(),
            page_delay_max_ms: defaults::page_delay_max(),
        }
    }
}

/// Disk cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether reads and writes go to disk at all
    #[serde(default = "defaults::cache_enabled")]
    pub enabled: bool,

    /// Cache directory (platform cache dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Age in seconds after which an entry is treated as absent
    #[serde(default = "defaults::cache_expiry")]
    pub expiry_secs: u64,
}

impl CacheConfig {
    /// Directory the cache lives in.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(defaults::cache_dir)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::cache_enabled(),
            dir: None,
            expiry_secs: defaults::cache_expiry(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is not set
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Client defaults
    pub fn base_url() -> String {
        "https://pitchfork.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn request_delay_min() -> u64 {
        500
    }
    pub fn request_delay_max() -> u64 {
        1500
    }
    pub fn page_delay_min() -> u64 {
        1000
    }
    pub fn page_delay_max() -> u64 {
        2000
    }

    // Cache defaults
    pub fn cache_enabled() -> bool {
        true
    }
    pub fn cache_expiry() -> u64 {
        86_400
    }
    pub fn cache_dir() -> PathBuf {
        dirs::cache_dir()
            .map(|d| d.join("pitchfork-reviews"))
            .or_else(|| dirs::home_dir().map(|d| d.join(".pitchfork_api").join("cache")))
            .unwrap_or_else(|| PathBuf::from(".pitchfork_cache"))
    }

    // Logging defaults
    pub fn log_level() -> String {
        "warn".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.client.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_delays() {
        let mut config = Config::default();
        config.client.page_delay_min_ms = 5000;
        config.client.page_delay_max_ms = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.selectors.review_title = "[[invalid".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("review_title"));
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.client.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(AppError::Url(_))));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [cache]
            expiry_secs = 60

            [client]
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.cache.expiry_secs, 60);
        assert!(config.cache.enabled);
        assert_eq!(config.client.timeout_secs, 3);
        assert_eq!(config.client.base_url, "https://pitchfork.com");
        assert_eq!(config.selectors.review_title, "h1.review-title");
    }

    #[test]
    fn without_delays_zeroes_pacing() {
        let client = ClientConfig::default().without_delays();
        assert_eq!(client.request_delay_max_ms, 0);
        assert_eq!(client.page_delay_max_ms, 0);
        assert_eq!(client.timeout_secs, 10);
    }

    #[test]
    fn load_or_default_falls_back() {
        let config = Config::load_or_default("/definitely/not/here.toml");
        assert_eq!(config.cache.expiry_secs, 86_400);
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
