//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Shared HTTP client settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Ranked listing page settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Detail API settings
    #[serde(default)]
    pub detail: DetailConfig,

    /// Per-game page settings (weight extraction)
    #[serde(default)]
    pub game_page: GamePageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
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
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        url::Url::parse(&self.listing.base_url)?;
        url::Url::parse(&self.detail.api_url)?;
        url::Url::parse(&self.game_page.base_url)?;
        if self.listing.timeout_secs == 0 {
            return Err(AppError::config("listing.timeout_secs must be > 0"));
        }
        if self.listing.max_concurrent == 0 {
            return Err(AppError::config("listing.max_concurrent must be > 0"));
        }
        if self.detail.timeout_secs == 0 {
            return Err(AppError::config("detail.timeout_secs must be > 0"));
        }
        if !(1..=10).contains(&self.detail.max_concurrent) {
            return Err(AppError::config("detail.max_concurrent must be in 1..=10"));
        }
        if self.game_page.timeout_secs == 0 {
            return Err(AppError::config("game_page.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
        }
    }
}

/// Ranked listing page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Base URL of the paginated listing; the page number is appended
    #[serde(default = "defaults::listing_base_url")]
    pub base_url: String,

    /// Query string applied to every listing page
    #[serde(default = "defaults::filter_params")]
    pub filter_params: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::listing_timeout")]
    pub timeout_secs: u64,

    /// Listing pages in flight at once
    #[serde(default = "defaults::listing_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::listing_base_url(),
            filter_params: defaults::filter_params(),
            timeout_secs: defaults::listing_timeout(),
            max_concurrent: defaults::listing_concurrent(),
        }
    }
}

/// Detail API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailConfig {
    /// Batch detail API endpoint
    #[serde(default = "defaults::detail_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds; the API is slow for large batches
    #[serde(default = "defaults::detail_timeout")]
    pub timeout_secs: u64,

    /// Detail batches in flight at once (deployment profiles use 1-10)
    #[serde(default = "defaults::detail_concurrent")]
    pub max_concurrent: usize,

    /// Fixed delay before the first detail call, in seconds
    #[serde(default = "defaults::startup_delay")]
    pub startup_delay_secs: u64,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::detail_api_url(),
            timeout_secs: defaults::detail_timeout(),
            max_concurrent: defaults::detail_concurrent(),
            startup_delay_secs: defaults::startup_delay(),
        }
    }
}

/// Per-game page settings, used by the weight extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePageConfig {
    /// Base URL of the per-game page; the game id is appended
    #[serde(default = "defaults::game_page_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::listing_timeout")]
    pub timeout_secs: u64,
}

impl Default for GamePageConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::game_page_base_url(),
            timeout_secs: defaults::listing_timeout(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; bgcrawl/0.1)".into()
    }
    pub fn listing_base_url() -> String {
        "https://boardgamegeek.com/browse/boardgame/page".into()
    }
    pub fn filter_params() -> String {
        "sort=rank".into()
    }
    pub fn listing_timeout() -> u64 {
        240
    }
    pub fn listing_concurrent() -> usize {
        2
    }
    pub fn detail_api_url() -> String {
        "https://boardgamegeek.com/xmlapi2/thing".into()
    }
    pub fn detail_timeout() -> u64 {
        900
    }
    pub fn detail_concurrent() -> usize {
        1
    }
    pub fn startup_delay() -> u64 {
        30
    }
    pub fn game_page_base_url() -> String {
        "https://boardgamegeek.com/boardgame".into()
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
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_endpoint_urls() {
        let mut config = Config::default();
        config.listing.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(crate::error::AppError::Url(_))
        ));

        let mut config = Config::default();
        config.detail.api_url = "://missing-scheme".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_listing_concurrency() {
        let mut config = Config::default();
        config.listing.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_bounds_detail_concurrency_to_profile_range() {
        let mut config = Config::default();
        config.detail.max_concurrent = 11;
        assert!(config.validate().is_err());
        config.detail.max_concurrent = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn defaults_match_source_endpoints() {
        let config = Config::default();
        assert_eq!(
            config.listing.base_url,
            "https://boardgamegeek.com/browse/boardgame/page"
        );
        assert_eq!(config.listing.filter_params, "sort=rank");
        assert_eq!(config.listing.timeout_secs, 240);
        assert_eq!(config.detail.timeout_secs, 900);
        assert_eq!(config.detail.max_concurrent, 1);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [detail]
            max_concurrent = 4
            startup_delay_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.detail.max_concurrent, 4);
        assert_eq!(config.detail.startup_delay_secs, 0);
        assert_eq!(config.listing.max_concurrent, 2);
    }
}
