//! Configuration for player stats providers

use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Stats provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Sleeper API base URL
    pub api_base_url: String,

    /// NFL season to pull stats for
    pub season: u32,

    /// Last week to include in a series
    pub through_week: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// How long fetched weeks stay cached, in seconds
    pub cache_ttl_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.sleeper.app/v1".to_string(),
            season: 2024,
            through_week: 18,
            request_timeout_secs: 10,
            cache_ttl_secs: 300,
        }
    }
}

impl StatsConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SLEEPER_API_BASE_URL") {
            config.api_base_url = url;
        }

        if let Ok(raw) = std::env::var("STATS_SEASON") {
            config.season = parse_var("STATS_SEASON", &raw)?;
        }

        if let Ok(raw) = std::env::var("STATS_THROUGH_WEEK") {
            config.through_week = parse_var("STATS_THROUGH_WEEK", &raw)?;
        }

        if let Ok(raw) = std::env::var("STATS_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_var("STATS_TIMEOUT_SECS", &raw)?;
        }

        if let Ok(raw) = std::env::var("STATS_CACHE_TTL_SECS") {
            config.cache_ttl_secs = parse_var("STATS_CACHE_TTL_SECS", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(StatsError::InvalidConfig {
                message: "api_base_url must not be empty".to_string(),
            });
        }

        if !(1..=18).contains(&self.through_week) {
            let week = self.through_week;
            return Err(StatsError::InvalidConfig {
                message: format!("through_week must be between 1 and 18, got {week}"),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(StatsError::InvalidConfig {
                message: "request_timeout_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| StatsError::InvalidConfig { message: format!("Invalid {name}: {raw}") })
}
