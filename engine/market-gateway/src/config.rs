//! Configuration for the market calendar and lock rules

use crate::error::{MarketError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Injury designations that take a player off the board
pub const DEFAULT_LOCKED_INJURY_STATUSES: [&str; 4] = ["O", "IR", "Out", "IR-R"];

/// Market configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// NFL season year (e.g., 2024)
    pub season: i32,

    /// First day of week 1
    pub season_start: NaiveDate,

    /// Hour on Sunday at which the market closes (local time, 24h clock)
    pub sunday_close_hour: u32,

    /// Last regular-season week
    pub max_week: u32,

    /// Players are locked once kickoff is closer than this many seconds
    pub game_lock_lead_secs: i64,

    /// Injury statuses that lock a player
    pub locked_injury_statuses: Vec<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self::for_season(2024)
    }
}

impl MarketConfig {
    /// Default calendar for a season, with week 1 starting September 5th
    pub fn for_season(season: i32) -> Self {
        Self {
            season,
            season_start: NaiveDate::from_ymd_opt(season, 9, 5).unwrap_or(NaiveDate::MIN),
            sunday_close_hour: 13, // 1 PM kickoff window
            max_week: 18,
            game_lock_lead_secs: 300, // 5 minutes
            locked_injury_statuses: DEFAULT_LOCKED_INJURY_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let season = match std::env::var("MARKET_SEASON") {
            Ok(raw) => raw
                .parse::<i32>()
                .map_err(|_| MarketError::config(format!("Invalid MARKET_SEASON: {raw}")))?,
            Err(_) => 2024,
        };

        let mut config = Self::for_season(season);

        if let Ok(raw) = std::env::var("MARKET_SEASON_START") {
            config.season_start = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                MarketError::config(format!(
                    "Invalid MARKET_SEASON_START (expected YYYY-MM-DD): {raw}"
                ))
            })?;
        }

        if let Ok(raw) = std::env::var("MARKET_SUNDAY_CLOSE_HOUR") {
            config.sunday_close_hour = raw.parse().map_err(|_| {
                MarketError::config(format!("Invalid MARKET_SUNDAY_CLOSE_HOUR: {raw}"))
            })?;
        }

        if let Ok(raw) = std::env::var("MARKET_MAX_WEEK") {
            config.max_week = raw
                .parse()
                .map_err(|_| MarketError::config(format!("Invalid MARKET_MAX_WEEK: {raw}")))?;
        }

        if let Ok(raw) = std::env::var("MARKET_GAME_LOCK_LEAD_SECS") {
            config.game_lock_lead_secs = raw.parse().map_err(|_| {
                MarketError::config(format!("Invalid MARKET_GAME_LOCK_LEAD_SECS: {raw}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.sunday_close_hour > 23 {
            return Err(MarketError::config("sunday_close_hour must be between 0 and 23"));
        }

        if self.max_week == 0 {
            return Err(MarketError::config("max_week must be greater than 0"));
        }

        if self.game_lock_lead_secs < 0 {
            return Err(MarketError::config("game_lock_lead_secs must not be negative"));
        }

        Ok(())
    }
}
