//! Error types for the performance engine

use thiserror::Error;

/// Result type alias for performance engine operations
pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Stats unavailable for player {player_id}: {reason}")]
    StatsUnavailable { player_id: String, reason: String },

    #[error("Invalid stat series for player {player_id}: {reason}")]
    InvalidSeries { player_id: String, reason: String },

    #[error("Sleeper API error: {message}")]
    SleeperApi { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl StatsError {
    pub fn unavailable(player_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StatsUnavailable { player_id: player_id.into(), reason: reason.into() }
    }

    pub fn invalid_series(player_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSeries { player_id: player_id.into(), reason: reason.into() }
    }
}
