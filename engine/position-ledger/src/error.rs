//! Error types for the position ledger

use crate::position::PositionId;
use market_gateway::BlockReason;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Result type alias for persistence gateway operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by ledger operations.
///
/// Every variant except `PersistenceFailure` is raised before the ledger is
/// touched, so the in-memory state is unchanged when one is returned.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Trading blocked for player {player_id}: {reason}")]
    TradingBlocked { player_id: String, reason: BlockReason },

    #[error("Position not found: {0}")]
    NotFound(PositionId),

    #[error("Position already closed: {0}")]
    AlreadyClosed(PositionId),

    #[error("Invalid price {price}: must be a finite, non-negative number")]
    InvalidPrice { price: f64 },

    #[error("Failed to persist ledger after updating position {position_id}: {source}")]
    PersistenceFailure {
        position_id: PositionId,
        #[source]
        source: StoreError,
    },

    #[error("Failed to load ledger: {0}")]
    Load(#[source] StoreError),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl LedgerError {
    /// Reason a trade was blocked, if it was
    pub fn block_reason(&self) -> Option<BlockReason> {
        match self {
            LedgerError::TradingBlocked { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Errors raised by persistence gateways
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create a new unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
