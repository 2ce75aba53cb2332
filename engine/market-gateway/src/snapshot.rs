//! Point-in-time market status

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Why a trade was refused by the market gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    MarketClosed,
    PlayerLocked,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::MarketClosed => write!(f, "market is closed"),
            BlockReason::PlayerLocked => write!(f, "player is locked"),
        }
    }
}

/// Market status as seen by the ledger at the moment of a trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub current_week: u32,
    pub is_open: bool,
    #[serde(default)]
    pub locked_player_ids: HashSet<String>,
}

impl MarketSnapshot {
    /// An open market with no locked players
    pub fn open(current_week: u32) -> Self {
        Self { current_week, is_open: true, locked_player_ids: HashSet::new() }
    }

    /// A closed market
    pub fn closed(current_week: u32) -> Self {
        Self { current_week, is_open: false, locked_player_ids: HashSet::new() }
    }

    /// Add locked players to the snapshot
    pub fn with_locked<I, S>(mut self, player_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locked_player_ids.extend(player_ids.into_iter().map(Into::into));
        self
    }

    pub fn is_locked(&self, player_id: &str) -> bool {
        self.locked_player_ids.contains(player_id)
    }

    /// Check whether a player may be traded right now.
    ///
    /// A closed market takes precedence over a player lock.
    pub fn check_tradable(&self, player_id: &str) -> Result<(), BlockReason> {
        if !self.is_open {
            return Err(BlockReason::MarketClosed);
        }

        if self.is_locked(player_id) {
            return Err(BlockReason::PlayerLocked);
        }

        Ok(())
    }
}
