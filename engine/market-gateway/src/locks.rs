//! Player lock rules
//!
//! A player is locked from trading when they are on bye in the current week,
//! carry an out/IR injury designation, or their game is about to start.

use crate::config::MarketConfig;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// What the market knows about a player when deciding locks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLockInput {
    pub player_id: String,
    pub bye_week: Option<u32>,
    pub injury_status: Option<String>,
    pub game_start: Option<NaiveDateTime>,
}

impl PlayerLockInput {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self { player_id: player_id.into(), ..Default::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockCause {
    ByeWeek,
    Injury,
    GameStarting,
}

/// Lock rules configured from a [`MarketConfig`]
#[derive(Debug, Clone)]
pub struct LockRules {
    injury_statuses: Vec<String>,
    game_lock_lead: Duration,
}

impl LockRules {
    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            injury_statuses: config.locked_injury_statuses.clone(),
            game_lock_lead: Duration::seconds(config.game_lock_lead_secs),
        }
    }

    /// True once kickoff is less than the lead time away, or already past
    pub fn should_lock_for_game(&self, game_start: NaiveDateTime, now: NaiveDateTime) -> bool {
        game_start - now < self.game_lock_lead
    }

    /// First rule that locks the player, if any
    pub fn lock_cause(
        &self,
        player: &PlayerLockInput,
        current_week: u32,
        now: NaiveDateTime,
    ) -> Option<LockCause> {
        if player.bye_week == Some(current_week) {
            tracing::debug!("Player {} is on bye week {}", player.player_id, current_week);
            return Some(LockCause::ByeWeek);
        }

        if let Some(status) = &player.injury_status {
            if self.injury_statuses.iter().any(|s| s == status) {
                tracing::debug!("Player {} is injured: {}", player.player_id, status);
                return Some(LockCause::Injury);
            }
        }

        if let Some(game_start) = player.game_start {
            if self.should_lock_for_game(game_start, now) {
                tracing::debug!("Player {}'s game is starting, locking", player.player_id);
                return Some(LockCause::GameStarting);
            }
        }

        None
    }

    /// Ids of every locked player in `players`
    pub fn locked_ids<'a>(
        &'a self,
        players: &'a [PlayerLockInput],
        current_week: u32,
        now: NaiveDateTime,
    ) -> impl Iterator<Item = &'a str> + 'a {
        players
            .iter()
            .filter(move |p| self.lock_cause(p, current_week, now).is_some())
            .map(|p| p.player_id.as_str())
    }
}
