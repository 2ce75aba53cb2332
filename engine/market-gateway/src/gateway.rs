//! Market gateway trait and implementations

use crate::config::MarketConfig;
use crate::error::Result;
use crate::locks::{LockRules, PlayerLockInput};
use crate::schedule::MarketSchedule;
use crate::snapshot::MarketSnapshot;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Source of the freshest market status
#[async_trait::async_trait]
pub trait MarketGateway: Send + Sync {
    /// Fetch the current market status
    async fn fetch_status(&self) -> Result<MarketSnapshot>;
}

/// Gateway that always answers with a configured snapshot (tests, replays)
#[derive(Debug, Clone)]
pub struct StaticMarketGateway {
    snapshot: Arc<RwLock<MarketSnapshot>>,
}

impl StaticMarketGateway {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self { snapshot: Arc::new(RwLock::new(snapshot)) }
    }

    /// Load a snapshot from a JSON file
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: MarketSnapshot = serde_json::from_str(&raw)?;
        Ok(Self::new(snapshot))
    }

    /// Replace the snapshot returned by subsequent fetches
    pub async fn set(&self, snapshot: MarketSnapshot) {
        *self.snapshot.write().await = snapshot;
    }
}

#[async_trait::async_trait]
impl MarketGateway for StaticMarketGateway {
    async fn fetch_status(&self) -> Result<MarketSnapshot> {
        Ok(self.snapshot.read().await.clone())
    }
}

/// Gateway that derives status from the trading calendar and lock rules
#[derive(Debug, Clone)]
pub struct ScheduleMarketGateway {
    schedule: MarketSchedule,
    rules: LockRules,
    players: Vec<PlayerLockInput>,
}

impl ScheduleMarketGateway {
    pub fn new(config: MarketConfig) -> Result<Self> {
        config.validate()?;
        let rules = LockRules::from_config(&config);
        Ok(Self { schedule: MarketSchedule::new(config), rules, players: Vec::new() })
    }

    /// Players evaluated against the lock rules on every fetch
    pub fn with_players(mut self, players: Vec<PlayerLockInput>) -> Self {
        self.players = players;
        self
    }

    pub fn schedule(&self) -> &MarketSchedule {
        &self.schedule
    }

    /// Market status at a specific moment
    pub fn snapshot_at(&self, now: NaiveDateTime) -> MarketSnapshot {
        let current_week = self.schedule.current_week(now);
        let is_open = self.schedule.is_open(now);
        let locked_player_ids =
            self.rules.locked_ids(&self.players, current_week, now).map(String::from).collect();

        MarketSnapshot { current_week, is_open, locked_player_ids }
    }
}

#[async_trait::async_trait]
impl MarketGateway for ScheduleMarketGateway {
    async fn fetch_status(&self) -> Result<MarketSnapshot> {
        let now = chrono::Local::now().naive_local();
        let snapshot = self.snapshot_at(now);

        tracing::debug!(
            "Market status: week {}, open {}, {} locked players",
            snapshot.current_week,
            snapshot.is_open,
            snapshot.locked_player_ids.len()
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_static_gateway_returns_latest_snapshot() {
        let gateway = StaticMarketGateway::new(MarketSnapshot::open(4));
        assert!(gateway.fetch_status().await.unwrap().is_open);

        gateway.set(MarketSnapshot::closed(4)).await;
        assert!(!gateway.fetch_status().await.unwrap().is_open);
    }

    #[test]
    fn test_schedule_gateway_snapshot() {
        let players = vec![
            PlayerLockInput { bye_week: Some(7), ..PlayerLockInput::new("4046") },
            PlayerLockInput::new("6794"),
        ];
        let gateway =
            ScheduleMarketGateway::new(MarketConfig::default()).unwrap().with_players(players);

        // Thursday of week 7
        let snapshot = gateway.snapshot_at(at(17, 10));
        assert_eq!(snapshot.current_week, 7);
        assert!(snapshot.is_open);
        assert!(snapshot.is_locked("4046"));
        assert!(!snapshot.is_locked("6794"));

        // Sunday afternoon
        let snapshot = gateway.snapshot_at(at(20, 16));
        assert!(!snapshot.is_open);
    }

    #[test]
    fn test_schedule_gateway_rejects_invalid_config() {
        let config = MarketConfig { max_week: 0, ..MarketConfig::default() };
        assert!(ScheduleMarketGateway::new(config).is_err());
    }

    #[tokio::test]
    async fn test_schedule_gateway_fetch() {
        let gateway = ScheduleMarketGateway::new(MarketConfig::default()).unwrap();
        let snapshot = gateway.fetch_status().await.unwrap();
        assert!(snapshot.current_week <= 18);
        assert!(snapshot.locked_player_ids.is_empty());
    }
}
