//! Position records tracked by the ledger
//!
//! A position is opened once and closed at most once. The in-memory model
//! keeps the exit as a tagged variant; the persisted shape keeps the flat
//! record with optional `exitPrice` / `exitTimestamp` fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque position identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(String);

impl PositionId {
    /// Generate a fresh, unique identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PositionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PositionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Trade action enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "buy"),
            TradeAction::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for TradeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeAction::Buy),
            "sell" => Ok(TradeAction::Sell),
            other => Err(format!("unknown trade action '{other}' (expected buy or sell)")),
        }
    }
}

/// Lifecycle state of a position. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionStatus {
    Open,
    Closed { exit_price: f64, exit_timestamp: DateTime<Utc> },
}

/// One simulated buy or sell against a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PositionRecord", into = "PositionRecord")]
pub struct Position {
    id: PositionId,
    player_id: String,
    player_name: String,
    action: TradeAction,
    entry_price: f64,
    entry_timestamp: DateTime<Utc>,
    status: PositionStatus,
}

impl Position {
    /// Create a new open position
    pub fn new(
        id: PositionId,
        player_id: impl Into<String>,
        player_name: impl Into<String>,
        action: TradeAction,
        entry_price: f64,
        entry_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            player_id: player_id.into(),
            player_name: player_name.into(),
            action,
            entry_price,
            entry_timestamp,
            status: PositionStatus::Open,
        }
    }

    pub fn id(&self) -> &PositionId {
        &self.id
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn action(&self) -> TradeAction {
        self.action
    }

    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    pub fn entry_timestamp(&self) -> DateTime<Utc> {
        self.entry_timestamp
    }

    pub fn status(&self) -> PositionStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, PositionStatus::Open)
    }

    pub fn exit_price(&self) -> Option<f64> {
        match self.status {
            PositionStatus::Closed { exit_price, .. } => Some(exit_price),
            PositionStatus::Open => None,
        }
    }

    pub fn exit_timestamp(&self) -> Option<DateTime<Utc>> {
        match self.status {
            PositionStatus::Closed { exit_timestamp, .. } => Some(exit_timestamp),
            PositionStatus::Open => None,
        }
    }

    /// Realized P/L under the long-only rule: closed buys only.
    ///
    /// Closed sells return `None` and are left out of ledger totals.
    pub fn realized_pl(&self) -> Option<f64> {
        match (self.action, self.status) {
            (TradeAction::Buy, PositionStatus::Closed { exit_price, .. }) => {
                Some(exit_price - self.entry_price)
            }
            _ => None,
        }
    }

    /// Mark-to-market P/L of an open buy at `current_price`
    pub fn unrealized_pl(&self, current_price: f64) -> Option<f64> {
        match (self.action, self.status) {
            (TradeAction::Buy, PositionStatus::Open) => Some(current_price - self.entry_price),
            _ => None,
        }
    }

    /// Close the position. Returns false, leaving it untouched, if it was already closed.
    pub(crate) fn close(&mut self, exit_price: f64, exit_timestamp: DateTime<Utc>) -> bool {
        if !self.is_open() {
            return false;
        }

        self.status = PositionStatus::Closed { exit_price, exit_timestamp };
        true
    }
}

/// Persisted shape of a position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionRecord {
    id: PositionId,
    player_id: String,
    player_name: String,
    action: TradeAction,
    entry_price: f64,
    entry_timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exit_timestamp: Option<DateTime<Utc>>,
}

impl From<Position> for PositionRecord {
    fn from(position: Position) -> Self {
        let exit_price = position.exit_price();
        let exit_timestamp = position.exit_timestamp();

        Self {
            id: position.id,
            player_id: position.player_id,
            player_name: position.player_name,
            action: position.action,
            entry_price: position.entry_price,
            entry_timestamp: position.entry_timestamp,
            exit_price,
            exit_timestamp,
        }
    }
}

impl TryFrom<PositionRecord> for Position {
    type Error = String;

    fn try_from(record: PositionRecord) -> Result<Self, Self::Error> {
        let status = match (record.exit_price, record.exit_timestamp) {
            (None, None) => PositionStatus::Open,
            (Some(exit_price), Some(exit_timestamp)) => {
                PositionStatus::Closed { exit_price, exit_timestamp }
            }
            _ => {
                return Err(format!(
                    "position {} has only one of exitPrice/exitTimestamp",
                    record.id
                ))
            }
        };

        Ok(Self {
            id: record.id,
            player_id: record.player_id,
            player_name: record.player_name,
            action: record.action,
            entry_price: record.entry_price,
            entry_timestamp: record.entry_timestamp,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 15, 18, 30, 0).unwrap()
    }

    fn buy(entry: f64) -> Position {
        Position::new(
            PositionId::from("pos-1"),
            "4046",
            "Patrick Mahomes",
            TradeAction::Buy,
            entry,
            entry_time(),
        )
    }

    #[test]
    fn test_new_position_is_open() {
        let position = buy(10.0);
        assert!(position.is_open());
        assert_eq!(position.exit_price(), None);
        assert_eq!(position.exit_timestamp(), None);
        assert_eq!(position.realized_pl(), None);
    }

    #[test]
    fn test_close_is_single_shot() {
        let mut position = buy(10.0);
        let closed_at = entry_time() + chrono::Duration::days(2);

        assert!(position.close(15.0, closed_at));
        assert_eq!(position.exit_price(), Some(15.0));
        assert_eq!(position.exit_timestamp(), Some(closed_at));

        // Second close leaves the first exit in place
        assert!(!position.close(99.0, closed_at + chrono::Duration::days(1)));
        assert_eq!(position.exit_price(), Some(15.0));
        assert_eq!(position.exit_timestamp(), Some(closed_at));
    }

    #[test]
    fn test_realized_pl_long_only() {
        let mut long = buy(10.0);
        long.close(15.0, entry_time());
        assert_eq!(long.realized_pl(), Some(5.0));

        let mut short = Position::new(
            PositionId::generate(),
            "p2",
            "Player Two",
            TradeAction::Sell,
            20.0,
            entry_time(),
        );
        short.close(12.0, entry_time());
        assert_eq!(short.realized_pl(), None);
    }

    #[test]
    fn test_unrealized_pl() {
        let position = buy(10.0);
        assert_eq!(position.unrealized_pl(12.5), Some(2.5));

        let mut closed = buy(10.0);
        closed.close(11.0, entry_time());
        assert_eq!(closed.unrealized_pl(12.5), None);
    }

    #[test]
    fn test_open_position_omits_exit_fields() {
        let json = serde_json::to_value(buy(10.0)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object["playerId"], "4046");
        assert_eq!(object["playerName"], "Patrick Mahomes");
        assert_eq!(object["action"], "buy");
        assert_eq!(object["entryPrice"], 10.0);
        assert!(!object.contains_key("exitPrice"));
        assert!(!object.contains_key("exitTimestamp"));
    }

    #[test]
    fn test_closed_position_round_trip() {
        let mut position = buy(10.0);
        position.close(15.0, entry_time() + chrono::Duration::hours(4));

        let json = serde_json::to_string(&position).unwrap();
        let restored: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, position);
    }

    #[test]
    fn test_half_closed_record_rejected() {
        let json = r#"{
            "id": "p1-1697040000000",
            "playerId": "p1",
            "playerName": "Player One",
            "action": "buy",
            "entryPrice": 10.0,
            "entryTimestamp": "2024-10-15T18:30:00Z",
            "exitPrice": 12.0
        }"#;
        assert!(serde_json::from_str::<Position>(json).is_err());
    }

    #[test]
    fn test_trade_action_parsing() {
        assert_eq!("buy".parse::<TradeAction>().unwrap(), TradeAction::Buy);
        assert_eq!("SELL".parse::<TradeAction>().unwrap(), TradeAction::Sell);
        assert!("hold".parse::<TradeAction>().is_err());
    }
}
