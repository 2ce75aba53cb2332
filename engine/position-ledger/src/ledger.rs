//! The position ledger
//!
//! Append-only history of positions for one user. Opening appends, closing
//! is the only in-place mutation, and nothing is ever removed. Every
//! successful mutation ends with one full-ledger save.

use crate::error::{LedgerError, Result};
use crate::gateway::PersistenceGateway;
use crate::position::{Position, PositionId, TradeAction};
use chrono::Utc;
use market_gateway::MarketSnapshot;
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate view of the ledger for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_realized_pl: f64,
    pub active_count: usize,
    pub total_count: usize,
    pub recent: Vec<Position>,
}

/// Ledger of positions backed by a persistence gateway
pub struct PositionLedger<G: PersistenceGateway> {
    positions: Vec<Position>,
    gateway: G,
}

impl<G: PersistenceGateway> PositionLedger<G> {
    /// Load the ledger from the gateway
    pub async fn load(gateway: G) -> Result<Self> {
        let positions = gateway.load().await.map_err(LedgerError::Load)?;
        tracing::info!("Position ledger loaded with {} positions", positions.len());
        Ok(Self { positions, gateway })
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Open a new position.
    ///
    /// Fails without touching the ledger if the price is invalid, the market
    /// is closed, or the player is locked.
    pub async fn open(
        &mut self,
        player_id: &str,
        player_name: &str,
        action: TradeAction,
        price: f64,
        market: &MarketSnapshot,
    ) -> Result<Position> {
        validate_price(price)?;
        check_market(player_id, market)?;

        let position = Position::new(
            PositionId::generate(),
            player_id,
            player_name,
            action,
            price,
            Utc::now(),
        );
        self.positions.push(position.clone());

        tracing::info!(
            "Opened {} position {} on {} ({}) at {:.2}",
            action,
            position.id(),
            player_name,
            player_id,
            price
        );

        self.persist(position.id()).await?;
        Ok(position)
    }

    /// Close an open position at `exit_price`.
    ///
    /// A second close of the same position is always rejected with
    /// `AlreadyClosed`.
    pub async fn close(
        &mut self,
        position_id: &PositionId,
        exit_price: f64,
        market: &MarketSnapshot,
    ) -> Result<Position> {
        let index = self
            .positions
            .iter()
            .position(|p| p.id() == position_id)
            .ok_or_else(|| LedgerError::NotFound(position_id.clone()))?;

        let position = &self.positions[index];
        if !position.is_open() {
            tracing::warn!("Rejected close of already closed position {}", position_id);
            return Err(LedgerError::AlreadyClosed(position_id.clone()));
        }
        validate_price(exit_price)?;
        check_market(position.player_id(), market)?;

        let position = &mut self.positions[index];
        if !position.close(exit_price, Utc::now()) {
            return Err(LedgerError::AlreadyClosed(position_id.clone()));
        }
        let closed = position.clone();

        tracing::info!(
            "Closed position {} on {} at {:.2} (entry {:.2})",
            position_id,
            closed.player_name(),
            exit_price,
            closed.entry_price()
        );

        self.persist(position_id).await?;
        Ok(closed)
    }

    /// Sum of `exit - entry` over closed buys. Closed sells are not counted.
    pub fn total_realized_pl(&self) -> f64 {
        self.positions.iter().filter_map(Position::realized_pl).sum()
    }

    /// Mark-to-market P/L of open buys priced in `marks` (player id -> price).
    /// Positions without a mark are skipped.
    pub fn total_unrealized_pl(&self, marks: &HashMap<String, f64>) -> f64 {
        self.positions
            .iter()
            .filter_map(|p| marks.get(p.player_id()).and_then(|price| p.unrealized_pl(*price)))
            .sum()
    }

    /// Open positions, in insertion order
    pub fn active_positions(&self) -> Vec<&Position> {
        self.positions.iter().filter(|p| p.is_open()).collect()
    }

    /// The last `n` positions, open or closed, in insertion order
    pub fn recent_transactions(&self, n: usize) -> &[Position] {
        let start = self.positions.len().saturating_sub(n);
        &self.positions[start..]
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn get(&self, position_id: &PositionId) -> Option<&Position> {
        self.positions.iter().find(|p| p.id() == position_id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn summary(&self, recent: usize) -> LedgerSummary {
        LedgerSummary {
            total_realized_pl: self.total_realized_pl(),
            active_count: self.positions.iter().filter(|p| p.is_open()).count(),
            total_count: self.positions.len(),
            recent: self.recent_transactions(recent).to_vec(),
        }
    }

    /// Write the full ledger. The in-memory mutation stands even if this fails.
    async fn persist(&self, position_id: &PositionId) -> Result<()> {
        self.gateway.save(&self.positions).await.map_err(|source| {
            tracing::error!("Failed to persist ledger after {}: {}", position_id, source);
            LedgerError::PersistenceFailure { position_id: position_id.clone(), source }
        })
    }
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(LedgerError::InvalidPrice { price });
    }
    Ok(())
}

fn check_market(player_id: &str, market: &MarketSnapshot) -> Result<()> {
    market.check_tradable(player_id).map_err(|reason| {
        tracing::info!("Trade on player {} blocked: {}", player_id, reason);
        LedgerError::TradingBlocked { player_id: player_id.to_string(), reason }
    })
}
