//! # Position Ledger
//!
//! Tracks simulated buy/sell positions on fantasy players and derives
//! realized P/L. The ledger is append-only: positions are opened, closed at
//! most once, and never removed.
//!
//! ## Architecture
//!
//! - **PositionLedger**: in-memory source of truth, gated by a [`MarketSnapshot`]
//! - **PersistenceGateway**: durable mirror, overwritten after every mutation
//! - **JsonFileGateway**: local JSON file implementation
//! - **InMemoryGateway**: in-memory implementation for tests
//!
//! ## Usage
//!
//! ```rust
//! use position_ledger::{InMemoryGateway, MarketSnapshot, PositionLedger, TradeAction};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut ledger = PositionLedger::load(InMemoryGateway::new()).await?;
//!     let market = MarketSnapshot::open(1);
//!
//!     let position = ledger.open("p1", "Player One", TradeAction::Buy, 10.0, &market).await?;
//!     ledger.close(position.id(), 15.0, &market).await?;
//!     assert_eq!(ledger.total_realized_pl(), 5.0);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod local;
pub mod position;

pub use config::LedgerConfig;
pub use error::{LedgerError, Result, StoreError, StoreResult};
pub use gateway::{InMemoryGateway, PersistenceGateway};
pub use ledger::{LedgerSummary, PositionLedger};
pub use local::JsonFileGateway;
pub use position::{Position, PositionId, PositionStatus, TradeAction};

/// Re-export market types the ledger gates on
pub use market_gateway::{BlockReason, MarketSnapshot};
