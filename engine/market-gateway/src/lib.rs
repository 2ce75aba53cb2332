//! # Market Gateway
//!
//! Point-in-time market status for the fantasy position ledger: which NFL week
//! is current, whether trading is open, and which players are locked.
//!
//! ## Architecture
//!
//! - **MarketSnapshot**: the read-only status the ledger gates mutations on
//! - **MarketSchedule**: weekly trading calendar (open Monday through Sunday kickoff)
//! - **LockRules**: bye week, injury and game-time player locks
//! - **MarketGateway**: async port returning the freshest snapshot
//!
//! ## Usage
//!
//! ```rust
//! use market_gateway::{BlockReason, MarketSnapshot};
//!
//! let market = MarketSnapshot::open(5).with_locked(["4034"]);
//! assert_eq!(market.check_tradable("4034"), Err(BlockReason::PlayerLocked));
//! assert!(market.check_tradable("6794").is_ok());
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod locks;
pub mod schedule;
pub mod snapshot;

pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use gateway::{MarketGateway, ScheduleMarketGateway, StaticMarketGateway};
pub use locks::{LockCause, LockRules, PlayerLockInput};
pub use schedule::MarketSchedule;
pub use snapshot::{BlockReason, MarketSnapshot};
