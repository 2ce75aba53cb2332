//! # Performance Engine
//!
//! Converts a player's weekly actual vs projected fantasy points into the
//! signed over/under series used for charting, plus season aggregates.
//!
//! ## Architecture
//!
//! - **PlayerStatSeries**: validated per-week actual/projected pairs
//! - **derive_series**: pure transform into [`WeeklyDelta`]s and [`SeriesPerformance`]
//! - **StatsProvider**: injected source of series
//!   ([`SleeperStatsProvider`], [`InMemoryStatsProvider`])
//! - **scoring**: full-PPR points from raw box-score lines

pub mod config;
pub mod error;
pub mod provider;
pub mod scoring;
pub mod series;
pub mod sleeper;
pub mod transform;

pub use config::StatsConfig;
pub use error::{Result, StatsError};
pub use provider::{fetch_performance, InMemoryStatsProvider, StatsProvider};
pub use scoring::{ppr_points, ppr_points_by_player, RawStatLine};
pub use series::{PlayerStatSeries, WeeklyStat};
pub use sleeper::SleeperStatsProvider;
pub use transform::{derive_series, SeriesPerformance, WeeklyDelta};
