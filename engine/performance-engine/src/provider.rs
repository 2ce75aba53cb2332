//! Stats provider port

use crate::error::{Result, StatsError};
use crate::series::PlayerStatSeries;
use crate::transform::{derive_series, SeriesPerformance};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Source of per-player weekly stat series
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Fetch one player's series. Failures surface as `StatsUnavailable`.
    async fn fetch_player_stats(&self, player_id: &str) -> Result<PlayerStatSeries>;
}

/// Fetch, validate and transform one player's season
pub async fn fetch_performance<P>(provider: &P, player_id: &str) -> Result<SeriesPerformance>
where
    P: StatsProvider + ?Sized,
{
    let series = provider.fetch_player_stats(player_id).await?;

    if let Err(e) = series.validate() {
        warn!("Rejecting stat series for {}: {}", player_id, e);
        return Err(e);
    }

    debug!("Deriving performance for {} over {} weeks", player_id, series.weekly_stats.len());
    Ok(derive_series(&series))
}

/// Stats provider backed by preloaded series
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatsProvider {
    series: Arc<RwLock<HashMap<String, PlayerStatSeries>>>,
}

impl InMemoryStatsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(series: impl IntoIterator<Item = PlayerStatSeries>) -> Self {
        let series = series.into_iter().map(|s| (s.player_id.clone(), s)).collect();
        Self { series: Arc::new(RwLock::new(series)) }
    }

    pub async fn insert(&self, series: PlayerStatSeries) {
        self.series.write().await.insert(series.player_id.clone(), series);
    }

    pub async fn len(&self) -> usize {
        self.series.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.series.read().await.is_empty()
    }
}

#[async_trait]
impl StatsProvider for InMemoryStatsProvider {
    async fn fetch_player_stats(&self, player_id: &str) -> Result<PlayerStatSeries> {
        self.series
            .read()
            .await
            .get(player_id)
            .cloned()
            .ok_or_else(|| StatsError::unavailable(player_id, "no stats loaded for player"))
    }
}
