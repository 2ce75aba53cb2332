//! Sleeper API stats provider

use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use crate::provider::StatsProvider;
use crate::scoring::{round2, RawStatLine};
use crate::series::{PlayerStatSeries, WeeklyStat};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Cached endpoint response
#[derive(Debug, Clone)]
struct CachedResponse {
    body: Arc<Value>,
    fetched_at: Instant,
}

/// Stats provider over the public Sleeper API.
///
/// Actual points are scored from weekly stat lines, projections come from
/// Sleeper's `pts_ppr` when present. Responses are cached per endpoint for
/// `cache_ttl_secs`.
#[derive(Debug)]
pub struct SleeperStatsProvider {
    config: StatsConfig,
    client: reqwest::Client,
    cache: Mutex<HashMap<String, CachedResponse>>,
}

impl SleeperStatsProvider {
    /// Create a new Sleeper stats provider
    pub fn new(config: StatsConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self { config, client, cache: Mutex::new(HashMap::new()) })
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Drop all cached responses
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    async fn get_json(&self, endpoint: &str) -> Result<Arc<Value>> {
        {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache.get(endpoint) {
                if cached.fetched_at.elapsed() < self.config.cache_ttl() {
                    debug!("Cache hit for {}", endpoint);
                    return Ok(Arc::clone(&cached.body));
                }
            }
        }

        let url = format!("{}/{}", self.config.api_base_url, endpoint);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(StatsError::SleeperApi {
                message: format!("{} returned {}", endpoint, response.status()),
            });
        }

        let body = Arc::new(response.json::<Value>().await?);
        self.cache.lock().await.insert(
            endpoint.to_string(),
            CachedResponse { body: Arc::clone(&body), fetched_at: Instant::now() },
        );

        Ok(body)
    }

    async fn fetch_series(&self, player_id: &str) -> Result<PlayerStatSeries> {
        let players = self.get_json("players/nfl").await?;
        let entry = players.get(player_id).ok_or_else(|| {
            StatsError::unavailable(player_id, "player not found in Sleeper directory")
        })?;

        let mut series = player_identity(player_id, entry);
        let season = self.config.season;

        for week in 1..=self.config.through_week {
            let stats = self.get_json(&format!("stats/nfl/{season}/{week}")).await?;

            let projections =
                match self.get_json(&format!("projections/nfl/{season}/{week}")).await {
                    Ok(projections) => Some(projections),
                    Err(e) => {
                        warn!("Could not fetch week {} projections: {}", week, e);
                        None
                    }
                };

            let projection = projections.as_deref().and_then(|p| p.get(player_id));
            if let Some(stat) = week_stat(week, stats.get(player_id), projection) {
                series.weekly_stats.push(stat);
            }
        }

        Ok(series)
    }
}

#[async_trait]
impl StatsProvider for SleeperStatsProvider {
    async fn fetch_player_stats(&self, player_id: &str) -> Result<PlayerStatSeries> {
        match self.fetch_series(player_id).await {
            Ok(series) => {
                info!("Fetched {} weeks of stats for {}", series.weekly_stats.len(), player_id);
                Ok(series)
            }
            Err(e @ StatsError::StatsUnavailable { .. }) => Err(e),
            Err(e) => {
                warn!("Stats fetch failed for {}: {}", player_id, e);
                Err(StatsError::unavailable(player_id, e.to_string()))
            }
        }
    }
}

/// Build an empty series from a `players/nfl` directory entry
fn player_identity(player_id: &str, entry: &Value) -> PlayerStatSeries {
    let field = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_string);

    let name = field("full_name")
        .or_else(|| match (field("first_name"), field("last_name")) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => None,
        })
        .unwrap_or_else(|| player_id.to_string());

    PlayerStatSeries::new(player_id, name, field("position").unwrap_or_default(), field("team"))
}

/// One week's stat point, or `None` when the player logged no stats that week
fn week_stat(week: u32, stats: Option<&Value>, projection: Option<&Value>) -> Option<WeeklyStat> {
    let actual = score_entry(stats?)?;

    let projected = projection
        .and_then(|p| p.get("pts_ppr").and_then(Value::as_f64).or_else(|| score_entry(p)))
        .map(|points| round2(points).max(0.0))
        .unwrap_or(0.0);

    Some(WeeklyStat::new(week, actual, projected))
}

fn score_entry(entry: &Value) -> Option<f64> {
    match serde_json::from_value::<RawStatLine>(entry.clone()) {
        Ok(line) => Some(line.ppr_points()),
        Err(e) => {
            warn!("Unreadable stat line, skipping: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_identity() {
        let entry = json!({"full_name": "CeeDee Lamb", "position": "WR", "team": "DAL"});
        let series = player_identity("6786", &entry);
        assert_eq!(series.name, "CeeDee Lamb");
        assert_eq!(series.position, "WR");
        assert_eq!(series.team.as_deref(), Some("DAL"));
        assert!(series.weekly_stats.is_empty());
    }

    #[test]
    fn test_player_identity_fallbacks() {
        let entry = json!({"first_name": "Travis", "last_name": "Kelce", "team": null});
        let series = player_identity("1466", &entry);
        assert_eq!(series.name, "Travis Kelce");
        assert_eq!(series.position, "");
        assert_eq!(series.team, None);
    }

    #[test]
    fn test_week_stat_scores_actual_and_uses_projection_points() {
        let stats = json!({"rec": 8, "rec_yd": 120, "rec_td": 1});
        let projection = json!({"rec": 6, "rec_yd": 80, "pts_ppr": 14.04});

        let stat = week_stat(3, Some(&stats), Some(&projection)).unwrap();
        assert_eq!(stat.week, 3);
        assert_eq!(stat.actual, 26.0);
        assert_eq!(stat.projected, 14.04);
    }

    #[test]
    fn test_week_stat_scores_projection_without_points() {
        let stats = json!({"rush_yd": 85, "rush_td": 2});
        let projection = json!({"rush_yd": 70, "rush_td": 1});

        let stat = week_stat(1, Some(&stats), Some(&projection)).unwrap();
        assert_eq!(stat.actual, 20.5);
        assert_eq!(stat.projected, 13.0);
    }

    #[test]
    fn test_week_stat_missing_projection_is_zero() {
        let stats = json!({"pass_yd": 350, "pass_td": 3, "pass_int": 1});
        let stat = week_stat(1, Some(&stats), None).unwrap();
        assert_eq!(stat.actual, 30.0);
        assert_eq!(stat.projected, 0.0);
    }

    #[test]
    fn test_week_stat_skips_weeks_without_stats() {
        assert!(week_stat(7, None, Some(&json!({"pts_ppr": 12.0}))).is_none());
    }

    #[test]
    fn test_negative_week_is_kept() {
        let stats = json!({"fum_lost": 1});
        let stat = week_stat(2, Some(&stats), None).unwrap();
        assert_eq!(stat.actual, -2.0);
    }

    #[test]
    fn test_null_counter_scores_as_zero() {
        let stats = json!({"rec": 5, "rec_yd": 60, "rush_yd": null});
        let stat = week_stat(1, Some(&stats), None).unwrap();
        assert_eq!(stat.actual, 11.0);
    }

    #[test]
    fn test_malformed_stat_line_skips_week() {
        let stats = json!({"rec": "five"});
        assert!(week_stat(1, Some(&stats), None).is_none());
    }

    #[test]
    fn test_negative_projection_is_floored() {
        let projection = json!({"fum_lost": 1});
        let stat = week_stat(4, Some(&json!({"rec": 2})), Some(&projection)).unwrap();
        assert_eq!(stat.projected, 0.0);

        let series = PlayerStatSeries {
            weekly_stats: vec![stat],
            ..player_identity("6786", &json!({"full_name": "CeeDee Lamb"}))
        };
        assert!(series.validate().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = StatsConfig { request_timeout_secs: 0, ..Default::default() };
        assert!(matches!(SleeperStatsProvider::new(config), Err(StatsError::InvalidConfig { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_api_maps_to_unavailable() {
        let config = StatsConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            through_week: 1,
            request_timeout_secs: 1,
            ..Default::default()
        };
        let provider = SleeperStatsProvider::new(config).unwrap();

        let err = provider.fetch_player_stats("6786").await.unwrap_err();
        assert!(matches!(
            err,
            StatsError::StatsUnavailable { ref player_id, .. } if player_id == "6786"
        ));
    }
}
