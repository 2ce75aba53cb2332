//! Per-player weekly stat series

use crate::error::{Result, StatsError};
use serde::{Deserialize, Deserializer, Serialize};

/// One week of actual vs projected fantasy points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStat {
    pub week: u32,
    pub actual: f64,
    /// Missing projections count as zero
    #[serde(default, deserialize_with = "null_as_zero")]
    pub projected: f64,
}

impl WeeklyStat {
    pub fn new(week: u32, actual: f64, projected: f64) -> Self {
        Self { week, actual, projected }
    }

    /// Signed over/under amount, `actual - projected`
    pub fn diff(&self) -> f64 {
        self.actual - self.projected
    }
}

pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A player's weekly record for the season, ordered by week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatSeries {
    #[serde(alias = "player_id")]
    pub player_id: String,
    pub name: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, alias = "weekly_stats")]
    pub weekly_stats: Vec<WeeklyStat>,
}

impl PlayerStatSeries {
    pub fn new(
        player_id: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<String>,
        team: Option<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            position: position.into(),
            team,
            weekly_stats: Vec::new(),
        }
    }

    pub fn with_weeks(mut self, weekly_stats: Vec<WeeklyStat>) -> Self {
        self.weekly_stats = weekly_stats;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.weekly_stats.is_empty()
    }

    /// Check the series invariants: weeks start at 1 and strictly increase,
    /// points are finite, projections are non-negative. Actual points may
    /// go below zero (fumble or interception-only weeks).
    pub fn validate(&self) -> Result<()> {
        let mut previous_week = 0;

        for stat in &self.weekly_stats {
            if stat.week == 0 {
                return Err(StatsError::invalid_series(&self.player_id, "week numbers start at 1"));
            }

            if stat.week <= previous_week {
                return Err(StatsError::invalid_series(
                    &self.player_id,
                    format!("week {} follows week {}", stat.week, previous_week),
                ));
            }
            previous_week = stat.week;

            for (label, points) in [("actual", stat.actual), ("projected", stat.projected)] {
                if !points.is_finite() {
                    return Err(StatsError::invalid_series(
                        &self.player_id,
                        format!("week {} has invalid {} points {}", stat.week, label, points),
                    ));
                }
            }

            if stat.projected < 0.0 {
                return Err(StatsError::invalid_series(
                    &self.player_id,
                    format!("week {} has negative projection {}", stat.week, stat.projected),
                ));
            }
        }

        Ok(())
    }

    /// Mean actual points per week, 0 for an empty series
    pub fn season_average(&self) -> f64 {
        if self.weekly_stats.is_empty() {
            return 0.0;
        }

        let total: f64 = self.weekly_stats.iter().map(|s| s.actual).sum();
        total / self.weekly_stats.len() as f64
    }

    /// Naive look-ahead: next week is projected at the season average
    pub fn next_week_projection(&self) -> f64 {
        self.season_average()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(weeks: &[(u32, f64, f64)]) -> PlayerStatSeries {
        PlayerStatSeries::new("6794", "Justin Jefferson", "WR", Some("MIN".to_string()))
            .with_weeks(weeks.iter().map(|&(w, a, p)| WeeklyStat::new(w, a, p)).collect())
    }

    #[test]
    fn test_valid_series() {
        assert!(series(&[(1, 10.0, 8.0), (2, 5.0, 9.0), (4, 0.0, 0.0)]).validate().is_ok());
        assert!(series(&[]).validate().is_ok());
    }

    #[test]
    fn test_rejects_week_zero() {
        let err = series(&[(0, 10.0, 8.0)]).validate().unwrap_err();
        assert!(matches!(err, StatsError::InvalidSeries { .. }));
    }

    #[test]
    fn test_rejects_duplicate_and_unordered_weeks() {
        assert!(series(&[(1, 10.0, 8.0), (1, 5.0, 9.0)]).validate().is_err());
        assert!(series(&[(3, 10.0, 8.0), (2, 5.0, 9.0)]).validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_points() {
        assert!(series(&[(1, 1.0, f64::NAN)]).validate().is_err());
        assert!(series(&[(1, f64::INFINITY, 8.0)]).validate().is_err());
    }

    #[test]
    fn test_rejects_negative_projection() {
        let err = series(&[(1, 10.0, -5.0), (2, 3.0, 4.0)]).validate().unwrap_err();
        assert!(matches!(err, StatsError::InvalidSeries { ref reason, .. } if reason.contains("week 1")));
    }

    #[test]
    fn test_allows_negative_actual() {
        // fumble-only weeks score below zero
        assert!(series(&[(1, -2.0, 8.0), (2, -3.0, 4.0)]).validate().is_ok());
    }

    #[test]
    fn test_season_average() {
        assert_eq!(series(&[]).season_average(), 0.0);
        assert_eq!(series(&[(1, 10.0, 8.0), (2, 5.0, 9.0)]).season_average(), 7.5);
        assert_eq!(series(&[(1, 10.0, 8.0), (2, 5.0, 9.0)]).next_week_projection(), 7.5);
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "player_id": "4046",
            "name": "Patrick Mahomes",
            "position": "QB",
            "team": "KC",
            "weekly_stats": [
                {"week": 1, "actual": 21.4, "projected": 19.0, "diff": 2.4},
                {"week": 2, "actual": 17.2, "projected": null, "diff": 0}
            ]
        }"#;

        let series: PlayerStatSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.player_id, "4046");
        assert_eq!(series.weekly_stats.len(), 2);
        assert_eq!(series.weekly_stats[1].projected, 0.0);
        assert!(series.validate().is_ok());
    }
}
