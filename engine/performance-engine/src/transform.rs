//! Weekly over/under transform
//!
//! Turns a [`PlayerStatSeries`] into per-week deltas for charting plus two
//! season aggregates. Pure and deterministic.

use crate::series::PlayerStatSeries;
use serde::{Deserialize, Serialize};

/// Per-week chart point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyDelta {
    pub week: u32,
    pub actual: f64,
    pub projected: f64,
    /// `actual - projected`
    pub diff: f64,
    /// `diff` when positive, else 0
    pub over: f64,
    /// `-diff` when negative, else 0
    pub under: f64,
}

impl WeeklyDelta {
    fn from_week(week: u32, actual: f64, projected: f64) -> Self {
        let diff = actual - projected;
        Self {
            week,
            actual,
            projected,
            diff,
            over: if diff > 0.0 { diff } else { 0.0 },
            under: if diff < 0.0 { -diff } else { 0.0 },
        }
    }
}

/// Derived performance view of one player's season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPerformance {
    pub weekly_deltas: Vec<WeeklyDelta>,
    /// Arithmetic mean of weekly diffs, 0 when there are no weeks
    pub season_average_diff: f64,
    /// Highest weekly actual, absent when there are no weeks
    pub best_week_actual: Option<f64>,
}

impl SeriesPerformance {
    pub fn weeks_over(&self) -> usize {
        self.weekly_deltas.iter().filter(|d| d.over > 0.0).count()
    }

    pub fn weeks_under(&self) -> usize {
        self.weekly_deltas.iter().filter(|d| d.under > 0.0).count()
    }
}

/// Derive weekly deltas and season aggregates from a stat series
pub fn derive_series(series: &PlayerStatSeries) -> SeriesPerformance {
    let weekly_deltas: Vec<WeeklyDelta> = series
        .weekly_stats
        .iter()
        .map(|s| WeeklyDelta::from_week(s.week, s.actual, s.projected))
        .collect();

    let season_average_diff = if weekly_deltas.is_empty() {
        0.0
    } else {
        weekly_deltas.iter().map(|d| d.diff).sum::<f64>() / weekly_deltas.len() as f64
    };

    let best_week_actual = series.weekly_stats.iter().map(|s| s.actual).reduce(f64::max);

    SeriesPerformance { weekly_deltas, season_average_diff, best_week_actual }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::WeeklyStat;

    fn series(weeks: &[(u32, f64, f64)]) -> PlayerStatSeries {
        PlayerStatSeries::new("4984", "Josh Allen", "QB", Some("BUF".to_string()))
            .with_weeks(weeks.iter().map(|&(w, a, p)| WeeklyStat::new(w, a, p)).collect())
    }

    #[test]
    fn test_empty_series() {
        let performance = derive_series(&series(&[]));
        assert!(performance.weekly_deltas.is_empty());
        assert_eq!(performance.season_average_diff, 0.0);
        assert_eq!(performance.best_week_actual, None);
    }

    #[test]
    fn test_two_week_series() {
        let performance = derive_series(&series(&[(1, 10.0, 8.0), (2, 5.0, 9.0)]));

        assert_eq!(performance.weekly_deltas.len(), 2);
        assert_eq!(performance.weekly_deltas[0].diff, 2.0);
        assert_eq!(performance.weekly_deltas[0].over, 2.0);
        assert_eq!(performance.weekly_deltas[0].under, 0.0);
        assert_eq!(performance.weekly_deltas[1].diff, -4.0);
        assert_eq!(performance.weekly_deltas[1].over, 0.0);
        assert_eq!(performance.weekly_deltas[1].under, 4.0);
        assert_eq!(performance.season_average_diff, -1.0);
        assert_eq!(performance.best_week_actual, Some(10.0));
        assert_eq!(performance.weeks_over(), 1);
        assert_eq!(performance.weeks_under(), 1);
    }

    #[test]
    fn test_exact_hit_is_neither_over_nor_under() {
        let performance = derive_series(&series(&[(1, 12.5, 12.5)]));
        let delta = performance.weekly_deltas[0];
        assert_eq!(delta.diff, 0.0);
        assert_eq!(delta.over, 0.0);
        assert_eq!(delta.under, 0.0);
    }

    #[test]
    fn test_over_under_are_exclusive_and_reconstruct_diff() {
        let performance = derive_series(&series(&[
            (1, 24.3, 18.0),
            (2, 7.1, 16.4),
            (3, 0.0, 0.0),
            (5, 31.8, 20.2),
            (6, 3.4, 11.0),
        ]));

        for delta in &performance.weekly_deltas {
            assert!(delta.over == 0.0 || delta.under == 0.0);
            assert!(delta.over >= 0.0 && delta.under >= 0.0);
            assert!((delta.over - delta.under - delta.diff).abs() < 1e-9);
        }

        assert_eq!(performance.best_week_actual, Some(31.8));
    }

    #[test]
    fn test_preserves_week_numbers_with_gaps() {
        let performance = derive_series(&series(&[(1, 10.0, 8.0), (4, 5.0, 9.0)]));
        let weeks: Vec<u32> = performance.weekly_deltas.iter().map(|d| d.week).collect();
        assert_eq!(weeks, vec![1, 4]);
    }
}
