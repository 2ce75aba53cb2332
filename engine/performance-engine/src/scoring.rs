//! PPR fantasy scoring

use crate::series::null_as_zero;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const PASSING_YARDS_PER_POINT: f64 = 25.0;
const RUSHING_YARDS_PER_POINT: f64 = 10.0;
const RECEIVING_YARDS_PER_POINT: f64 = 10.0;
const TOUCHDOWN_POINTS: f64 = 6.0;
const INTERCEPTION_POINTS: f64 = -2.0;
const FUMBLE_LOST_POINTS: f64 = -2.0;
const RECEPTION_POINTS: f64 = 1.0;
const TWO_POINT_CONVERSION_POINTS: f64 = 2.0;

/// Raw box-score counters for one player-week. Missing or null counters are zero.
///
/// Accepts both the long key names and Sleeper's abbreviated stat keys
/// (`pass_yd`, `rec`, `fum_lost`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStatLine {
    #[serde(alias = "pass_yd", deserialize_with = "null_as_zero")]
    pub passing_yds: f64,
    #[serde(alias = "pass_td", deserialize_with = "null_as_zero")]
    pub passing_tds: f64,
    #[serde(alias = "pass_int", deserialize_with = "null_as_zero")]
    pub passing_int: f64,
    #[serde(alias = "rush_yd", deserialize_with = "null_as_zero")]
    pub rushing_yds: f64,
    #[serde(alias = "rush_td", deserialize_with = "null_as_zero")]
    pub rushing_tds: f64,
    #[serde(alias = "rec", deserialize_with = "null_as_zero")]
    pub receptions: f64,
    #[serde(alias = "rec_yd", deserialize_with = "null_as_zero")]
    pub receiving_yds: f64,
    #[serde(alias = "rec_td", deserialize_with = "null_as_zero")]
    pub receiving_tds: f64,
    #[serde(alias = "fum_lost", deserialize_with = "null_as_zero")]
    pub fumbles_lost: f64,
    #[serde(alias = "pass_2pt", deserialize_with = "null_as_zero")]
    pub passing_2pt: f64,
    #[serde(alias = "rush_2pt", deserialize_with = "null_as_zero")]
    pub rushing_2pt: f64,
    #[serde(alias = "rec_2pt", deserialize_with = "null_as_zero")]
    pub receiving_2pt: f64,
}

impl RawStatLine {
    /// PPR points for this stat line
    pub fn ppr_points(&self) -> f64 {
        ppr_points(self)
    }
}

/// Full-PPR points, rounded to two decimals
pub fn ppr_points(stats: &RawStatLine) -> f64 {
    let passing = stats.passing_yds / PASSING_YARDS_PER_POINT
        + stats.passing_tds * TOUCHDOWN_POINTS
        + stats.passing_int * INTERCEPTION_POINTS;

    let rushing =
        stats.rushing_yds / RUSHING_YARDS_PER_POINT + stats.rushing_tds * TOUCHDOWN_POINTS;

    let receiving = stats.receptions * RECEPTION_POINTS
        + stats.receiving_yds / RECEIVING_YARDS_PER_POINT
        + stats.receiving_tds * TOUCHDOWN_POINTS;

    let misc = stats.fumbles_lost * FUMBLE_LOST_POINTS
        + (stats.passing_2pt + stats.rushing_2pt + stats.receiving_2pt)
            * TWO_POINT_CONVERSION_POINTS;

    round2(passing + rushing + receiving + misc)
}

/// Score a batch of players keyed by player id
pub fn ppr_points_by_player(stats: &HashMap<String, RawStatLine>) -> HashMap<String, f64> {
    stats.iter().map(|(player_id, line)| (player_id.clone(), ppr_points(line))).collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
