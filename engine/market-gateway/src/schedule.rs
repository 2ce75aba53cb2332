//! Weekly trading calendar
//!
//! The market is open Monday through Saturday and on Sunday until the close
//! hour (the early kickoff window). Weeks are counted from the configured
//! season start.

use crate::config::MarketConfig;
use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};

/// Trading calendar derived from a [`MarketConfig`]
#[derive(Debug, Clone)]
pub struct MarketSchedule {
    config: MarketConfig,
}

impl MarketSchedule {
    pub fn new(config: MarketConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// NFL week for a moment in time: 0 before the season, capped at `max_week`
    pub fn current_week(&self, now: NaiveDateTime) -> u32 {
        let today = now.date();
        if today < self.config.season_start {
            return 0;
        }

        let days = (today - self.config.season_start).num_days();
        let week = (days / 7 + 1) as u32;
        week.min(self.config.max_week)
    }

    pub fn is_open(&self, now: NaiveDateTime) -> bool {
        match now.weekday() {
            Weekday::Sun => now.hour() < self.config.sunday_close_hour,
            _ => true,
        }
    }

    /// The Sunday close at or after `now`
    pub fn next_close(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let days_until_sunday = 6 - now.weekday().num_days_from_monday() as i64;
        let sunday = now.date() + Duration::days(days_until_sunday);
        sunday.and_hms_opt(self.config.sunday_close_hour, 0, 0)
    }

    /// Time left before the market closes, or `None` while it is closed
    pub fn time_until_close(&self, now: NaiveDateTime) -> Option<Duration> {
        if !self.is_open(now) {
            return None;
        }

        self.next_close(now).map(|close| close - now)
    }
}
