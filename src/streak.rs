//! Daily streak and weekly consistency scoring

use crate::calendar;
use crate::models::{Goal, WorkoutLogRecord};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Streak and consistency for the day of the reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    /// Consecutive active days ending today (or yesterday, if today is still empty)
    pub current_streak: u32,

    /// Share of the weekly target met, 0-100
    pub consistency_score: u8,

    /// Unique active days since the start of the current week
    pub total_workouts_this_week: u32,

    pub target_days_per_week: u32,
}

impl StreakResult {
    fn empty(target_days_per_week: u32) -> Self {
        StreakResult {
            current_streak: 0,
            consistency_score: 0,
            total_workouts_this_week: 0,
            target_days_per_week,
        }
    }

    /// Whether the weekly target has been reached
    pub fn target_met(&self) -> bool {
        self.consistency_score >= 100
    }
}

/// Streak scorer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    /// How far back the streak walk looks, in days (default: 365)
    pub lookback_days: u32,

    /// First day of the consistency week (default: Sunday)
    pub week_start: Weekday,
}

impl Default for StreakConfig {
    fn default() -> Self {
        StreakConfig {
            lookback_days: 365,
            week_start: Weekday::Sun,
        }
    }
}

/// Streak and consistency calculator
pub struct StreakScorer {
    config: StreakConfig,
}

impl StreakScorer {
    /// Create scorer with default configuration
    pub fn new() -> Self {
        StreakScorer {
            config: StreakConfig::default(),
        }
    }

    /// Create scorer with custom configuration
    pub fn with_config(config: StreakConfig) -> Self {
        StreakScorer { config }
    }

    /// Unique calendar days with at least one logged workout
    pub fn active_days<Tz: TimeZone>(
        &self,
        logs: &[WorkoutLogRecord],
        zone: &Tz,
    ) -> BTreeSet<NaiveDate> {
        logs.iter()
            .map(|log| calendar::local_day(&log.logged_at, zone))
            .collect()
    }

    /// Count consecutive active days walking back from `today`.
    ///
    /// A missing `today` does not end the walk; the first missing earlier
    /// day does.
    pub fn current_streak(&self, active_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
        let mut streak = 0;

        for offset in 0..self.config.lookback_days {
            let day = calendar::days_before(today, u64::from(offset));
            if active_days.contains(&day) {
                streak += 1;
            } else if offset > 0 {
                break;
            }
        }

        streak
    }

    /// Active days on or after the start of the week containing `today`
    pub fn days_this_week(&self, active_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
        let week_start = calendar::start_of_week(today, self.config.week_start);
        active_days.range(week_start..).count() as u32
    }

    /// `round(min(days / target, 1) * 100)`, or 0 for a zero target
    pub fn consistency_score(days_this_week: u32, target_days_per_week: u32) -> u8 {
        if target_days_per_week == 0 {
            return 0;
        }
        let days = u64::from(days_this_week);
        let target = u64::from(target_days_per_week);
        // Integer round-half-up of days * 100 / target
        let percent = (days * 200 + target) / (2 * target);
        percent.min(100) as u8
    }

    /// Score `logs` against a weekly target for the day of `now`
    pub fn score<Tz: TimeZone>(
        &self,
        logs: &[WorkoutLogRecord],
        target_days_per_week: u32,
        now: &DateTime<Tz>,
    ) -> StreakResult {
        if logs.is_empty() {
            return StreakResult::empty(target_days_per_week);
        }
        if target_days_per_week == 0 {
            debug!("Weekly target is zero, consistency score pinned to 0");
        }

        let today = calendar::today(now);
        let active_days = self.active_days(logs, &now.timezone());
        let days_this_week = self.days_this_week(&active_days, today);

        let result = StreakResult {
            current_streak: self.current_streak(&active_days, today),
            consistency_score: Self::consistency_score(days_this_week, target_days_per_week),
            total_workouts_this_week: days_this_week,
            target_days_per_week,
        };

        debug!(
            streak = result.current_streak,
            consistency = result.consistency_score,
            days_this_week = result.total_workouts_this_week,
            target = target_days_per_week,
            "Streak scored"
        );

        result
    }
}

impl Default for StreakScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Score streak and weekly consistency for the day of `now`
pub fn score<Tz: TimeZone>(
    logs: &[WorkoutLogRecord],
    target_days_per_week: u32,
    now: &DateTime<Tz>,
) -> StreakResult {
    StreakScorer::new().score(logs, target_days_per_week, now)
}

/// Score streak and weekly consistency against a goal, using the local clock
pub fn score_now(logs: &[WorkoutLogRecord], goal: Option<&Goal>) -> StreakResult {
    let target = goal
        .map(Goal::target_days_per_week)
        .unwrap_or(Goal::DEFAULT_DAYS_PER_WEEK);
    score(logs, target, &Local::now())
}
