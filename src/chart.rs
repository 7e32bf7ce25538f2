//! Fixed-window daily activity series for the dashboard chart

use crate::calendar;
use crate::models::WorkoutLogRecord;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Days covered by the dashboard chart
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Activity totals for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// Display label, e.g. `Oct 01`
    pub date: String,

    /// Calendar day this point covers
    pub day: NaiveDate,

    /// Summed workout duration in minutes
    pub duration: u32,

    /// Number of logged workouts
    pub workouts: u32,
}

/// Per-day totals before labels are attached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyActivity {
    pub total_duration: u32,
    pub workout_count: u32,
}

/// Buckets logs into one point per calendar day
pub struct ChartAggregator {
    window_days: u32,
}

impl ChartAggregator {
    /// Create aggregator for the 30-day dashboard window
    pub fn new() -> Self {
        ChartAggregator {
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Create aggregator with a custom window length
    pub fn with_window(window_days: u32) -> Self {
        ChartAggregator { window_days }
    }

    /// Sum duration and count workouts per calendar day.
    ///
    /// Keys are calendar days, never display labels, so the same label in
    /// different years cannot collide.
    pub fn aggregate_daily<Tz: TimeZone>(
        &self,
        logs: &[WorkoutLogRecord],
        zone: &Tz,
    ) -> BTreeMap<NaiveDate, DailyActivity> {
        let mut daily: BTreeMap<NaiveDate, DailyActivity> = BTreeMap::new();

        for log in logs {
            let day = calendar::local_day(&log.logged_at, zone);
            let entry = daily.entry(day).or_default();
            entry.total_duration = entry.total_duration.saturating_add(log.duration_or_zero());
            entry.workout_count = entry.workout_count.saturating_add(1);
        }

        daily
    }

    /// One point per day in the window ending on the day of `now`, oldest first
    pub fn build_series<Tz: TimeZone>(
        &self,
        logs: &[WorkoutLogRecord],
        now: &DateTime<Tz>,
    ) -> Vec<ChartDataPoint> {
        let today = calendar::today(now);
        let daily = self.aggregate_daily(logs, &now.timezone());

        let series: Vec<ChartDataPoint> = (0..self.window_days)
            .rev()
            .map(|offset| {
                let day = calendar::days_before(today, u64::from(offset));
                let activity = daily.get(&day).copied().unwrap_or_default();
                ChartDataPoint {
                    date: calendar::chart_label(day),
                    day,
                    duration: activity.total_duration,
                    workouts: activity.workout_count,
                }
            })
            .collect();

        debug!(
            points = series.len(),
            active_days = series.iter().filter(|p| p.workouts > 0).count(),
            "Chart series built"
        );

        series
    }
}

impl Default for ChartAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// 30-day activity series ending on the day of `now`
pub fn build_series<Tz: TimeZone>(
    logs: &[WorkoutLogRecord],
    now: &DateTime<Tz>,
) -> Vec<ChartDataPoint> {
    ChartAggregator::new().build_series(logs, now)
}

/// 30-day activity series ending today on the local clock
pub fn build_series_now(logs: &[WorkoutLogRecord]) -> Vec<ChartDataPoint> {
    build_series(logs, &Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoggedGroup, MuscleGroup};
    use chrono::{Duration, Utc};

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 16, 20, 0, 0).unwrap()
    }

    fn create_test_log(days_ago: i64, duration: Option<u32>) -> WorkoutLogRecord {
        let logged_at = Utc.with_ymd_and_hms(2024, 10, 16, 9, 0, 0).unwrap() - Duration::days(days_ago);
        let mut log = WorkoutLogRecord::new(MuscleGroup::Chest, logged_at);
        log.duration_min = duration;
        log
    }

    #[test]
    fn test_empty_history_yields_full_zero_window() {
        let series = build_series(&[], &reference_now());

        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|p| p.duration == 0 && p.workouts == 0));
        assert_eq!(series[0].date, "Sep 17");
        assert_eq!(series[29].date, "Oct 16");
    }

    #[test]
    fn test_series_is_ascending_and_ends_today() {
        let series = build_series(&[create_test_log(3, Some(20))], &reference_now());

        for pair in series.windows(2) {
            assert_eq!(pair[1].day - pair[0].day, Duration::days(1));
        }
        assert_eq!(series.last().unwrap().day, calendar::today(&reference_now()));
    }

    #[test]
    fn test_same_day_logs_are_summed() {
        let logs = vec![
            create_test_log(0, Some(45)),
            create_test_log(0, Some(30)),
            create_test_log(0, None),
            create_test_log(2, Some(60)),
        ];
        let series = build_series(&logs, &reference_now());

        let today = &series[29];
        assert_eq!(today.duration, 75);
        assert_eq!(today.workouts, 3);

        let two_days_ago = &series[27];
        assert_eq!(two_days_ago.duration, 60);
        assert_eq!(two_days_ago.workouts, 1);

        assert_eq!(series[28].workouts, 0);
    }

    #[test]
    fn test_logs_outside_window_are_dropped() {
        let logs = vec![
            create_test_log(30, Some(90)),
            create_test_log(29, Some(10)),
            create_test_log(-1, Some(15)),
        ];
        let series = build_series(&logs, &reference_now());

        let total: u32 = series.iter().map(|p| p.duration).sum();
        assert_eq!(total, 10);
        assert_eq!(series[0].duration, 10);
    }

    #[test]
    fn test_same_label_in_different_years_does_not_collide() {
        let this_year = create_test_log(0, Some(30));
        let mut last_year = create_test_log(0, Some(40));
        last_year.logged_at = Utc.with_ymd_and_hms(2023, 10, 16, 9, 0, 0).unwrap();

        let series = build_series(&[this_year, last_year], &reference_now());
        assert_eq!(series[29].duration, 30);
        assert_eq!(series[29].workouts, 1);
    }

    #[test]
    fn test_unrecognized_groups_still_count() {
        let mut log = create_test_log(1, Some(25));
        log.muscle_group = LoggedGroup::Unrecognized("mobility".to_string());

        let series = build_series(&[log], &reference_now());
        assert_eq!(series[28].duration, 25);
        assert_eq!(series[28].workouts, 1);
    }

    #[test]
    fn test_custom_window() {
        let aggregator = ChartAggregator::with_window(7);
        let series = aggregator.build_series(&[create_test_log(6, Some(5))], &reference_now());

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].duration, 5);
    }

    #[test]
    fn test_aggregate_daily_keys_by_calendar_day() {
        let logs = vec![create_test_log(0, Some(10)), create_test_log(1, Some(20))];
        let daily = ChartAggregator::new().aggregate_daily(&logs, &Utc);

        assert_eq!(daily.len(), 2);
        let today = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        assert_eq!(
            daily.get(&today),
            Some(&DailyActivity {
                total_duration: 10,
                workout_count: 1
            })
        );
    }
}
