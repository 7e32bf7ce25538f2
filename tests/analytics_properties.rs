use chrono::{DateTime, Duration, TimeZone, Utc};
use liftlog::calendar;
use liftlog::{
    build_series, recommend, score, LoggedGroup, MuscleGroup, RecoveryStatus, StreakScorer,
    WorkoutLogRecord,
};
use proptest::prelude::*;

/// Property-based tests for the three dashboard analytics

fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 16, 12, 0, 0).unwrap()
}

/// A log somewhere in the 60 days before `reference_now`, or an
/// unrecognized group when `group_index` is 8
fn create_test_log(group_index: usize, hours_ago: i64, duration: Option<u32>) -> WorkoutLogRecord {
    let group = if group_index < MuscleGroup::ALL.len() {
        LoggedGroup::Tracked(MuscleGroup::ALL[group_index])
    } else {
        LoggedGroup::Unrecognized("stretching".to_string())
    };
    let mut log = WorkoutLogRecord::new(group, reference_now() - Duration::hours(hours_ago));
    log.duration_min = duration;
    log
}

fn log_strategy() -> impl Strategy<Value = WorkoutLogRecord> {
    (0usize..9, 0i64..(24 * 60), proptest::option::of(0u32..240))
        .prop_map(|(group, hours_ago, duration)| create_test_log(group, hours_ago, duration))
}

fn logs_strategy() -> impl Strategy<Value = Vec<WorkoutLogRecord>> {
    proptest::collection::vec(log_strategy(), 0..60)
}

proptest! {
    #[test]
    fn recommendation_is_always_an_eligible_group(logs in logs_strategy()) {
        let now = reference_now();
        let recommendation = recommend(&logs, &now);

        prop_assert!(MuscleGroup::ALL.contains(&recommendation.muscle_group));
        prop_assert_eq!(recommendation.recovery_status, RecoveryStatus::FullyRecovered);
        prop_assert_eq!(recommendation.suggested_exercises.len(), 3);

        if let Some(days) = recommendation.days_since_last_trained {
            prop_assert!(days >= i64::from(recommendation.muscle_group.recovery_days_required()));
        }
    }

    #[test]
    fn never_trained_groups_outrank_trained_groups(logs in logs_strategy()) {
        let now = reference_now();
        let trained: Vec<MuscleGroup> = logs
            .iter()
            .filter_map(|log| log.muscle_group.tracked())
            .collect();
        let first_untrained = MuscleGroup::ALL
            .iter()
            .copied()
            .find(|group| !trained.contains(group));

        let recommendation = recommend(&logs, &now);

        match first_untrained {
            Some(group) => {
                prop_assert_eq!(recommendation.muscle_group, group);
                prop_assert_eq!(recommendation.days_since_last_trained, None);
            }
            None => prop_assert!(recommendation.days_since_last_trained.is_some()),
        }
    }

    #[test]
    fn results_do_not_depend_on_input_order(logs in logs_strategy()) {
        let now = reference_now();
        let mut reversed = logs.clone();
        reversed.reverse();

        prop_assert_eq!(recommend(&logs, &now), recommend(&reversed, &now));
        prop_assert_eq!(score(&logs, 4, &now), score(&reversed, 4, &now));
        prop_assert_eq!(build_series(&logs, &now), build_series(&reversed, &now));
    }

    #[test]
    fn chart_covers_thirty_days_ending_today(logs in logs_strategy()) {
        let now = reference_now();
        let series = build_series(&logs, &now);

        prop_assert_eq!(series.len(), 30);
        prop_assert!(series.windows(2).all(|pair| pair[0].day < pair[1].day));
        prop_assert_eq!(
            series.last().map(|point| point.date.clone()),
            Some(calendar::chart_label(calendar::today(&now)))
        );

        let window_start = calendar::days_before(calendar::today(&now), 29);
        let in_window: Vec<&WorkoutLogRecord> = logs
            .iter()
            .filter(|log| log.logged_at.date_naive() >= window_start)
            .collect();
        let expected_minutes: u32 = in_window.iter().map(|log| log.duration_or_zero()).sum();
        let charted_minutes: u32 = series.iter().map(|point| point.duration).sum();
        let charted_workouts: u32 = series.iter().map(|point| point.workouts).sum();

        prop_assert_eq!(charted_minutes, expected_minutes);
        prop_assert_eq!(charted_workouts as usize, in_window.len());
    }

    #[test]
    fn consistency_is_monotone_and_capped(days in 0u32..10, target in 1u32..8) {
        let lower = StreakScorer::consistency_score(days, target);
        let higher = StreakScorer::consistency_score(days + 1, target);

        prop_assert!(lower <= higher);
        prop_assert!(higher <= 100);
        if days >= target {
            prop_assert_eq!(lower, 100);
        }
    }

    #[test]
    fn streak_never_exceeds_active_days(logs in logs_strategy(), target in 0u32..8) {
        let now = reference_now();
        let result = score(&logs, target, &now);
        let active_days = StreakScorer::new().active_days(&logs, &Utc);

        prop_assert!(result.current_streak as usize <= active_days.len());
        prop_assert!(result.total_workouts_this_week <= 7);
        prop_assert_eq!(result.target_days_per_week, target);
        if target == 0 {
            prop_assert_eq!(result.consistency_score, 0);
        }
    }
}

#[test]
fn empty_history_scores_zero_and_echoes_target() {
    let result = score(&[], 5, &reference_now());

    assert_eq!(result.current_streak, 0);
    assert_eq!(result.consistency_score, 0);
    assert_eq!(result.total_workouts_this_week, 0);
    assert_eq!(result.target_days_per_week, 5);
}

#[test]
fn empty_history_charts_zeros() {
    let series = build_series(&[], &reference_now());

    assert_eq!(series.len(), 30);
    assert!(series.iter().all(|point| point.duration == 0 && point.workouts == 0));
}
