//! Terminal rendering for dashboard output

use crate::chart::ChartDataPoint;
use crate::dashboard::DashboardSnapshot;
use crate::models::WorkoutLogRecord;
use crate::recommendation::{RecoveryStatus, WorkoutRecommendation};
use crate::streak::StreakResult;
use chrono::TimeZone;
use colored::*;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Widest bar drawn in the activity chart
const BAR_WIDTH: u32 = 30;

#[derive(Tabled)]
struct ChartRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Workouts")]
    workouts: u32,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Exercise")]
    exercise: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "Minutes")]
    minutes: String,
    #[tabled(rename = "PB")]
    personal_best: String,
}

/// Headline recommendation block
pub fn render_recommendation(recommendation: &WorkoutRecommendation) -> String {
    let status = match recommendation.recovery_status {
        RecoveryStatus::FullyRecovered => recommendation.recovery_status.to_string().green(),
        RecoveryStatus::PartiallyRecovered => recommendation.recovery_status.to_string().yellow(),
        RecoveryStatus::NeedsRest => recommendation.recovery_status.to_string().red(),
    };

    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        "Today's focus:".bold(),
        recommendation.muscle_group.label().cyan().bold()
    ));
    out.push_str(&format!("  {}\n", recommendation.reason));
    out.push_str(&format!("  Status: {}\n", status));
    if !recommendation.suggested_exercises.is_empty() {
        out.push_str("  Try:\n");
        for exercise in &recommendation.suggested_exercises {
            out.push_str(&format!("    - {}\n", exercise));
        }
    }
    out
}

/// Streak and weekly goal progress
pub fn render_streak(streak: &StreakResult) -> String {
    let progress = format!(
        "{}/{} days this week",
        streak.total_workouts_this_week, streak.target_days_per_week
    );
    let progress = if streak.target_met() {
        progress.green()
    } else {
        progress.yellow()
    };

    format!(
        "{} {} day{}\n  Consistency: {}%\n  {}\n",
        "Current streak:".bold(),
        streak.current_streak,
        if streak.current_streak == 1 { "" } else { "s" },
        streak.consistency_score,
        progress
    )
}

/// Daily activity table with a proportional bar per day
pub fn render_chart(chart: &[ChartDataPoint]) -> String {
    let peak = chart.iter().map(|point| point.duration).max().unwrap_or(0);

    let rows: Vec<ChartRow> = chart
        .iter()
        .map(|point| ChartRow {
            date: point.date.clone(),
            workouts: point.workouts,
            minutes: point.duration,
            bar: "█".repeat(bar_length(point.duration, peak) as usize),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn bar_length(duration: u32, peak: u32) -> u32 {
    if peak == 0 || duration == 0 {
        return 0;
    }
    let scaled = (u64::from(duration) * u64::from(BAR_WIDTH)) / u64::from(peak);
    // Any activity at all gets at least one block
    (scaled as u32).max(1)
}

/// Recent activity table, times shown in `zone`
pub fn render_recent<Tz: TimeZone>(logs: &[WorkoutLogRecord], zone: &Tz) -> String {
    if logs.is_empty() {
        return format!("{}\n", "No workouts logged yet.".dimmed());
    }

    let rows: Vec<RecentRow> = logs
        .iter()
        .map(|log| RecentRow {
            when: log
                .logged_at
                .with_timezone(zone)
                .naive_local()
                .format("%b %d %H:%M")
                .to_string(),
            exercise: log.exercise_name.clone(),
            group: log.muscle_group.to_string(),
            details: describe_effort(log),
            minutes: log
                .duration_min
                .map(|minutes| minutes.to_string())
                .unwrap_or_else(|| "-".to_string()),
            personal_best: if log.is_personal_best { "★".to_string() } else { String::new() },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn describe_effort(log: &WorkoutLogRecord) -> String {
    let mut parts = Vec::new();
    match (log.sets, log.reps) {
        (Some(sets), Some(reps)) => parts.push(format!("{}x{}", sets, reps)),
        (Some(sets), None) => parts.push(format!("{} sets", sets)),
        (None, Some(reps)) => parts.push(format!("{} reps", reps)),
        (None, None) => {}
    }
    if let Some(weight) = log.weight_kg {
        if !weight.is_zero() {
            parts.push(format!("{} kg", weight.normalize()));
        }
    }
    if let Some(distance) = log.distance_km {
        parts.push(format!("{} km", distance.normalize()));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" @ ")
    }
}

/// Full dashboard view
pub fn render_dashboard<Tz: TimeZone>(snapshot: &DashboardSnapshot, zone: &Tz) -> String {
    let mut out = String::new();
    out.push_str(&render_recommendation(&snapshot.recommendation));
    out.push('\n');
    out.push_str(&render_streak(&snapshot.streak));
    out.push('\n');
    out.push_str(&format!("{}\n", "Activity".bold()));
    out.push_str(&render_chart(&snapshot.chart));
    out.push_str("\n\n");
    out.push_str(&format!("{}\n", "Recent workouts".bold()));
    out.push_str(&render_recent(&snapshot.recent_logs, zone));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuscleGroup;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn create_test_point(day: u32, duration: u32, workouts: u32) -> ChartDataPoint {
        let day = NaiveDate::from_ymd_opt(2024, 10, day).unwrap();
        ChartDataPoint {
            date: crate::calendar::chart_label(day),
            day,
            duration,
            workouts,
        }
    }

    #[test]
    fn test_bar_length_scales_to_peak() {
        assert_eq!(bar_length(0, 60), 0);
        assert_eq!(bar_length(60, 60), BAR_WIDTH);
        assert_eq!(bar_length(30, 60), BAR_WIDTH / 2);
        assert_eq!(bar_length(1, 600), 1);
        assert_eq!(bar_length(5, 0), 0);
    }

    #[test]
    fn test_render_chart_lists_every_day() {
        let chart = vec![create_test_point(14, 45, 1), create_test_point(15, 0, 0)];
        let rendered = render_chart(&chart);

        assert!(rendered.contains("Oct 14"));
        assert!(rendered.contains("Oct 15"));
        assert!(rendered.contains("45"));
    }

    #[test]
    fn test_describe_effort() {
        let logged_at = Utc.with_ymd_and_hms(2024, 10, 15, 9, 0, 0).unwrap();

        let mut strength = WorkoutLogRecord::new(MuscleGroup::Chest, logged_at);
        strength.sets = Some(4);
        strength.reps = Some(8);
        strength.weight_kg = Some(dec!(80.0));
        assert_eq!(describe_effort(&strength), "4x8 @ 80 kg");

        let mut cardio = WorkoutLogRecord::new(MuscleGroup::Cardio, logged_at);
        cardio.distance_km = Some(dec!(5.50));
        assert_eq!(describe_effort(&cardio), "5.5 km");

        let bare = WorkoutLogRecord::new(MuscleGroup::Core, logged_at);
        assert_eq!(describe_effort(&bare), "-");
    }

    #[test]
    fn test_render_recent_uses_zone() {
        let logged_at = Utc.with_ymd_and_hms(2024, 10, 15, 23, 30, 0).unwrap();
        let log = WorkoutLogRecord::new(MuscleGroup::Legs, logged_at)
            .with_exercise("Squats")
            .with_duration(50);
        let zone = chrono::FixedOffset::east_opt(2 * 3600).unwrap();

        let rendered = render_recent(&[log], &zone);
        assert!(rendered.contains("Oct 16 01:30"));
        assert!(rendered.contains("Squats"));
        assert!(rendered.contains("legs"));
    }

    #[test]
    fn test_render_recent_empty() {
        assert!(render_recent(&[], &Utc).contains("No workouts logged yet."));
    }

    #[test]
    fn test_render_streak_pluralizes() {
        let streak = StreakResult {
            current_streak: 1,
            consistency_score: 33,
            total_workouts_this_week: 1,
            target_days_per_week: 3,
        };
        let rendered = render_streak(&streak);
        assert!(rendered.contains("1 day\n"));
        assert!(rendered.contains("33%"));
        assert!(rendered.contains("1/3 days this week"));
    }
}
