//! Dashboard snapshot combining the three analytics views
//!
//! The snapshot is built from one fetch of the user's history, mirroring how
//! the dashboard page consumes it:
//!
//! - the 100 most recent logs feed the streak scorer,
//! - the 30 most recent of those feed the recommendation,
//! - logs from the last 30 days feed the chart,
//! - the 10 most recent are listed as recent activity.

use crate::chart::{ChartAggregator, ChartDataPoint};
use crate::models::{Goal, WorkoutLogRecord};
use crate::recommendation::{RecommendationEngine, WorkoutRecommendation};
use crate::streak::{StreakResult, StreakScorer};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// How much history a dashboard render looks at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardLimits {
    /// Most recent logs fetched for analysis
    pub history_limit: usize,

    /// Most recent logs considered by the recommendation
    pub recommendation_limit: usize,

    /// Rows in the recent activity list
    pub recent_limit: usize,

    /// Chart window in days
    pub chart_days: u32,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        DashboardLimits {
            history_limit: 100,
            recommendation_limit: 30,
            recent_limit: 10,
            chart_days: 30,
        }
    }
}

/// Everything the dashboard renders, computed for one reference instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub recommendation: WorkoutRecommendation,
    pub streak: StreakResult,
    pub chart: Vec<ChartDataPoint>,
    pub recent_logs: Vec<WorkoutLogRecord>,
}

impl DashboardSnapshot {
    /// Build a snapshot with the default limits
    pub fn build<Tz: TimeZone>(
        logs: &[WorkoutLogRecord],
        goal: Option<&Goal>,
        now: &DateTime<Tz>,
    ) -> Self {
        Self::build_with_limits(logs, goal, now, &DashboardLimits::default())
    }

    pub fn build_with_limits<Tz: TimeZone>(
        logs: &[WorkoutLogRecord],
        goal: Option<&Goal>,
        now: &DateTime<Tz>,
        limits: &DashboardLimits,
    ) -> Self {
        let history = most_recent(logs, limits.history_limit);
        let target_days = goal
            .map(Goal::target_days_per_week)
            .unwrap_or(Goal::DEFAULT_DAYS_PER_WEEK);

        let recommendation_logs = &history[..history.len().min(limits.recommendation_limit)];

        let chart_cutoff = now.with_timezone(&Utc) - Duration::days(i64::from(limits.chart_days));
        let chart_logs: Vec<WorkoutLogRecord> = history
            .iter()
            .filter(|log| log.logged_at >= chart_cutoff)
            .cloned()
            .collect();

        let snapshot = DashboardSnapshot {
            generated_at: now.with_timezone(&Utc),
            recommendation: RecommendationEngine::recommend(recommendation_logs, now),
            streak: StreakScorer::new().score(&history, target_days, now),
            chart: ChartAggregator::with_window(limits.chart_days).build_series(&chart_logs, now),
            recent_logs: history.iter().take(limits.recent_limit).cloned().collect(),
        };

        info!(
            logs = logs.len(),
            analyzed = history.len(),
            recommended = %snapshot.recommendation.muscle_group,
            streak = snapshot.streak.current_streak,
            consistency = snapshot.streak.consistency_score,
            "Dashboard snapshot built"
        );

        snapshot
    }

    /// Build a snapshot for the current local time
    pub fn build_now(logs: &[WorkoutLogRecord], goal: Option<&Goal>) -> Self {
        Self::build(logs, goal, &Local::now())
    }
}

/// The `limit` most recent logs, newest first
fn most_recent(logs: &[WorkoutLogRecord], limit: usize) -> Vec<WorkoutLogRecord> {
    let mut sorted = logs.to_vec();
    // Stable sort keeps the input order for identical timestamps
    sorted.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
    sorted.truncate(limit);
    sorted
}
