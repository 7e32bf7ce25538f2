//! Greedy "what to train today" recommendation
//!
//! Each tracked muscle group is scored by how long it has been since it was
//! last trained. Groups still inside their recovery window are skipped, and
//! groups that have never been trained outrank everything else. The highest
//! scoring group wins; ties go to the group that comes first in
//! [`MuscleGroup::ALL`].

use crate::calendar;
use crate::models::{MuscleGroup, WorkoutLogRecord};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Number of exercises surfaced with a recommendation
pub const SUGGESTION_COUNT: usize = 3;

/// Minimum full days between sessions, indexed like [`MuscleGroup::ALL`]
const RECOVERY_DAYS: [u32; 8] = [2, 2, 2, 1, 1, 1, 0, 2];

/// Exercise pool per group, indexed like [`MuscleGroup::ALL`]
const EXERCISE_POOL: [[&str; 4]; 8] = [
    ["Bench Press", "Incline Press", "Push-ups", "Chest Flys"],
    ["Pull-ups", "Barbell Row", "Lat Pulldown", "Deadlift"],
    ["Squats", "Lunges", "Leg Press", "Romanian Deadlift"],
    ["Overhead Press", "Lateral Raises", "Front Raises", "Face Pulls"],
    ["Bicep Curls", "Tricep Dips", "Hammer Curls", "Skull Crushers"],
    ["Plank", "Crunches", "Leg Raises", "Russian Twists"],
    ["Running", "Cycling", "Jump Rope", "Swimming"],
    ["Deadlift", "Clean & Press", "Burpees", "Kettlebell Swings"],
];

impl MuscleGroup {
    /// Full days this group needs before it is trainable again
    pub fn recovery_days_required(&self) -> u32 {
        RECOVERY_DAYS[self.index()]
    }

    /// Every exercise suggested for this group
    pub fn exercise_pool(&self) -> &'static [&'static str; 4] {
        &EXERCISE_POOL[self.index()]
    }
}

/// Recovery state of the recommended group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStatus {
    FullyRecovered,
    PartiallyRecovered,
    NeedsRest,
}

impl fmt::Display for RecoveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryStatus::FullyRecovered => write!(f, "Fully recovered"),
            RecoveryStatus::PartiallyRecovered => write!(f, "Partially recovered"),
            RecoveryStatus::NeedsRest => write!(f, "Needs rest"),
        }
    }
}

/// Recommended muscle group for today
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecommendation {
    pub muscle_group: MuscleGroup,

    /// Human-readable explanation shown with the recommendation
    pub reason: String,

    /// First few exercises from the group's pool
    pub suggested_exercises: Vec<String>,

    pub recovery_status: RecoveryStatus,

    /// `None` when the group has never been trained
    pub days_since_last_trained: Option<i64>,
}

/// Recovery standing of a single muscle group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryScore {
    pub muscle_group: MuscleGroup,

    /// Most recent calendar day the group was trained
    pub last_trained: Option<NaiveDate>,

    pub recovery_days_required: u32,

    /// Calendar days from `last_trained` to today
    pub days_since: Option<i64>,
}

impl RecoveryScore {
    /// Never trained, or the recovery window has fully elapsed
    pub fn is_recovered(&self) -> bool {
        match self.days_since {
            None => true,
            Some(days) => days >= i64::from(self.recovery_days_required),
        }
    }

    /// Selection priority; `None` for groups still recovering
    fn priority(&self) -> Option<Priority> {
        if !self.is_recovered() {
            return None;
        }
        Some(match self.days_since {
            None => Priority::NeverTrained,
            Some(days) => Priority::Overdue(days),
        })
    }

    fn status(&self) -> RecoveryStatus {
        if self.is_recovered() {
            RecoveryStatus::FullyRecovered
        } else if self.days_since == Some(0) {
            RecoveryStatus::NeedsRest
        } else {
            RecoveryStatus::PartiallyRecovered
        }
    }
}

/// Ordering of eligible groups. Variant order matters: any `NeverTrained`
/// compares greater than every `Overdue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Priority {
    Overdue(i64),
    NeverTrained,
}

/// Muscle-group recommender
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Most recent training day per tracked group, indexed like [`MuscleGroup::ALL`]
    pub fn last_trained_days<Tz: TimeZone>(
        logs: &[WorkoutLogRecord],
        zone: &Tz,
    ) -> [Option<NaiveDate>; 8] {
        let mut last_trained = [None; 8];

        for log in logs {
            // Unrecognized groups take no part in recovery scoring
            let Some(group) = log.muscle_group.tracked() else {
                continue;
            };
            let day = calendar::local_day(&log.logged_at, zone);
            let slot = &mut last_trained[group.index()];
            if slot.map_or(true, |existing| day > existing) {
                *slot = Some(day);
            }
        }

        last_trained
    }

    /// Recovery standing of every tracked group, in [`MuscleGroup::ALL`] order
    pub fn recovery_scores<Tz: TimeZone>(
        logs: &[WorkoutLogRecord],
        now: &DateTime<Tz>,
    ) -> [RecoveryScore; 8] {
        let today = calendar::today(now);
        let last_trained = Self::last_trained_days(logs, &now.timezone());

        MuscleGroup::ALL.map(|group| {
            let last = last_trained[group.index()];
            RecoveryScore {
                muscle_group: group,
                last_trained: last,
                recovery_days_required: group.recovery_days_required(),
                days_since: last.map(|day| calendar::days_between(day, today)),
            }
        })
    }

    /// Pick the muscle group to train on the day of `now`
    pub fn recommend<Tz: TimeZone>(
        logs: &[WorkoutLogRecord],
        now: &DateTime<Tz>,
    ) -> WorkoutRecommendation {
        let scores = Self::recovery_scores(logs, now);

        // Cardio never needs recovery, so an eligible group always exists;
        // the default only matters if the recovery table changes.
        let mut best_group = MuscleGroup::Cardio;
        let mut best_priority: Option<Priority> = None;

        for score in &scores {
            let Some(priority) = score.priority() else {
                continue;
            };
            if best_priority.map_or(true, |best| priority > best) {
                best_priority = Some(priority);
                best_group = score.muscle_group;
            }
        }

        let chosen = scores[best_group.index()];
        let recommendation = WorkoutRecommendation {
            muscle_group: best_group,
            reason: Self::reason(best_group, chosen.days_since),
            suggested_exercises: best_group
                .exercise_pool()
                .iter()
                .take(SUGGESTION_COUNT)
                .map(|name| name.to_string())
                .collect(),
            recovery_status: chosen.status(),
            days_since_last_trained: chosen.days_since,
        };

        debug!(
            group = %recommendation.muscle_group,
            days_since = ?recommendation.days_since_last_trained,
            status = ?recommendation.recovery_status,
            log_count = logs.len(),
            "Workout recommendation selected"
        );

        recommendation
    }

    fn reason(group: MuscleGroup, days_since: Option<i64>) -> String {
        let name = group.display_name();
        match days_since {
            None => format!("You've never trained {} — perfect time to start!", name),
            Some(0) => format!("{} was trained today. Consider rest or light cardio.", name),
            Some(1) => format!("Last trained {} yesterday. Muscle recovery optimal.", name),
            Some(days) if days < 0 => format!(
                "{} has a workout logged after today. Consider rest or light cardio.",
                name
            ),
            Some(days) => format!(
                "Last trained {} {} days ago. Muscle recovery optimal.",
                name, days
            ),
        }
    }
}

/// Recommend a muscle group for the day of `now`
pub fn recommend<Tz: TimeZone>(
    logs: &[WorkoutLogRecord],
    now: &DateTime<Tz>,
) -> WorkoutRecommendation {
    RecommendationEngine::recommend(logs, now)
}

/// Recommend a muscle group for today on the local clock
pub fn recommend_now(logs: &[WorkoutLogRecord]) -> WorkoutRecommendation {
    recommend(logs, &Local::now())
}
