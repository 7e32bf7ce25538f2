use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Training-target categories tracked by the analytics core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
    FullBody,
}

impl MuscleGroup {
    /// Every tracked group in its fixed evaluation order.
    ///
    /// Recommendation ties are broken by position in this array, so the
    /// order is part of the public contract.
    pub const ALL: [MuscleGroup; 8] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Core,
        MuscleGroup::Cardio,
        MuscleGroup::FullBody,
    ];

    /// Position of this group in [`MuscleGroup::ALL`]
    pub fn index(&self) -> usize {
        match self {
            MuscleGroup::Chest => 0,
            MuscleGroup::Back => 1,
            MuscleGroup::Legs => 2,
            MuscleGroup::Shoulders => 3,
            MuscleGroup::Arms => 4,
            MuscleGroup::Core => 5,
            MuscleGroup::Cardio => 6,
            MuscleGroup::FullBody => 7,
        }
    }

    /// Storage key, e.g. `full_body`
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Core => "core",
            MuscleGroup::Cardio => "cardio",
            MuscleGroup::FullBody => "full_body",
        }
    }

    /// Storage key with underscores replaced by spaces, e.g. `full body`
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Title-case label for menus and table headers
    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Core => "Core",
            MuscleGroup::Cardio => "Cardio",
            MuscleGroup::FullBody => "Full Body",
        }
    }

    /// Cardio sessions are logged with distance instead of sets/reps/weight
    pub fn is_cardio(&self) -> bool {
        matches!(self, MuscleGroup::Cardio)
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lenient parse for hand-typed names. Case, spaces and dashes are
/// normalized; stored values go through [`LoggedGroup`] instead.
impl FromStr for MuscleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        MuscleGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == normalized)
            .ok_or_else(|| format!("Invalid muscle group: {}", s))
    }
}

/// Muscle group as it arrived from storage.
///
/// Upstream rows are not guaranteed to hold one of the tracked values, so
/// anything unrecognized is kept verbatim instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoggedGroup {
    Tracked(MuscleGroup),
    Unrecognized(String),
}

impl LoggedGroup {
    /// The tracked group, if this value is one of the eight
    pub fn tracked(&self) -> Option<MuscleGroup> {
        match self {
            LoggedGroup::Tracked(group) => Some(*group),
            LoggedGroup::Unrecognized(_) => None,
        }
    }
}

impl From<String> for LoggedGroup {
    /// Only the exact storage keys are tracked; any other spelling is kept
    /// as unrecognized.
    fn from(value: String) -> Self {
        match MuscleGroup::ALL.into_iter().find(|group| group.as_str() == value) {
            Some(group) => LoggedGroup::Tracked(group),
            None => LoggedGroup::Unrecognized(value),
        }
    }
}

impl From<&str> for LoggedGroup {
    fn from(value: &str) -> Self {
        LoggedGroup::from(value.to_string())
    }
}

impl From<MuscleGroup> for LoggedGroup {
    fn from(group: MuscleGroup) -> Self {
        LoggedGroup::Tracked(group)
    }
}

impl From<LoggedGroup> for String {
    fn from(value: LoggedGroup) -> Self {
        match value {
            LoggedGroup::Tracked(group) => group.as_str().to_string(),
            LoggedGroup::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for LoggedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggedGroup::Tracked(group) => write!(f, "{}", group),
            LoggedGroup::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

/// Perceived difficulty recorded with a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("Invalid difficulty: {}", s)),
        }
    }
}

/// One logged workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogRecord {
    /// Storage identifier
    #[serde(default)]
    pub id: Option<Uuid>,

    /// Exercise performed, e.g. "Bench Press"
    #[serde(default)]
    pub exercise_name: String,

    /// Targeted muscle group
    pub muscle_group: LoggedGroup,

    /// Perceived difficulty
    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    pub sets: Option<u32>,
    pub reps: Option<u32>,

    /// Load in kilograms
    pub weight_kg: Option<Decimal>,

    /// Session length in minutes
    pub duration_min: Option<u32>,

    /// Distance covered in kilometers
    pub distance_km: Option<Decimal>,

    pub calories_burned: Option<u32>,

    pub notes: Option<String>,

    #[serde(default)]
    pub is_personal_best: bool,

    /// When the workout happened (not when it was recorded)
    pub logged_at: DateTime<Utc>,
}

impl WorkoutLogRecord {
    /// Minimal record with only the fields the analytics core reads
    pub fn new(muscle_group: impl Into<LoggedGroup>, logged_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            exercise_name: String::new(),
            muscle_group: muscle_group.into(),
            difficulty: None,
            sets: None,
            reps: None,
            weight_kg: None,
            duration_min: None,
            distance_km: None,
            calories_burned: None,
            notes: None,
            is_personal_best: false,
            logged_at,
        }
    }

    pub fn with_exercise(mut self, name: impl Into<String>) -> Self {
        self.exercise_name = name.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_min = Some(minutes);
        self
    }

    /// Duration in minutes, treating a missing value as zero
    pub fn duration_or_zero(&self) -> u32 {
        self.duration_min.unwrap_or(0)
    }
}

/// What a user goal measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Days per week with at least one workout
    WeeklyWorkouts,
    /// Total minutes per week
    WeeklyDuration,
    /// Workouts per month
    MonthlyWorkouts,
    /// Total minutes per month
    MonthlyDuration,
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly_workouts" => Ok(GoalType::WeeklyWorkouts),
            "weekly_duration" => Ok(GoalType::WeeklyDuration),
            "monthly_workouts" => Ok(GoalType::MonthlyWorkouts),
            "monthly_duration" => Ok(GoalType::MonthlyDuration),
            _ => Err(format!("Invalid goal type: {}", s)),
        }
    }
}

/// A user's training goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_type: GoalType,
    pub target_value: u32,
}

impl Goal {
    /// Weekly active-day target used when no goal is configured
    pub const DEFAULT_DAYS_PER_WEEK: u32 = 3;

    pub fn weekly_days(days: u32) -> Self {
        Goal {
            goal_type: GoalType::WeeklyWorkouts,
            target_value: days,
        }
    }

    /// Target fed to the consistency score.
    ///
    /// Only weekly-workout goals count active days; other goal types fall
    /// back to the default.
    pub fn target_days_per_week(&self) -> u32 {
        match self.goal_type {
            GoalType::WeeklyWorkouts => self.target_value,
            _ => Self::DEFAULT_DAYS_PER_WEEK,
        }
    }
}

impl Default for Goal {
    fn default() -> Self {
        Goal::weekly_days(Self::DEFAULT_DAYS_PER_WEEK)
    }
}
