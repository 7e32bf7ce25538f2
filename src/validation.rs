//! Field-level validation for workout log records
//!
//! These rules match what the logging form enforces before a record is
//! stored. The analytics core does not depend on them; they are applied when
//! records are imported from files.

use crate::models::{LoggedGroup, WorkoutLogRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single rule violation on a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationIssue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation ranges for a log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub exercise_name_min: usize,
    pub exercise_name_max: usize,
    pub notes_max: usize,
    pub sets_range: (u32, u32),
    pub reps_range: (u32, u32),
    pub weight_kg_range: (Decimal, Decimal),
    pub duration_min_range: (u32, u32),
    pub distance_km_range: (Decimal, Decimal),
    pub calories_range: (u32, u32),
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules {
            exercise_name_min: 2,
            exercise_name_max: 50,
            notes_max: 500,
            sets_range: (1, 100),
            reps_range: (1, 10_000),
            weight_kg_range: (dec!(0), dec!(250)),
            duration_min_range: (1, 600),
            distance_km_range: (dec!(0), dec!(1000)),
            calories_range: (0, 10_000),
        }
    }
}

/// Checks records against [`ValidationRules`]
pub struct WorkoutLogValidator {
    rules: ValidationRules,
}

impl WorkoutLogValidator {
    pub fn new() -> Self {
        WorkoutLogValidator {
            rules: ValidationRules::default(),
        }
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        WorkoutLogValidator { rules }
    }

    /// All rule violations for `record`; empty when the record is valid
    pub fn validate(&self, record: &WorkoutLogRecord) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let rules = &self.rules;

        let name_len = record.exercise_name.trim().chars().count();
        if name_len < rules.exercise_name_min {
            issues.push(ValidationIssue::new(
                "exercise_name",
                format!("must be at least {} characters", rules.exercise_name_min),
            ));
        } else if name_len > rules.exercise_name_max {
            issues.push(ValidationIssue::new(
                "exercise_name",
                format!("must be at most {} characters", rules.exercise_name_max),
            ));
        }

        if let Some(notes) = &record.notes {
            if notes.chars().count() > rules.notes_max {
                issues.push(ValidationIssue::new(
                    "notes",
                    format!("must be at most {} characters", rules.notes_max),
                ));
            }
        }

        if record.difficulty.is_none() {
            issues.push(ValidationIssue::new("difficulty", "required"));
        }

        check_range(&mut issues, "sets", record.sets, rules.sets_range);
        check_range(&mut issues, "reps", record.reps, rules.reps_range);
        check_range(&mut issues, "weight_kg", record.weight_kg, rules.weight_kg_range);
        check_range(&mut issues, "duration_min", record.duration_min, rules.duration_min_range);
        check_range(&mut issues, "distance_km", record.distance_km, rules.distance_km_range);
        check_range(&mut issues, "calories_burned", record.calories_burned, rules.calories_range);

        match &record.muscle_group {
            LoggedGroup::Unrecognized(raw) => {
                issues.push(ValidationIssue::new(
                    "muscle_group",
                    format!("unknown muscle group '{}'", raw),
                ));
            }
            LoggedGroup::Tracked(group) if group.is_cardio() => {
                if record.distance_km.is_none() {
                    issues.push(ValidationIssue::new("distance_km", "required for cardio"));
                }
            }
            LoggedGroup::Tracked(_) => {
                if record.sets.is_none() {
                    issues.push(ValidationIssue::new("sets", "required for strength training"));
                }
                if record.reps.is_none() {
                    issues.push(ValidationIssue::new("reps", "required for strength training"));
                }
                // A zero weight counts as not entered
                if record.weight_kg.map_or(true, |weight| weight.is_zero()) {
                    issues.push(ValidationIssue::new("weight_kg", "required for strength training"));
                }
            }
        }

        issues
    }

    pub fn is_valid(&self, record: &WorkoutLogRecord) -> bool {
        self.validate(record).is_empty()
    }
}

impl Default for WorkoutLogValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_range<T>(issues: &mut Vec<ValidationIssue>, field: &str, value: Option<T>, range: (T, T))
where
    T: PartialOrd + fmt::Display,
{
    let Some(value) = value else {
        return;
    };
    let (min, max) = range;
    if value < min || value > max {
        issues.push(ValidationIssue::new(
            field,
            format!("{} is outside {}..={}", value, min, max),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, MuscleGroup};
    use chrono::{TimeZone, Utc};

    fn strength_record() -> WorkoutLogRecord {
        let mut record = WorkoutLogRecord::new(
            MuscleGroup::Chest,
            Utc.with_ymd_and_hms(2024, 10, 15, 9, 0, 0).unwrap(),
        )
        .with_exercise("Bench Press")
        .with_duration(45);
        record.sets = Some(4);
        record.reps = Some(8);
        record.weight_kg = Some(dec!(80));
        record.difficulty = Some(Difficulty::Intermediate);
        record
    }

    fn cardio_record() -> WorkoutLogRecord {
        let mut record = WorkoutLogRecord::new(
            MuscleGroup::Cardio,
            Utc.with_ymd_and_hms(2024, 10, 15, 7, 0, 0).unwrap(),
        )
        .with_exercise("Running")
        .with_duration(30);
        record.distance_km = Some(dec!(5.2));
        record.difficulty = Some(Difficulty::Beginner);
        record
    }

    #[test]
    fn test_valid_records() {
        let validator = WorkoutLogValidator::new();
        assert!(validator.is_valid(&strength_record()));
        assert!(validator.is_valid(&cardio_record()));
    }

    #[test]
    fn test_strength_requires_sets_reps_weight() {
        let mut record = strength_record();
        record.sets = None;
        record.weight_kg = None;

        let issues = WorkoutLogValidator::new().validate(&record);
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();

        assert_eq!(fields, vec!["sets", "weight_kg"]);
    }

    #[test]
    fn test_zero_weight_counts_as_missing_for_strength() {
        let mut record = strength_record();
        record.weight_kg = Some(dec!(0));

        let issues = WorkoutLogValidator::new().validate(&record);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].to_string(), "weight_kg: required for strength training");

        // Zero is in range, so other groups may still carry it
        let mut cardio = cardio_record();
        cardio.weight_kg = Some(dec!(0));
        assert!(WorkoutLogValidator::new().is_valid(&cardio));
    }

    #[test]
    fn test_difficulty_is_required() {
        let mut record = cardio_record();
        record.difficulty = None;

        let issues = WorkoutLogValidator::new().validate(&record);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "difficulty");
    }

    #[test]
    fn test_cardio_requires_distance() {
        let mut record = cardio_record();
        record.distance_km = None;

        let issues = WorkoutLogValidator::new().validate(&record);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "distance_km");
    }

    #[test]
    fn test_ranges() {
        let mut record = strength_record();
        record.weight_kg = Some(dec!(300));
        record.duration_min = Some(0);
        record.reps = Some(10_000);

        let issues = WorkoutLogValidator::new().validate(&record);
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();

        assert_eq!(fields, vec!["weight_kg", "duration_min"]);
        assert_eq!(issues[0].to_string(), "weight_kg: 300 is outside 0..=250");
    }

    #[test]
    fn test_exercise_name_and_notes_length() {
        let mut record = strength_record();
        record.exercise_name = "X".to_string();
        record.notes = Some("a".repeat(501));

        let issues = WorkoutLogValidator::new().validate(&record);
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();

        assert_eq!(fields, vec!["exercise_name", "notes"]);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ValidationRules {
            weight_kg_range: (dec!(0), dec!(100)),
            exercise_name_min: 5,
            ..ValidationRules::default()
        };
        let validator = WorkoutLogValidator::with_rules(rules);

        let mut record = strength_record();
        record.weight_kg = Some(dec!(120));
        record.exercise_name = "Dips".to_string();

        let fields: Vec<_> = validator
            .validate(&record)
            .into_iter()
            .map(|issue| issue.field)
            .collect();
        assert_eq!(fields, vec!["exercise_name", "weight_kg"]);
        assert!(WorkoutLogValidator::new().is_valid(&record));
    }

    #[test]
    fn test_unknown_group_is_reported() {
        let mut record = strength_record();
        record.muscle_group = LoggedGroup::Unrecognized("neck".to_string());

        let issues = WorkoutLogValidator::new().validate(&record);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("neck"));
    }
}
