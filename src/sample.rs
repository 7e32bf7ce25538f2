//! Deterministic demo history
//!
//! Produces a realistic month of training relative to a reference instant,
//! so the dashboard can be tried without real data. Every session is placed
//! at 09:00 local time.

use crate::calendar;
use crate::models::{Difficulty, MuscleGroup, WorkoutLogRecord};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One scripted session: exercise, group, difficulty, sets, reps, weight, minutes, km, days ago
type Session = (
    &'static str,
    MuscleGroup,
    Difficulty,
    Option<u32>,
    Option<u32>,
    Option<Decimal>,
    u32,
    Option<Decimal>,
    u64,
);

const SESSIONS: [Session; 18] = [
    ("Bench Press", MuscleGroup::Chest, Difficulty::Intermediate, Some(4), Some(8), Some(dec!(80)), 45, None, 1),
    ("Pull-ups", MuscleGroup::Back, Difficulty::Intermediate, Some(4), Some(10), Some(dec!(5)), 40, None, 2),
    ("Squats", MuscleGroup::Legs, Difficulty::Advanced, Some(5), Some(5), Some(dec!(100)), 55, None, 3),
    ("Overhead Press", MuscleGroup::Shoulders, Difficulty::Intermediate, Some(4), Some(8), Some(dec!(55)), 40, None, 5),
    ("Incline Bench Press", MuscleGroup::Chest, Difficulty::Intermediate, Some(4), Some(10), Some(dec!(70)), 45, None, 7),
    ("Barbell Row", MuscleGroup::Back, Difficulty::Intermediate, Some(4), Some(8), Some(dec!(75)), 40, None, 8),
    ("Running", MuscleGroup::Cardio, Difficulty::Beginner, None, None, None, 30, Some(dec!(5)), 9),
    ("Romanian Deadlift", MuscleGroup::Legs, Difficulty::Intermediate, Some(4), Some(10), Some(dec!(80)), 40, None, 11),
    ("Push-ups", MuscleGroup::Chest, Difficulty::Beginner, Some(4), Some(20), Some(dec!(10)), 20, None, 14),
    ("Lat Pulldown", MuscleGroup::Back, Difficulty::Beginner, Some(3), Some(12), Some(dec!(60)), 35, None, 15),
    ("Lateral Raises", MuscleGroup::Shoulders, Difficulty::Beginner, Some(3), Some(15), Some(dec!(10)), 25, None, 16),
    ("Plank", MuscleGroup::Core, Difficulty::Beginner, Some(3), Some(1), Some(dec!(5)), 15, None, 17),
    ("Cycling", MuscleGroup::Cardio, Difficulty::Intermediate, None, None, None, 45, Some(dec!(15)), 18),
    ("Deadlift", MuscleGroup::Back, Difficulty::Advanced, Some(5), Some(3), Some(dec!(140)), 60, None, 21),
    ("Leg Press", MuscleGroup::Legs, Difficulty::Intermediate, Some(4), Some(12), Some(dec!(120)), 35, None, 22),
    ("Bicep Curls", MuscleGroup::Arms, Difficulty::Beginner, Some(3), Some(12), Some(dec!(15)), 20, None, 23),
    ("Tricep Dips", MuscleGroup::Arms, Difficulty::Intermediate, Some(3), Some(15), Some(dec!(10)), 20, None, 24),
    ("Russian Twists", MuscleGroup::Core, Difficulty::Beginner, Some(3), Some(20), Some(dec!(10)), 15, None, 25),
];

/// Demo history ending the day before `now`, newest first
pub fn sample_history<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<WorkoutLogRecord> {
    let zone = now.timezone();
    let today = calendar::today(now);
    let workout_time = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN);

    SESSIONS
        .iter()
        .filter_map(
            |&(exercise, group, difficulty, sets, reps, weight_kg, minutes, distance_km, days_ago)| {
                let day = calendar::days_before(today, days_ago);
                // Skips the session if 09:00 does not exist that day (DST gap)
                let logged_at = zone
                    .from_local_datetime(&day.and_time(workout_time))
                    .earliest()?
                    .with_timezone(&Utc);

                let mut log = WorkoutLogRecord::new(group, logged_at)
                    .with_exercise(exercise)
                    .with_duration(minutes);
                log.difficulty = Some(difficulty);
                log.sets = sets;
                log.reps = reps;
                log.weight_kg = weight_kg;
                log.distance_km = distance_km;
                log.is_personal_best = days_ago == 1;
                Some(log)
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::WorkoutLogValidator;

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_sample_history_is_deterministic() {
        assert_eq!(
            sample_history(&reference_now()),
            sample_history(&reference_now())
        );
    }

    #[test]
    fn test_sample_covers_every_group() {
        let logs = sample_history(&reference_now());

        for group in MuscleGroup::ALL {
            if group == MuscleGroup::FullBody {
                continue;
            }
            assert!(
                logs.iter().any(|log| log.muscle_group.tracked() == Some(group)),
                "missing {}",
                group
            );
        }
    }

    #[test]
    fn test_sample_records_pass_validation() {
        let validator = WorkoutLogValidator::new();
        for log in sample_history(&reference_now()) {
            assert!(validator.is_valid(&log), "{:?}", validator.validate(&log));
        }
    }

    #[test]
    fn test_sample_is_newest_first_and_in_the_past() {
        let logs = sample_history(&reference_now());

        assert_eq!(logs.len(), SESSIONS.len());
        assert!(logs.windows(2).all(|pair| pair[0].logged_at > pair[1].logged_at));
        assert!(logs.iter().all(|log| log.logged_at < reference_now()));
    }
}
