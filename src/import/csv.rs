use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{ImportError, LiftLogError, Result};
use crate::import::{has_extension, ImportFormat};
use crate::models::{Difficulty, LoggedGroup, WorkoutLogRecord};

const FORMAT_NAME: &str = "CSV";

/// CSV importer with flexible column mapping.
///
/// Timestamps without an offset are wall-clock times in `zone`, the zone the
/// analytics later bucket days in.
pub struct CsvImporter<Tz: TimeZone = Utc> {
    column_mapping: HashMap<String, String>,
    zone: Tz,
}

impl CsvImporter<Utc> {
    pub fn new() -> Self {
        Self::with_zone(Utc)
    }
}

impl<Tz: TimeZone> CsvImporter<Tz> {
    pub fn with_zone(zone: Tz) -> Self {
        let mut column_mapping = HashMap::new();

        // Common column name variations
        Self::add_mapping(&mut column_mapping, "id", &["id", "log_id", "uuid"]);
        Self::add_mapping(
            &mut column_mapping,
            "exercise_name",
            &["exercise_name", "exercise", "name", "movement"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "muscle_group",
            &["muscle_group", "muscle", "group", "body_part"],
        );
        Self::add_mapping(&mut column_mapping, "difficulty", &["difficulty", "level"]);
        Self::add_mapping(&mut column_mapping, "sets", &["sets", "set_count"]);
        Self::add_mapping(&mut column_mapping, "reps", &["reps", "repetitions", "rep_count"]);
        Self::add_mapping(
            &mut column_mapping,
            "weight_kg",
            &["weight_kg", "weight", "kg", "load"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "duration_min",
            &["duration_min", "duration", "minutes", "mins"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "distance_km",
            &["distance_km", "distance", "km"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "calories_burned",
            &["calories_burned", "calories", "kcal"],
        );
        Self::add_mapping(&mut column_mapping, "notes", &["notes", "note", "comment"]);
        Self::add_mapping(
            &mut column_mapping,
            "is_personal_best",
            &["is_personal_best", "personal_best", "pb"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "logged_at",
            &["logged_at", "date", "timestamp", "time", "datetime"],
        );

        Self {
            column_mapping,
            zone,
        }
    }

    fn add_mapping(mapping: &mut HashMap<String, String>, standard: &str, variations: &[&str]) {
        for variation in variations {
            mapping.insert(variation.to_lowercase(), standard.to_string());
        }
    }

    fn normalize_column_name(&self, name: &str) -> String {
        let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");

        self.column_mapping
            .get(&normalized)
            .cloned()
            .unwrap_or(normalized)
    }

    /// Parse a timestamp cell. Values without an offset are read in the
    /// importer's zone and bare dates as local midnight.
    pub fn parse_datetime(&self, value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.with_timezone(&Utc));
        }

        let formats = [
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M",
            "%d/%m/%Y %H:%M:%S",
            "%m/%d/%Y %H:%M:%S",
        ];

        for format in &formats {
            if let Ok(naive_dt) = NaiveDateTime::parse_from_str(value, format) {
                return self.localize(&naive_dt);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return date
                .and_hms_opt(0, 0, 0)
                .and_then(|naive_dt| self.localize(&naive_dt));
        }

        // Seconds since epoch
        value
            .parse::<i64>()
            .ok()
            .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
    }

    /// Wall-clock time in the importer's zone; the earlier instant wins when
    /// the time is ambiguous, and times skipped by a DST jump do not parse
    fn localize(&self, naive_dt: &NaiveDateTime) -> Option<DateTime<Utc>> {
        self.zone
            .from_local_datetime(naive_dt)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        }
    }

    fn parse_error(&self, row: usize, column: &str, value: &str) -> LiftLogError {
        ImportError::ParseError {
            format: FORMAT_NAME.to_string(),
            location: format!("row {}, column {}", row, column),
            reason: format!("invalid value '{}'", value),
        }
        .into()
    }

    fn parse_field<T: FromStr>(&self, row: usize, column: &str, value: &str) -> Result<T> {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| self.parse_error(row, column, value))
    }

    fn parse_row(
        &self,
        row: usize,
        header_mapping: &HashMap<usize, String>,
        record: &csv::StringRecord,
    ) -> Result<WorkoutLogRecord> {
        let mut muscle_group: Option<LoggedGroup> = None;
        let mut logged_at: Option<DateTime<Utc>> = None;
        let mut log = WorkoutLogRecord::new(LoggedGroup::Unrecognized(String::new()), DateTime::<Utc>::default());

        // Parse each field based on column mapping
        for (i, value) in record.iter().enumerate() {
            if value.trim().is_empty() {
                continue;
            }
            let Some(column) = header_mapping.get(&i) else {
                continue;
            };

            match column.as_str() {
                "id" => log.id = Some(self.parse_field::<Uuid>(row, column, value)?),
                "exercise_name" => log.exercise_name = value.trim().to_string(),
                "muscle_group" => muscle_group = Some(LoggedGroup::from(value.trim())),
                "difficulty" => {
                    log.difficulty = Some(self.parse_field::<Difficulty>(row, column, value)?)
                }
                "sets" => log.sets = Some(self.parse_field(row, column, value)?),
                "reps" => log.reps = Some(self.parse_field(row, column, value)?),
                "weight_kg" => log.weight_kg = Some(self.parse_field::<Decimal>(row, column, value)?),
                "duration_min" => log.duration_min = Some(self.parse_field(row, column, value)?),
                "distance_km" => {
                    log.distance_km = Some(self.parse_field::<Decimal>(row, column, value)?)
                }
                "calories_burned" => {
                    log.calories_burned = Some(self.parse_field(row, column, value)?)
                }
                "notes" => log.notes = Some(value.to_string()),
                "is_personal_best" => {
                    log.is_personal_best =
                        Self::parse_bool(value).ok_or_else(|| self.parse_error(row, column, value))?
                }
                "logged_at" => {
                    logged_at = Some(
                        self.parse_datetime(value).ok_or_else(|| self.parse_error(row, column, value))?,
                    )
                }
                _ => {} // Unknown columns are ignored
            }
        }

        log.muscle_group = muscle_group.ok_or_else(|| ImportError::MissingField {
            field: format!("muscle_group (row {})", row),
        })?;
        log.logged_at = logged_at.ok_or_else(|| ImportError::MissingField {
            field: format!("logged_at (row {})", row),
        })?;

        Ok(log)
    }
}

impl Default for CsvImporter<Utc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone + 'static> ImportFormat for CsvImporter<Tz> {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "csv")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<WorkoutLogRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(file_path)
            .map_err(|e| self.csv_error(0, e))?;

        let headers = reader.headers().map_err(|e| self.csv_error(1, e))?.clone();

        // Map headers to standard names
        let header_mapping: HashMap<usize, String> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (i, self.normalize_column_name(header)))
            .collect();

        for required in ["muscle_group", "logged_at"] {
            if !header_mapping.values().any(|column| column == required) {
                return Err(ImportError::MissingField {
                    field: required.to_string(),
                }
                .into());
            }
        }

        let mut logs = Vec::new();
        for (index, result) in reader.records().enumerate() {
            // Row numbers count the header as row 1
            let row = index + 2;
            let record = result.map_err(|e| self.csv_error(row, e))?;
            logs.push(self.parse_row(row, &header_mapping, &record)?);
        }

        Ok(logs)
    }

    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }
}

impl<Tz: TimeZone> CsvImporter<Tz> {
    fn csv_error(&self, row: usize, error: csv::Error) -> LiftLogError {
        ImportError::ParseError {
            format: FORMAT_NAME.to_string(),
            location: format!("row {}", row),
            reason: error.to_string(),
        }
        .into()
    }
}
