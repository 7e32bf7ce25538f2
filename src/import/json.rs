use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ImportError, LiftLogError, Result};
use crate::import::{has_extension, ImportFormat};
use crate::models::WorkoutLogRecord;

/// Importer for a JSON array of workout log records
pub struct JsonImporter;

impl JsonImporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for JsonImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "json")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<WorkoutLogRecord>> {
        let reader = BufReader::new(File::open(file_path)?);

        serde_json::from_reader(reader).map_err(|e| {
            LiftLogError::from(ImportError::ParseError {
                format: self.format_name().to_string(),
                location: format!("line {}, column {}", e.line(), e.column()),
                reason: e.to_string(),
            })
        })
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuscleGroup;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_import_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs.json");
        fs::write(
            &path,
            r#"[
                {"exercise_name":"Squats","muscle_group":"legs","sets":5,"reps":5,
                 "weight_kg":100,"duration_min":50,"logged_at":"2024-10-14T09:00:00Z"},
                {"exercise_name":"Running","muscle_group":"cardio","distance_km":"5.0",
                 "logged_at":"2024-10-15T07:00:00+02:00","is_personal_best":true}
            ]"#,
        )
        .unwrap();

        let records = JsonImporter::new().import_file(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].muscle_group.tracked(), Some(MuscleGroup::Legs));
        assert_eq!(records[1].logged_at.to_rfc3339(), "2024-10-15T05:00:00+00:00");
        assert!(records[1].is_personal_best);
    }

    #[test]
    fn test_malformed_json_reports_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs.json");
        fs::write(&path, "[{\"muscle_group\": \"legs\",}]").unwrap();

        let err = JsonImporter::new().import_file(&path).unwrap_err();
        match err {
            LiftLogError::Import(ImportError::ParseError { format, location, .. }) => {
                assert_eq!(format, "JSON");
                assert!(location.starts_with("line 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
