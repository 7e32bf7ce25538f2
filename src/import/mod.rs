use crate::error::{ImportError, LiftLogError, Result};
use crate::models::WorkoutLogRecord;
use crate::validation::WorkoutLogValidator;
use chrono::{TimeZone, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod csv;
pub mod json;

/// Trait for importing workout logs from different file formats
pub trait ImportFormat {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Import workout logs from the file
    fn import_file(&self, file_path: &Path) -> Result<Vec<WorkoutLogRecord>>;

    /// Get the format name for this importer
    fn format_name(&self) -> &'static str;
}

/// Whether `file_path` has the given extension, case-insensitively
pub(crate) fn has_extension(file_path: &Path, expected: &str) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(expected))
        .unwrap_or(false)
}

/// Manager for coordinating different import formats
pub struct ImportManager {
    importers: Vec<Box<dyn ImportFormat>>,
    validator: WorkoutLogValidator,
}

impl ImportManager {
    /// Create a new import manager with all available importers. CSV
    /// timestamps without an offset are read as UTC.
    pub fn new() -> Self {
        Self::with_zone(Utc)
    }

    /// Import manager whose CSV importer reads offset-less timestamps as
    /// wall-clock times in `zone`
    pub fn with_zone<Tz: TimeZone + 'static>(zone: Tz) -> Self {
        let importers: Vec<Box<dyn ImportFormat>> = vec![
            Box::new(json::JsonImporter::new()),
            Box::new(csv::CsvImporter::with_zone(zone)),
        ];

        Self {
            importers,
            validator: WorkoutLogValidator::new(),
        }
    }

    fn importer_for(&self, file_path: &Path) -> Option<&dyn ImportFormat> {
        self.importers
            .iter()
            .find(|importer| importer.can_import(file_path))
            .map(|importer| importer.as_ref())
    }

    /// Import a single file, picking the importer by extension
    pub fn import_file(&self, file_path: &Path) -> Result<Vec<WorkoutLogRecord>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound {
                path: file_path.to_path_buf(),
            }
            .into());
        }

        let importer = self.importer_for(file_path).ok_or_else(|| {
            LiftLogError::from(ImportError::UnsupportedFormat {
                format: file_path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            })
        })?;

        info!(
            file = %file_path.display(),
            format = importer.format_name(),
            "Importing workout logs"
        );

        let records = importer.import_file(file_path)?;
        self.report_invalid(file_path, &records);
        Ok(records)
    }

    /// Import a file, or every supported file in a directory
    pub fn import_path(&self, path: &Path) -> Result<Vec<WorkoutLogRecord>> {
        if path.is_dir() {
            self.import_directory(path)
        } else {
            self.import_file(path)
        }
    }

    /// Import all supported files from a directory
    pub fn import_directory(&self, dir_path: &Path) -> Result<Vec<WorkoutLogRecord>> {
        let mut all_records = Vec::new();
        let files = self.collect_importable_files(dir_path)?;

        if files.is_empty() {
            warn!(dir = %dir_path.display(), "No importable files found");
            return Ok(all_records);
        }

        let pb = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        for file_path in files {
            let file_name = file_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            pb.set_message(format!("Processing {}", file_name));

            match self.import_file(&file_path) {
                Ok(mut records) => {
                    pb.println(format!("✓ Imported {} logs from {}", records.len(), file_name));
                    all_records.append(&mut records);
                }
                Err(e) => {
                    warn!(file = %file_name, error = %e, "Skipping file");
                    pb.println(format!("✗ Failed to import {}: {}", file_name, e));
                }
            }

            pb.inc(1);
        }

        pb.finish_with_message("Import complete");
        Ok(all_records)
    }

    /// Collect all files that can be imported from a directory, sorted by path
    fn collect_importable_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(dir_path)? {
            let path = entry?.path();
            if path.is_file() && self.can_import_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Invalid records are kept, since the analytics accept any well-typed
    /// record; they are only reported.
    fn report_invalid(&self, file_path: &Path, records: &[WorkoutLogRecord]) {
        for (index, record) in records.iter().enumerate() {
            let issues = self.validator.validate(record);
            if !issues.is_empty() {
                let summary: Vec<String> = issues.iter().map(|issue| issue.to_string()).collect();
                warn!(
                    file = %file_path.display(),
                    record = index + 1,
                    issues = %summary.join("; "),
                    "Imported record fails validation"
                );
            }
        }
    }

    /// Check if this manager can import a given file
    pub fn can_import_file(&self, file_path: &Path) -> bool {
        self.importer_for(file_path).is_some()
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}
