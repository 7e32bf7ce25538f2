//! Unified error hierarchy for liftlog
//!
//! The analytics core never fails; these types cover everything around it:
//! importing log files, validating records, and loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for liftlog operations
#[derive(Debug, Error)]
pub enum LiftLogError {
    /// Import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Workout log import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// No importer handles this file type
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Format-specific parsing error
    #[error("Parse error in {format} at {location}: {reason}")]
    ParseError {
        format: String,
        location: String,
        reason: String,
    },

    /// Required column or field missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

/// Result type alias for liftlog operations
pub type Result<T> = std::result::Result<T, LiftLogError>;

impl LiftLogError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftLogError::Import(ImportError::FileNotFound { .. }) => ErrorSeverity::Warning,
            LiftLogError::Validation(_) => ErrorSeverity::Warning,
            LiftLogError::Configuration(_) => ErrorSeverity::Error,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftLogError::Import(ImportError::FileNotFound { path }) => {
                format!("Could not find workout log file: {}", path.display())
            }
            LiftLogError::Import(ImportError::UnsupportedFormat { format }) => {
                format!(
                    "Workout logs in '{}' format are not supported. Use .json or .csv files.",
                    format
                )
            }
            LiftLogError::Import(ImportError::MissingField { field }) => {
                format!("Workout log file is missing the '{}' column.", field)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = LiftLogError::Import(ImportError::FileNotFound {
            path: PathBuf::from("/test/logs.json"),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = LiftLogError::Validation("2 invalid records".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = LiftLogError::Configuration("bad goal".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_user_messages() {
        let err = LiftLogError::Import(ImportError::FileNotFound {
            path: PathBuf::from("logs.json"),
        });
        assert!(err.user_message().contains("Could not find"));

        let err = LiftLogError::Import(ImportError::UnsupportedFormat {
            format: "xlsx".to_string(),
        });
        assert!(err.user_message().contains("xlsx"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ImportError::ParseError {
            format: "CSV".to_string(),
            location: "row 3".to_string(),
            reason: "invalid date".to_string(),
        };
        assert_eq!(err.to_string(), "Parse error in CSV at row 3: invalid date");
    }
}
