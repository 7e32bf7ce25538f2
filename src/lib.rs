// Library interface for liftlog
// The binary and the integration tests both go through these re-exports

pub mod calendar;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod recommendation;
pub mod sample;
pub mod streak;
pub mod validation;

// Re-export commonly used types for convenience
pub use models::*;
pub use chart::{build_series, build_series_now, ChartAggregator, ChartDataPoint};
pub use dashboard::{DashboardLimits, DashboardSnapshot};
pub use recommendation::{
    recommend, recommend_now, RecommendationEngine, RecoveryStatus, WorkoutRecommendation,
};
pub use streak::{score, score_now, StreakResult, StreakScorer};
pub use validation::{ValidationIssue, WorkoutLogValidator};
pub use error::{ImportError, LiftLogError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
