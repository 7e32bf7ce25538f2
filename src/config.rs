use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dashboard::DashboardLimits;
use crate::logging::LogConfig;
use crate::models::Goal;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Training goal used for the consistency score
    #[serde(default)]
    pub goal: Goal,

    /// Where workout logs are read from
    #[serde(default)]
    pub data: DataSettings,

    /// History windows for the dashboard
    #[serde(default)]
    pub dashboard: DashboardLimits,

    /// Logging output
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data source settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Log file or directory used when no `--file` is given
    pub logs_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            goal: Goal::default(),
            data: DataSettings::default(),
            dashboard: DashboardLimits::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Keys accepted by [`AppConfig::get_value`] and [`AppConfig::set_value`]
pub const CONFIG_KEYS: [&str; 10] = [
    "goal.type",
    "goal.target",
    "data.logs_path",
    "dashboard.history_limit",
    "dashboard.recommendation_limit",
    "dashboard.recent_limit",
    "dashboard.chart_days",
    "logging.level",
    "logging.format",
    "logging.file_path",
];

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".liftlog")
            .join("config.toml")
    }

    /// Load `path`, or the default location, falling back to defaults when
    /// the file does not exist. A file that exists but fails to parse is an
    /// error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_file(&config_path)
    }

    /// Current value of a dotted key, rendered as text
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "goal.type" => serde_plain(&self.goal.goal_type)?,
            "goal.target" => self.goal.target_value.to_string(),
            "data.logs_path" => display_path(&self.data.logs_path),
            "dashboard.history_limit" => self.dashboard.history_limit.to_string(),
            "dashboard.recommendation_limit" => self.dashboard.recommendation_limit.to_string(),
            "dashboard.recent_limit" => self.dashboard.recent_limit.to_string(),
            "dashboard.chart_days" => self.dashboard.chart_days.to_string(),
            "logging.level" => self.logging.level.to_filter(),
            "logging.format" => serde_plain(&self.logging.format)?,
            "logging.file_path" => display_path(&self.logging.file_path),
            _ => bail!("Unknown configuration key: {}", key),
        };
        Ok(value)
    }

    /// Update a dotted key from text
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || format!("Invalid value for {}: {}", key, value);

        match key {
            "goal.type" => {
                self.goal.goal_type = value.parse().map_err(anyhow::Error::msg)?;
            }
            "goal.target" => {
                self.goal.target_value = value.parse().with_context(invalid)?;
            }
            "data.logs_path" => self.data.logs_path = optional_path(value),
            "dashboard.history_limit" => {
                self.dashboard.history_limit = value.parse().with_context(invalid)?;
            }
            "dashboard.recommendation_limit" => {
                self.dashboard.recommendation_limit = value.parse().with_context(invalid)?;
            }
            "dashboard.recent_limit" => {
                self.dashboard.recent_limit = value.parse().with_context(invalid)?;
            }
            "dashboard.chart_days" => {
                self.dashboard.chart_days = value.parse().with_context(invalid)?;
            }
            "logging.level" => {
                self.logging.level = value.parse().map_err(anyhow::Error::msg)?;
            }
            "logging.format" => {
                self.logging.format = value.parse().map_err(anyhow::Error::msg)?;
            }
            "logging.file_path" => self.logging.file_path = optional_path(value),
            _ => bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }
}

/// Unit enum variant as its serde name
fn serde_plain<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_value(value)?;
    Ok(json.as_str().map(str::to_string).unwrap_or_else(|| json.to_string()))
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
