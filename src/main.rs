use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::PathBuf;

use liftlog::chart::ChartAggregator;
use liftlog::config::{AppConfig, CONFIG_KEYS};
use liftlog::display;
use liftlog::error::ErrorSeverity;
use liftlog::import::ImportManager;
use liftlog::logging::{init_logging, LogFormat, LogLevel};
use liftlog::sample;
use liftlog::{
    DashboardSnapshot, Goal, LiftLogError, RecommendationEngine, StreakScorer, WorkoutLogRecord,
    WorkoutLogValidator,
};

/// liftlog - Workout Analytics CLI
///
/// Reads exported workout logs and answers three questions: what to train
/// today, how consistent the training has been, and how much was done each
/// day over the last month.
#[derive(Parser)]
#[command(name = "liftlog")]
#[command(author = "liftlog contributors")]
#[command(version)]
#[command(about = "Workout analytics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// Where workout logs come from
#[derive(Args)]
struct Source {
    /// Workout log file or directory (JSON, CSV)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Use the built-in demo history instead of a file
    #[arg(long, conflicts_with = "file")]
    demo: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full dashboard: recommendation, streak, chart and recent workouts
    Dashboard {
        #[command(flatten)]
        source: Source,

        /// Weekly active-day target (overrides the configured goal)
        #[arg(short, long)]
        target: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Recommend which muscle group to train today
    Recommend {
        #[command(flatten)]
        source: Source,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the current streak and weekly consistency
    Streak {
        #[command(flatten)]
        source: Source,

        /// Weekly active-day target (overrides the configured goal)
        #[arg(short, long)]
        target: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show daily training volume
    Chart {
        #[command(flatten)]
        source: Source,

        /// Number of days to chart, ending today
        #[arg(short, long)]
        days: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Check workout logs against the logging form's rules
    Validate {
        #[command(flatten)]
        source: Source,
    },

    /// Write the demo history as JSON
    Sample {
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,

        /// Set a configuration value (KEY=VALUE)
        #[arg(short, long, value_name = "KEY=VALUE")]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long, value_name = "KEY")]
        get: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<LiftLogError>() {
            Some(e) if e.severity() == ErrorSeverity::Warning => {
                eprintln!("{} {}", "warning:".yellow().bold(), e.user_message());
            }
            Some(e) => eprintln!("{} {}", "error:".red().bold(), e.user_message()),
            None => eprintln!("{} {:#}", "error:".red().bold(), err),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let mut config = AppConfig::load_or_default(Some(&config_path))?;

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(log_config.level, cli.verbose);
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    init_logging(&log_config)?;

    match cli.command {
        Commands::Dashboard {
            source,
            target,
            format,
        } => {
            let logs = load_logs(&source, &config)?;
            let goal = resolve_goal(&config, target);
            let now = Local::now();
            let snapshot = DashboardSnapshot::build_with_limits(
                &logs,
                Some(&goal),
                &now,
                &config.dashboard,
            );

            match format {
                OutputFormat::Json => print_json(&snapshot)?,
                OutputFormat::Table => print!("{}", display::render_dashboard(&snapshot, &Local)),
            }
        }

        Commands::Recommend { source, format } => {
            let logs = load_logs(&source, &config)?;
            let recent = most_recent(logs, config.dashboard.recommendation_limit);
            let recommendation = RecommendationEngine::recommend(&recent, &Local::now());

            match format {
                OutputFormat::Json => print_json(&recommendation)?,
                OutputFormat::Table => print!("{}", display::render_recommendation(&recommendation)),
            }
        }

        Commands::Streak {
            source,
            target,
            format,
        } => {
            let logs = load_logs(&source, &config)?;
            let goal = resolve_goal(&config, target);
            let streak = StreakScorer::new().score(&logs, goal.target_days_per_week(), &Local::now());

            match format {
                OutputFormat::Json => print_json(&streak)?,
                OutputFormat::Table => print!("{}", display::render_streak(&streak)),
            }
        }

        Commands::Chart {
            source,
            days,
            format,
        } => {
            let logs = load_logs(&source, &config)?;
            let window = days.unwrap_or(config.dashboard.chart_days);
            let series = ChartAggregator::with_window(window).build_series(&logs, &Local::now());

            match format {
                OutputFormat::Json => print_json(&series)?,
                OutputFormat::Table => println!("{}", display::render_chart(&series)),
            }
        }

        Commands::Validate { source } => {
            let logs = load_logs(&source, &config)?;
            validate_logs(&logs)?;
        }

        Commands::Sample { output } => {
            let logs = sample::sample_history(&Local::now());
            let json = serde_json::to_string_pretty(&logs)?;

            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!(
                        "{} Wrote {} demo workouts to {}",
                        "✓".green(),
                        logs.len(),
                        path.display()
                    );
                }
                None => println!("{}", json),
            }
        }

        Commands::Config {
            list,
            init,
            set,
            get,
        } => {
            if init {
                if config_path.exists() {
                    println!("Config already exists: {}", config_path.display());
                } else {
                    config.save_to_file(&config_path)?;
                    println!("{} Created {}", "✓".green(), config_path.display());
                }
            }

            if let Some(key_value) = set {
                let (key, value) = key_value
                    .split_once('=')
                    .ok_or_else(|| LiftLogError::Configuration(format!(
                        "expected KEY=VALUE, got '{}'",
                        key_value
                    )))?;
                config.set_value(key.trim(), value)?;
                config.save_to_file(&config_path)?;
                println!("{} {} = {}", "✓".green(), key.trim(), config.get_value(key.trim())?);
            }

            if let Some(key) = get {
                println!("{}", config.get_value(&key)?);
            }

            if list {
                println!("{}", format!("Configuration ({})", config_path.display()).bold());
                for key in CONFIG_KEYS {
                    println!("  {:<32} {}", key, config.get_value(key)?);
                }
            }
        }
    }

    Ok(())
}

/// Logs from `--demo`, `--file`, or the configured path, in that order
fn load_logs(source: &Source, config: &AppConfig) -> Result<Vec<WorkoutLogRecord>> {
    if source.demo {
        return Ok(sample::sample_history(&Local::now()));
    }

    let path = source
        .file
        .clone()
        .or_else(|| config.data.logs_path.clone())
        .ok_or_else(|| {
            LiftLogError::Configuration(
                "no workout logs given; pass --file, --demo, or set data.logs_path".to_string(),
            )
        })?;

    let logs = ImportManager::with_zone(Local).import_path(&path)?;
    tracing::info!(count = logs.len(), path = %path.display(), "Loaded workout logs");
    Ok(logs)
}

fn resolve_goal(config: &AppConfig, target: Option<u32>) -> Goal {
    target
        .map(Goal::weekly_days)
        .unwrap_or_else(|| config.goal.clone())
}

fn most_recent(mut logs: Vec<WorkoutLogRecord>, limit: usize) -> Vec<WorkoutLogRecord> {
    logs.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
    logs.truncate(limit);
    logs
}

fn validate_logs(logs: &[WorkoutLogRecord]) -> Result<()> {
    let validator = WorkoutLogValidator::new();
    let mut failed = 0;

    for (index, log) in logs.iter().enumerate() {
        let issues = validator.validate(log);
        if issues.is_empty() {
            continue;
        }
        failed += 1;
        println!(
            "{} #{} {} ({})",
            "✗".red(),
            index + 1,
            log.exercise_name,
            log.logged_at.format("%Y-%m-%d %H:%M")
        );
        for issue in issues {
            println!("    {}", issue);
        }
    }

    if failed > 0 {
        return Err(LiftLogError::Validation(format!(
            "{} of {} records failed validation",
            failed,
            logs.len()
        ))
        .into());
    }

    println!("{} All {} records are valid", "✓".green(), logs.len());
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
