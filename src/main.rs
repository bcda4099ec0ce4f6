use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use healthrs::config::{AppConfig, GoalUpdate};
use healthrs::logging::{LogConfig, LogLevel};
use healthrs::{analysis, import, logging, report, sanitize};

/// healthrs - Health Metrics Analysis CLI
///
/// Reads timestamped step, heart-rate, sleep and activity data,
/// summarizes each metric and prints prioritized recommendations
/// against configurable goals.
#[derive(Parser)]
#[command(name = "healthrs")]
#[command(author = "healthrs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Health Metrics Analysis CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze health data files and print a report
    Analyze {
        /// Step samples (CSV or JSON)
        #[arg(long, value_name = "FILE")]
        steps: Option<PathBuf>,

        /// Heart-rate samples (CSV or JSON)
        #[arg(long, value_name = "FILE")]
        heart_rate: Option<PathBuf>,

        /// Sleep segments (CSV or JSON)
        #[arg(long, value_name = "FILE")]
        sleep: Option<PathBuf>,

        /// Activity segments (CSV or JSON)
        #[arg(long, value_name = "FILE")]
        activity: Option<PathBuf>,

        /// Override the daily step goal for this run
        #[arg(long)]
        goal_steps: Option<u32>,

        /// Override the nightly sleep-hours goal for this run
        #[arg(long)]
        goal_sleep: Option<f64>,

        /// Override the daily active-minutes goal for this run
        #[arg(long)]
        goal_active: Option<u32>,
    },

    /// Show or update the persisted goals
    Goals {
        /// New daily step goal
        #[arg(long)]
        daily_steps: Option<u32>,

        /// New nightly sleep-hours goal
        #[arg(long)]
        sleep_hours: Option<f64>,

        /// New daily active-minutes goal
        #[arg(long)]
        active_minutes: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogConfig {
        level: LogLevel::from_verbosity(cli.verbose),
        ..LogConfig::default()
    });

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_path()?,
    };
    let mut config = AppConfig::load(&config_path)?;

    match cli.command {
        Commands::Analyze {
            steps,
            heart_rate,
            sleep,
            activity,
            goal_steps,
            goal_sleep,
            goal_active,
        } => {
            let goals = config.goals.with(&GoalUpdate {
                daily_steps: goal_steps,
                sleep_hours: goal_sleep,
                active_minutes: goal_active,
            });

            let input = analysis::AnalysisInput {
                steps: load_samples(steps.as_deref())?,
                heart_rate: load_samples(heart_rate.as_deref())?,
                sleep: load_segments(sleep.as_deref())?,
                activity: load_segments(activity.as_deref())?,
            };

            let result = analysis::analyze_all(&input, &goals);
            println!("{}", report::render(&result));
        }

        Commands::Goals {
            daily_steps,
            sleep_hours,
            active_minutes,
        } => {
            let update = GoalUpdate {
                daily_steps,
                sleep_hours,
                active_minutes,
            };

            if !update.is_empty() {
                config.goals.apply(&update);
                config.save(&config_path)?;
                println!("{}", "✓ Goals updated".green());
            }

            println!("  Daily steps:    {}", config.goals.daily_steps);
            println!("  Sleep hours:    {}", config.goals.sleep_hours);
            println!("  Active minutes: {}", config.goals.active_minutes);
        }
    }

    Ok(())
}

fn load_samples(path: Option<&Path>) -> Result<Vec<healthrs::models::Sample>> {
    match path {
        Some(path) => {
            let raw = import::read_samples(path)?;
            Ok(sanitize::sanitize_samples(&raw))
        }
        None => Ok(Vec::new()),
    }
}

fn load_segments(path: Option<&Path>) -> Result<Vec<healthrs::models::Segment>> {
    match path {
        Some(path) => {
            let raw = import::read_segments(path)?;
            Ok(sanitize::sanitize_segments(&raw))
        }
        None => Ok(Vec::new()),
    }
}
