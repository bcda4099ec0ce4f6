//! Goal configuration and application settings
//!
//! [`GoalConfig`] holds the per-metric numeric targets the
//! recommendation engine evaluates against. It is owned by the caller,
//! lives for one analysis session, and is mutated only through
//! [`GoalConfig::apply`] with an explicit [`GoalUpdate`] — there is no
//! ambient or global goal state.
//!
//! [`AppConfig`] is the CLI's persisted settings file (TOML under the
//! platform config directory).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-metric numeric targets consumed by the recommendation engine.
///
/// The aggregators never read goals; only the recommendation rules do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Target steps per day
    pub daily_steps: u32,

    /// Target hours of sleep per night
    pub sleep_hours: f64,

    /// Target minutes of moderate activity per day
    pub active_minutes: u32,
}

impl Default for GoalConfig {
    fn default() -> Self {
        GoalConfig {
            daily_steps: 8000,
            sleep_hours: 7.0,
            active_minutes: 30,
        }
    }
}

impl GoalConfig {
    /// Merge a partial set of overrides into this config. Fields the
    /// update leaves unset keep their current values.
    pub fn apply(&mut self, update: &GoalUpdate) {
        if let Some(daily_steps) = update.daily_steps {
            self.daily_steps = daily_steps;
        }
        if let Some(sleep_hours) = update.sleep_hours {
            self.sleep_hours = sleep_hours;
        }
        if let Some(active_minutes) = update.active_minutes {
            self.active_minutes = active_minutes;
        }
    }

    /// Copy of this config with an update applied.
    pub fn with(&self, update: &GoalUpdate) -> Self {
        let mut merged = *self;
        merged.apply(update);
        merged
    }
}

/// Partial goal override merged into a [`GoalConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalUpdate {
    pub daily_steps: Option<u32>,
    pub sleep_hours: Option<f64>,
    pub active_minutes: Option<u32>,
}

impl GoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.daily_steps.is_none() && self.sleep_hours.is_none() && self.active_minutes.is_none()
    }
}

/// Persisted application settings for the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Goals used when the analyze command is run without overrides
    #[serde(default)]
    pub goals: GoalConfig,
}

impl AppConfig {
    /// Default config file location under the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("could not determine config directory")?;
        Ok(base.join("healthrs").join("config.toml"))
    }

    /// Load settings from a TOML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Save settings as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, raw)
            .with_context(|| format!("failed to write config file {}", path.display()))
    }
}
