// Library interface for healthrs modules
// This allows integration tests to access the core functionality

pub mod activity;
pub mod analysis;
pub mod config;
pub mod error;
pub mod heart_rate;
pub mod import;
pub mod logging;
pub mod models;
pub mod recommendations;
pub mod report;
pub mod sanitize;
pub mod sleep;
pub mod steps;

// Re-export commonly used types for convenience
pub use models::*;
pub use activity::ActivityAnalyzer;
pub use heart_rate::HeartRateAnalyzer;
pub use sleep::SleepAnalyzer;
pub use steps::StepsAnalyzer;
pub use analysis::{analyze_all, AnalysisInput, HealthReport};
pub use recommendations::RecommendationEngine;
pub use config::{AppConfig, GoalConfig, GoalUpdate};
pub use sanitize::{sanitize_samples, sanitize_segments, RawSample, RawSegment};
pub use error::{HealthRsError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
