//! Heart-rate analysis
//!
//! Plain statistics over continuous bpm readings plus a resting-rate
//! approximation. The resting value is the lowest reading taken in the
//! early-morning window; it is a heuristic for dashboard display, not a
//! clinical measurement.

use chrono::Timelike;

use crate::models::{HeartRateSummary, Sample};

/// Local hour (exclusive) bounding the overnight resting window [0, 6).
const RESTING_WINDOW_END_HOUR: u32 = 6;

/// Stateless analyzer for heart-rate readings.
pub struct HeartRateAnalyzer;

impl HeartRateAnalyzer {
    /// Summarize heart-rate readings over the analysis window.
    ///
    /// Average, max, and min are taken over all readings. The resting
    /// approximation is the minimum reading whose local hour falls in
    /// `[0, 6)`; 0 when no reading falls in that window. Empty input
    /// returns the zero summary.
    pub fn analyze(samples: &[Sample]) -> HeartRateSummary {
        if samples.is_empty() {
            return HeartRateSummary::default();
        }

        let sum: f64 = samples.iter().map(|s| s.value).sum();
        let max = samples.iter().map(|s| s.value).fold(f64::MIN, f64::max);
        let min = samples.iter().map(|s| s.value).fold(f64::MAX, f64::min);

        let resting = samples
            .iter()
            .filter(|s| s.timestamp.hour() < RESTING_WINDOW_END_HOUR)
            .map(|s| s.value)
            .fold(f64::MAX, f64::min);

        HeartRateSummary {
            average: sum / samples.len() as f64,
            max,
            min,
            resting: if resting == f64::MAX { 0.0 } else { resting },
        }
    }
}
