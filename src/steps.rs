//! Step-count analysis
//!
//! Reduces a window of step samples to daily totals and a short-term
//! trend. Absence of data is a summary of zeros, never an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Sample, StepsSummary, Trend};

/// Number of most recent daily sums used for the trend estimate.
const TREND_WINDOW_DAYS: usize = 7;

/// Slope magnitude below which the daily series counts as stable.
const TREND_SLOPE_THRESHOLD: f64 = 0.1;

/// Stateless analyzer for step-count samples.
pub struct StepsAnalyzer;

impl StepsAnalyzer {
    /// Summarize step samples over the analysis window.
    ///
    /// Samples are grouped by local calendar day and summed; total,
    /// daily average (rounded to the nearest integer), and max/min are
    /// taken over the per-day sums. The trend is a least-squares slope
    /// over the last seven daily sums. Empty input returns the zero
    /// summary with a stable trend.
    pub fn analyze(samples: &[Sample]) -> StepsSummary {
        if samples.is_empty() {
            return StepsSummary::default();
        }

        // BTreeMap keeps the daily series chronological for the trend.
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for sample in samples {
            *daily.entry(sample.timestamp.date()).or_insert(0.0) += sample.value;
        }

        let series: Vec<f64> = daily.values().copied().collect();
        let total: f64 = series.iter().sum();
        let max = series.iter().copied().fold(f64::MIN, f64::max);
        let min = series.iter().copied().fold(f64::MAX, f64::min);

        StepsSummary {
            total: total.round() as u64,
            daily_average: (total / series.len() as f64).round() as u64,
            max: max.round() as u64,
            min: min.round() as u64,
            trend: Self::trend(&series),
        }
    }

    /// Classify the direction of a chronological daily series.
    ///
    /// Fits value against 0-based day index over the last
    /// [`TREND_WINDOW_DAYS`] entries; fewer than two entries is stable.
    fn trend(daily_series: &[f64]) -> Trend {
        let start = daily_series.len().saturating_sub(TREND_WINDOW_DAYS);
        let recent = &daily_series[start..];
        if recent.len() < 2 {
            return Trend::Stable;
        }

        let slope = Self::least_squares_slope(recent);
        if slope > TREND_SLOPE_THRESHOLD {
            Trend::Increasing
        } else if slope < -TREND_SLOPE_THRESHOLD {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }

    /// Ordinary least-squares slope of `values` against their indices.
    fn least_squares_slope(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            numerator += dx * (y - mean_y);
            denominator += dx * dx;
        }

        if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        }
    }
}
