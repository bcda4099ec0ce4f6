//! Sleep analysis
//!
//! Reduces stage-tagged sleep segments to nightly totals, a per-day
//! average, and a quality classification. Malformed rows are expected
//! to have been removed by [`crate::sanitize`]; this analyzer handles
//! the remaining degenerate shapes (no input at all, input with no
//! valid sleep stages) by returning the zero summary.
//!
//! Quality is the share of total sleep spent in the restorative stages
//! (Deep + REM), classified into the four bands of
//! [`QualityLabel::from_percent`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::models::{QualityLabel, Segment, SleepStage, SleepSummary};

/// Stateless analyzer for sleep-stage segments.
pub struct SleepAnalyzer;

impl SleepAnalyzer {
    /// Summarize sleep segments over the analysis window.
    ///
    /// Only segments in valid sleep stages (Light, Deep, REM) contribute;
    /// awake, generic-sleep, in-bed, and unknown-stage segments are
    /// excluded. The per-day average prefers each segment's explicit date
    /// when the source supplied one and falls back to its start date.
    /// Empty input and input with no valid sleep both return the zero
    /// summary; the latter is logged since it usually means the source
    /// delivered only unstaged sessions.
    pub fn analyze(segments: &[Segment]) -> SleepSummary {
        if segments.is_empty() {
            return SleepSummary::default();
        }

        let staged: Vec<(SleepStage, &Segment)> = segments
            .iter()
            .filter_map(|seg| SleepStage::from_code(seg.code).map(|stage| (stage, seg)))
            .filter(|(stage, _)| stage.is_valid_sleep())
            .collect();

        if staged.is_empty() {
            warn!(
                segments = segments.len(),
                "no valid sleep sessions after stage filtering"
            );
            return SleepSummary::default();
        }

        let mut distribution: BTreeMap<SleepStage, f64> = BTreeMap::new();
        let mut total_hours = 0.0;
        let mut quality_hours = 0.0;
        let mut days: BTreeSet<_> = BTreeSet::new();

        for (stage, seg) in &staged {
            let hours = seg.duration_hours();
            total_hours += hours;
            *distribution.entry(*stage).or_insert(0.0) += hours;
            if stage.is_quality_sleep() {
                quality_hours += hours;
            }
            days.insert(seg.effective_date());
        }

        let day_count = days.len().max(1);
        let quality_percent = if total_hours > 0.0 {
            quality_hours / total_hours * 100.0
        } else {
            0.0
        };

        SleepSummary {
            total_hours,
            avg_hours_per_day: total_hours / day_count as f64,
            quality_percent,
            quality_label: QualityLabel::from_percent(quality_percent),
            distribution_by_stage: distribution,
        }
    }
}
