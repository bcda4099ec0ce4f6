//! Activity analysis
//!
//! Reduces type-tagged activity segments to active minutes, a per-type
//! time distribution, and the top three activities by accumulated time.

use std::collections::BTreeMap;

use crate::models::{ActivitySummary, ActivityType, Segment};

/// Number of activity labels reported in the top list.
const TOP_ACTIVITY_COUNT: usize = 3;

/// Stateless analyzer for activity segments.
pub struct ActivityAnalyzer;

impl ActivityAnalyzer {
    /// Summarize activity segments over the analysis window.
    ///
    /// Durations are minutes derived from each segment's bounds. Active
    /// minutes sum the segments whose type is in the active subset
    /// (On-foot, Walking, Running, Exercise). The distribution covers
    /// all type codes, known or not; the top-3 list maps codes through
    /// the taxonomy, labelling unknown codes "Unknown". Ties in the top
    /// list break toward the lowest type code. Empty input returns the
    /// zero summary with an empty top list.
    pub fn analyze(segments: &[Segment]) -> ActivitySummary {
        if segments.is_empty() {
            return ActivitySummary::default();
        }

        let mut distribution: BTreeMap<i64, f64> = BTreeMap::new();
        let mut active_minutes = 0.0;

        for seg in segments {
            let minutes = seg.duration_minutes();
            *distribution.entry(seg.code).or_insert(0.0) += minutes;
            if ActivityType::code_is_active(seg.code) {
                active_minutes += minutes;
            }
        }

        // BTreeMap iterates codes ascending; the stable sort then leaves
        // equal durations in lowest-code-first order.
        let mut ranked: Vec<(i64, f64)> = distribution.iter().map(|(&c, &m)| (c, m)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let top_activities = ranked
            .iter()
            .take(TOP_ACTIVITY_COUNT)
            .map(|&(code, _)| ActivityType::label_for_code(code).to_string())
            .collect();

        ActivitySummary {
            active_minutes,
            top_activities,
            distribution_by_type: distribution,
        }
    }
}
