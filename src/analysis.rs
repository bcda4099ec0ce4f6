//! Full analysis pass: four analyzers plus the recommendation engine
//!
//! The analyzers are pure functions over immutable slices and share no
//! state, so they run in parallel; the recommendation engine starts
//! once all four summaries exist.

use rayon::join;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityAnalyzer;
use crate::config::GoalConfig;
use crate::heart_rate::HeartRateAnalyzer;
use crate::models::{
    ActivitySummary, HeartRateSummary, Recommendation, Sample, Segment, SleepSummary,
    StepsSummary,
};
use crate::recommendations::RecommendationEngine;
use crate::sleep::SleepAnalyzer;
use crate::steps::StepsAnalyzer;

/// Sanitized input tables for one analysis window, one per metric kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub steps: Vec<Sample>,
    pub heart_rate: Vec<Sample>,
    pub sleep: Vec<Segment>,
    pub activity: Vec<Segment>,
}

/// The complete result of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub steps: StepsSummary,
    pub heart_rate: HeartRateSummary,
    pub sleep: SleepSummary,
    pub activity: ActivitySummary,
    pub recommendations: Vec<Recommendation>,
}

/// Run the four analyzers in parallel and evaluate the recommendation
/// rules over the results.
///
/// Never fails: missing or degenerate inputs surface as zero summaries
/// and the corresponding "no data" recommendations.
pub fn analyze_all(input: &AnalysisInput, goals: &GoalConfig) -> HealthReport {
    let ((steps, heart_rate), (sleep, activity)) = join(
        || {
            join(
                || StepsAnalyzer::analyze(&input.steps),
                || HeartRateAnalyzer::analyze(&input.heart_rate),
            )
        },
        || {
            join(
                || SleepAnalyzer::analyze(&input.sleep),
                || ActivityAnalyzer::analyze(&input.activity),
            )
        },
    );

    let recommendations = RecommendationEngine::generate(
        Some(&steps),
        Some(&sleep),
        Some(&activity),
        Some(&heart_rate),
        goals,
    );

    HealthReport {
        steps,
        heart_rate,
        sleep,
        activity,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority, Trend};
    use chrono::NaiveDate;

    fn sample(day: u32, hour: u32, value: f64) -> Sample {
        Sample {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            value,
        }
    }

    fn segment(day: u32, start_h: u32, minutes: i64, code: i64) -> Segment {
        let start = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(start_h, 0, 0)
            .unwrap();
        Segment {
            start,
            end: start + chrono::Duration::minutes(minutes),
            code,
            date: None,
        }
    }

    #[test]
    fn test_empty_input_produces_complete_report() {
        let report = analyze_all(&AnalysisInput::default(), &GoalConfig::default());
        assert_eq!(report.steps, StepsSummary::default());
        assert_eq!(report.heart_rate, HeartRateSummary::default());
        assert_eq!(report.sleep, SleepSummary::default());
        assert_eq!(report.activity, ActivitySummary::default());
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_full_pass_over_mixed_data() {
        let input = AnalysisInput {
            steps: vec![sample(10, 9, 9000.0), sample(11, 9, 7000.0)],
            heart_rate: vec![sample(10, 3, 55.0), sample(10, 15, 130.0)],
            sleep: vec![
                segment(10, 0, 300, 4),
                segment(10, 5, 120, 5),
                segment(10, 7, 60, 6),
            ],
            activity: vec![segment(10, 9, 40, 7), segment(10, 12, 20, 0)],
        };

        let report = analyze_all(&input, &GoalConfig::default());

        assert_eq!(report.steps.total, 16000);
        assert_eq!(report.steps.daily_average, 8000);
        assert_eq!(report.steps.trend, Trend::Decreasing);
        assert_eq!(report.heart_rate.resting, 55.0);
        assert!((report.sleep.total_hours - 8.0).abs() < 1e-9);
        assert!((report.activity.active_minutes - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_is_deterministic() {
        let input = AnalysisInput {
            steps: vec![sample(10, 9, 2000.0)],
            heart_rate: vec![sample(10, 14, 90.0)],
            sleep: vec![segment(10, 0, 300, 4)],
            activity: vec![segment(10, 9, 10, 7)],
        };
        let goals = GoalConfig::default();

        let first = analyze_all(&input, &goals);
        let second = analyze_all(&input, &goals);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_data_recommendations_for_missing_metrics() {
        let input = AnalysisInput {
            steps: vec![sample(10, 9, 10000.0)],
            ..AnalysisInput::default()
        };
        let report = analyze_all(&input, &GoalConfig::default());

        let categories: Vec<Category> =
            report.recommendations.iter().map(|r| r.category).collect();
        assert!(categories.contains(&Category::Sleep));
        assert!(categories.contains(&Category::Activity));

        let sleep_rec = report
            .recommendations
            .iter()
            .find(|r| r.category == Category::Sleep)
            .unwrap();
        assert_eq!(sleep_rec.priority, Priority::High);
    }
}
