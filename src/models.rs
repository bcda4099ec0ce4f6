//! Core data model for physiological samples and analysis results
//!
//! Two input shapes cover all four metric kinds:
//!
//! - [`Sample`]: a timestamped scalar reading (step count, heart-rate bpm)
//! - [`Segment`]: a timestamped interval with a categorical type code
//!   (sleep stage, activity type)
//!
//! The sleep-stage and activity-type taxonomies live here as the single
//! source of truth. Analyzers filter on the subsets they define and
//! presentation code resolves labels through the same enums, so the code
//! mapping can never drift between call sites.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single timestamped scalar reading (steps or heart-rate bpm).
///
/// Timestamps are in the user's local time: daily grouping and the
/// resting heart-rate window operate on local dates and hours.
/// Ordering is irrelevant to correctness and duplicate timestamps are
/// retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Local time the reading was taken
    pub timestamp: NaiveDateTime,

    /// Reading value (step count or bpm)
    pub value: f64,
}

/// A timestamped interval tagged with a categorical type code.
///
/// Used for both sleep stages and activity types. The invariant
/// `end >= start` is enforced by the sanitization step; duration is
/// always derived from `start`/`end`, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Interval start (local time)
    pub start: NaiveDateTime,

    /// Interval end (local time), `end >= start`
    pub end: NaiveDateTime,

    /// Sleep-stage or activity-type code
    pub code: i64,

    /// Explicit calendar date for day-based averaging, when the source
    /// provides one. Falls back to the start date otherwise.
    pub date: Option<NaiveDate>,
}

impl Segment {
    /// Segment duration in hours, derived from start/end.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }

    /// Segment duration in minutes, derived from start/end.
    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 60.0
    }

    /// Calendar date used for day-based grouping: the explicit date if
    /// the source supplied one, the start date otherwise.
    pub fn effective_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| self.start.date())
    }
}

/// Sleep stages as reported by wearable trackers
///
/// Codes follow the Google Fit sleep-stage scheme. Only Light, Deep, and
/// REM count as actual sleep; Deep and REM are the restorative stages
/// that drive the quality metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SleepStage {
    /// Awake periods during the sleep window (code 1)
    Awake,
    /// Generic sleep, stage unknown (code 2)
    Sleep,
    /// In bed but not asleep (code 3)
    InBed,
    /// Light sleep, NREM 1 & 2 (code 4)
    Light,
    /// Deep / slow-wave sleep (code 5)
    Deep,
    /// REM sleep (code 6)
    #[serde(rename = "REM")]
    Rem,
}

impl SleepStage {
    /// Map a raw stage code to its stage, `None` for unknown codes.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(SleepStage::Awake),
            2 => Some(SleepStage::Sleep),
            3 => Some(SleepStage::InBed),
            4 => Some(SleepStage::Light),
            5 => Some(SleepStage::Deep),
            6 => Some(SleepStage::Rem),
            _ => None,
        }
    }

    /// True for stages that count as actual sleep (Light, Deep, REM).
    pub fn is_valid_sleep(self) -> bool {
        matches!(self, SleepStage::Light | SleepStage::Deep | SleepStage::Rem)
    }

    /// True for the restorative stages that contribute to sleep quality
    /// (Deep, REM).
    pub fn is_quality_sleep(self) -> bool {
        matches!(self, SleepStage::Deep | SleepStage::Rem)
    }
}

impl fmt::Display for SleepStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepStage::Awake => write!(f, "Awake"),
            SleepStage::Sleep => write!(f, "Sleep"),
            SleepStage::InBed => write!(f, "In bed"),
            SleepStage::Light => write!(f, "Light"),
            SleepStage::Deep => write!(f, "Deep"),
            SleepStage::Rem => write!(f, "REM"),
        }
    }
}

/// Activity types as reported by the activity-recognition layer
///
/// Codes follow the Google Fit activity scheme. The closed subset
/// OnFoot, Walking, Running, Exercise counts toward active minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityType {
    Inactive,
    InVehicle,
    Cycling,
    OnFoot,
    Tilting,
    Walking,
    Running,
    Sleeping,
    Exercise,
    InTransit,
}

impl ActivityType {
    /// Map a raw activity code to its type, `None` for unknown codes.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ActivityType::Inactive),
            1 => Some(ActivityType::InVehicle),
            2 => Some(ActivityType::Cycling),
            3 => Some(ActivityType::OnFoot),
            4 => Some(ActivityType::Tilting),
            7 => Some(ActivityType::Walking),
            8 => Some(ActivityType::Running),
            72 => Some(ActivityType::Sleeping),
            109 => Some(ActivityType::Exercise),
            113 => Some(ActivityType::InTransit),
            _ => None,
        }
    }

    /// Human label for a raw code; unknown codes map to "Unknown".
    pub fn label_for_code(code: i64) -> &'static str {
        Self::from_code(code).map_or("Unknown", Self::label)
    }

    /// Human label for this activity type.
    pub fn label(self) -> &'static str {
        match self {
            ActivityType::Inactive => "Inactive",
            ActivityType::InVehicle => "In-vehicle",
            ActivityType::Cycling => "Cycling",
            ActivityType::OnFoot => "On-foot",
            ActivityType::Tilting => "Tilting",
            ActivityType::Walking => "Walking",
            ActivityType::Running => "Running",
            ActivityType::Sleeping => "Sleeping",
            ActivityType::Exercise => "Exercise",
            ActivityType::InTransit => "In-transit",
        }
    }

    /// True for types counted toward active minutes.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ActivityType::OnFoot
                | ActivityType::Walking
                | ActivityType::Running
                | ActivityType::Exercise
        )
    }

    /// True if a raw code belongs to the active subset.
    pub fn code_is_active(code: i64) -> bool {
        Self::from_code(code).is_some_and(Self::is_active)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Direction of the recent daily-steps series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Sleep quality bands derived from the restorative-sleep percentage
///
/// Non-overlapping bands over `quality_percent`:
/// - `[60, 100]` → Good
/// - `[40, 60)`  → Fair
/// - `[20, 40)`  → Poor
/// - `[0, 20)`   → VeryPoor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl QualityLabel {
    /// Classify a quality percentage into its band.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 60.0 {
            QualityLabel::Good
        } else if percent >= 40.0 {
            QualityLabel::Fair
        } else if percent >= 20.0 {
            QualityLabel::Poor
        } else {
            QualityLabel::VeryPoor
        }
    }

    /// True for Poor or VeryPoor, the bands that trigger a sleep-hygiene
    /// recommendation.
    pub fn is_poor_or_worse(self) -> bool {
        matches!(self, QualityLabel::Poor | QualityLabel::VeryPoor)
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityLabel::Good => write!(f, "good"),
            QualityLabel::Fair => write!(f, "fair"),
            QualityLabel::Poor => write!(f, "poor"),
            QualityLabel::VeryPoor => write!(f, "very poor"),
        }
    }
}

/// Summary statistics for step counts over the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsSummary {
    /// Total steps across all days
    pub total: u64,

    /// Mean of the per-day sums, rounded to the nearest integer
    pub daily_average: u64,

    /// Highest single-day sum
    pub max: u64,

    /// Lowest single-day sum
    pub min: u64,

    /// Direction of the last seven daily sums
    pub trend: Trend,
}

impl Default for StepsSummary {
    fn default() -> Self {
        StepsSummary {
            total: 0,
            daily_average: 0,
            max: 0,
            min: 0,
            trend: Trend::Stable,
        }
    }
}

/// Summary statistics for heart-rate readings over the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSummary {
    /// Mean bpm over all readings
    pub average: f64,

    /// Highest reading
    pub max: f64,

    /// Lowest reading
    pub min: f64,

    /// Approximate resting heart rate: the lowest reading taken between
    /// midnight and 06:00 local time. A heuristic, not a medical
    /// measurement; 0 when no reading falls in that window.
    pub resting: f64,
}

impl Default for HeartRateSummary {
    fn default() -> Self {
        HeartRateSummary {
            average: 0.0,
            max: 0.0,
            min: 0.0,
            resting: 0.0,
        }
    }
}

/// Summary statistics for sleep segments over the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSummary {
    /// Total hours across valid sleep stages (Light, Deep, REM)
    pub total_hours: f64,

    /// Total hours divided by the number of distinct sleep days
    pub avg_hours_per_day: f64,

    /// Share of total sleep spent in restorative stages (Deep + REM)
    pub quality_percent: f64,

    /// Band classification of `quality_percent`
    pub quality_label: QualityLabel,

    /// Hours per valid sleep stage
    pub distribution_by_stage: BTreeMap<SleepStage, f64>,
}

impl Default for SleepSummary {
    fn default() -> Self {
        SleepSummary {
            total_hours: 0.0,
            avg_hours_per_day: 0.0,
            quality_percent: 0.0,
            quality_label: QualityLabel::VeryPoor,
            distribution_by_stage: BTreeMap::new(),
        }
    }
}

/// Summary statistics for activity segments over the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Minutes spent in active types (On-foot, Walking, Running, Exercise)
    pub active_minutes: f64,

    /// Labels of the three types with the most accumulated time,
    /// longest first; ties broken by lowest type code
    pub top_activities: Vec<String>,

    /// Minutes per activity-type code, all types included
    pub distribution_by_type: BTreeMap<i64, f64>,
}

impl Default for ActivitySummary {
    fn default() -> Self {
        ActivitySummary {
            active_minutes: 0.0,
            top_activities: Vec::new(),
            distribution_by_type: BTreeMap::new(),
        }
    }
}

/// Recommendation categories, one per metric plus a general fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Steps,
    Sleep,
    Activity,
    HeartRate,
    General,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Steps => write!(f, "steps"),
            Category::Sleep => write!(f, "sleep"),
            Category::Activity => write!(f, "activity"),
            Category::HeartRate => write!(f, "heart_rate"),
            Category::General => write!(f, "general"),
        }
    }
}

/// Recommendation priority levels
///
/// The core emits only the priority; any color or icon mapping belongs
/// to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// A single human-readable recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Metric the recommendation concerns
    pub category: Category,

    /// Severity; visual mapping is the caller's concern
    pub priority: Priority,

    /// Fixed-language human-readable message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_segment_duration_derived_from_bounds() {
        let seg = Segment {
            start: dt(22, 0),
            end: dt(23, 30),
            code: 4,
            date: None,
        };
        assert!((seg.duration_hours() - 1.5).abs() < 1e-9);
        assert!((seg.duration_minutes() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_effective_date_prefers_explicit() {
        let explicit = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let seg = Segment {
            start: dt(1, 0),
            end: dt(2, 0),
            code: 5,
            date: Some(explicit),
        };
        assert_eq!(seg.effective_date(), explicit);

        let seg = Segment { date: None, ..seg };
        assert_eq!(seg.effective_date(), dt(1, 0).date());
    }

    #[test]
    fn test_sleep_stage_codes() {
        assert_eq!(SleepStage::from_code(1), Some(SleepStage::Awake));
        assert_eq!(SleepStage::from_code(2), Some(SleepStage::Sleep));
        assert_eq!(SleepStage::from_code(3), Some(SleepStage::InBed));
        assert_eq!(SleepStage::from_code(4), Some(SleepStage::Light));
        assert_eq!(SleepStage::from_code(5), Some(SleepStage::Deep));
        assert_eq!(SleepStage::from_code(6), Some(SleepStage::Rem));
        assert_eq!(SleepStage::from_code(99), None);
    }

    #[test]
    fn test_sleep_stage_subsets() {
        assert!(SleepStage::Light.is_valid_sleep());
        assert!(SleepStage::Deep.is_valid_sleep());
        assert!(SleepStage::Rem.is_valid_sleep());
        assert!(!SleepStage::Awake.is_valid_sleep());
        assert!(!SleepStage::Sleep.is_valid_sleep());
        assert!(!SleepStage::InBed.is_valid_sleep());

        assert!(SleepStage::Deep.is_quality_sleep());
        assert!(SleepStage::Rem.is_quality_sleep());
        assert!(!SleepStage::Light.is_quality_sleep());
    }

    #[test]
    fn test_activity_type_codes_and_labels() {
        assert_eq!(ActivityType::from_code(0), Some(ActivityType::Inactive));
        assert_eq!(ActivityType::from_code(7), Some(ActivityType::Walking));
        assert_eq!(ActivityType::from_code(72), Some(ActivityType::Sleeping));
        assert_eq!(ActivityType::from_code(113), Some(ActivityType::InTransit));
        assert_eq!(ActivityType::from_code(42), None);

        assert_eq!(ActivityType::label_for_code(0), "Inactive");
        assert_eq!(ActivityType::label_for_code(1), "In-vehicle");
        assert_eq!(ActivityType::label_for_code(8), "Running");
        assert_eq!(ActivityType::label_for_code(42), "Unknown");
    }

    #[test]
    fn test_activity_active_subset() {
        for code in [3, 7, 8, 109] {
            assert!(ActivityType::code_is_active(code), "code {code}");
        }
        for code in [0, 1, 2, 4, 72, 113, 42] {
            assert!(!ActivityType::code_is_active(code), "code {code}");
        }
    }

    #[test]
    fn test_quality_label_band_boundaries() {
        assert_eq!(QualityLabel::from_percent(100.0), QualityLabel::Good);
        assert_eq!(QualityLabel::from_percent(60.0), QualityLabel::Good);
        assert_eq!(QualityLabel::from_percent(59.999), QualityLabel::Fair);
        assert_eq!(QualityLabel::from_percent(40.0), QualityLabel::Fair);
        assert_eq!(QualityLabel::from_percent(39.999), QualityLabel::Poor);
        assert_eq!(QualityLabel::from_percent(20.0), QualityLabel::Poor);
        assert_eq!(QualityLabel::from_percent(19.999), QualityLabel::VeryPoor);
        assert_eq!(QualityLabel::from_percent(0.0), QualityLabel::VeryPoor);
    }

    #[test]
    fn test_quality_label_poor_or_worse() {
        assert!(QualityLabel::Poor.is_poor_or_worse());
        assert!(QualityLabel::VeryPoor.is_poor_or_worse());
        assert!(!QualityLabel::Fair.is_poor_or_worse());
        assert!(!QualityLabel::Good.is_poor_or_worse());
    }

    #[test]
    fn test_summary_defaults_are_zero() {
        let steps = StepsSummary::default();
        assert_eq!(steps.total, 0);
        assert_eq!(steps.trend, Trend::Stable);

        let hr = HeartRateSummary::default();
        assert_eq!(hr.average, 0.0);
        assert_eq!(hr.resting, 0.0);

        let sleep = SleepSummary::default();
        assert_eq!(sleep.total_hours, 0.0);
        assert!(sleep.distribution_by_stage.is_empty());

        let activity = ActivitySummary::default();
        assert_eq!(activity.active_minutes, 0.0);
        assert!(activity.top_activities.is_empty());
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = Recommendation {
            category: Category::HeartRate,
            priority: Priority::High,
            message: "test".to_string(),
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"category\":\"heart_rate\""));
        assert!(json.contains("\"priority\":\"high\""));

        let back: Recommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn test_sleep_distribution_serializes_with_stage_labels() {
        let mut summary = SleepSummary::default();
        summary.distribution_by_stage.insert(SleepStage::Light, 2.0);
        summary.distribution_by_stage.insert(SleepStage::Rem, 0.5);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"Light\":2.0"));
        assert!(json.contains("\"REM\":0.5"));
    }
}
