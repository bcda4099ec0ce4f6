//! Rule-based recommendation engine
//!
//! A pure function of the four metric summaries plus the goal
//! configuration. Categories are evaluated in a fixed order (steps,
//! sleep, activity, heart rate); within a category rules fire
//! independently, so a category can contribute zero, one, or two
//! recommendations. The list is rebuilt from scratch on every call.
//!
//! A summary may be absent, meaning no data exists for that metric;
//! absence is treated exactly like the metric's zero summary, never as
//! an error.

use crate::config::GoalConfig;
use crate::models::{
    ActivitySummary, ActivityType, Category, HeartRateSummary, Priority, Recommendation,
    SleepSummary, StepsSummary,
};

/// Step ratio below which the shortfall is severe.
const STEPS_LOW_RATIO: f64 = 0.5;

/// Step ratio at which the goal counts as met.
const STEPS_MET_RATIO: f64 = 0.9;

/// Sleep ratio below which the shortfall is severe.
const SLEEP_LOW_RATIO: f64 = 0.8;

/// Resting heart rate above this is flagged as elevated.
const RESTING_HR_ALERT_BPM: f64 = 80.0;

/// Peak heart rate above this is flagged as very high.
const PEAK_HR_ALERT_BPM: f64 = 180.0;

/// Stateless rule engine producing ordered recommendations.
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Evaluate all rules against the given summaries and goals.
    ///
    /// The output order follows the category evaluation order. When no
    /// rule fires across all categories, exactly one general/low
    /// "all good" message is returned instead, so the list is never
    /// empty.
    pub fn generate(
        steps: Option<&StepsSummary>,
        sleep: Option<&SleepSummary>,
        activity: Option<&ActivitySummary>,
        heart_rate: Option<&HeartRateSummary>,
        goals: &GoalConfig,
    ) -> Vec<Recommendation> {
        let mut out = Vec::new();

        let zero_steps = StepsSummary::default();
        let zero_sleep = SleepSummary::default();
        let zero_activity = ActivitySummary::default();
        let zero_heart_rate = HeartRateSummary::default();

        Self::steps_rules(steps.unwrap_or(&zero_steps), goals, &mut out);
        Self::sleep_rules(sleep.unwrap_or(&zero_sleep), goals, &mut out);
        Self::activity_rules(activity.unwrap_or(&zero_activity), goals, &mut out);
        Self::heart_rate_rules(heart_rate.unwrap_or(&zero_heart_rate), &mut out);

        if out.is_empty() {
            out.push(Recommendation {
                category: Category::General,
                priority: Priority::Low,
                message: "All your metrics look good. Keep up your current habits!".to_string(),
            });
        }

        out
    }

    fn steps_rules(steps: &StepsSummary, goals: &GoalConfig, out: &mut Vec<Recommendation>) {
        if steps.daily_average == 0 {
            out.push(Recommendation {
                category: Category::Steps,
                priority: Priority::High,
                message: "No recent step data was recorded. Check that your tracker is syncing."
                    .to_string(),
            });
            return;
        }

        let ratio = steps.daily_average as f64 / goals.daily_steps as f64;
        let (priority, message) = if ratio < STEPS_LOW_RATIO {
            (
                Priority::High,
                format!(
                    "Your daily step average ({}) is well below the goal of {}. \
                     Try adding more walks to your routine.",
                    steps.daily_average, goals.daily_steps
                ),
            )
        } else if ratio < STEPS_MET_RATIO {
            (
                Priority::Medium,
                format!(
                    "You are close to your goal of {} daily steps ({} on average). Keep it up!",
                    goals.daily_steps, steps.daily_average
                ),
            )
        } else {
            // Meeting the goal still gets a confirmation, not silence.
            (
                Priority::Low,
                format!(
                    "You are meeting your goal of {} daily steps. Great work!",
                    goals.daily_steps
                ),
            )
        };

        out.push(Recommendation {
            category: Category::Steps,
            priority,
            message,
        });
    }

    fn sleep_rules(sleep: &SleepSummary, goals: &GoalConfig, out: &mut Vec<Recommendation>) {
        if sleep.avg_hours_per_day == 0.0 {
            out.push(Recommendation {
                category: Category::Sleep,
                priority: Priority::High,
                message: "No sleep data was recorded for this period.".to_string(),
            });
            return;
        }

        if sleep.avg_hours_per_day < goals.sleep_hours * SLEEP_LOW_RATIO {
            out.push(Recommendation {
                category: Category::Sleep,
                priority: Priority::High,
                message: format!(
                    "Your average sleep ({:.1}h) is below the recommended {}h. \
                     Try to keep a more consistent sleep schedule.",
                    sleep.avg_hours_per_day, goals.sleep_hours
                ),
            });
        } else if sleep.avg_hours_per_day < goals.sleep_hours {
            out.push(Recommendation {
                category: Category::Sleep,
                priority: Priority::Medium,
                message: format!(
                    "You are close to your sleep goal of {}h ({:.1}h on average).",
                    goals.sleep_hours, sleep.avg_hours_per_day
                ),
            });
        }

        // Fires independently of the duration rules, so sleep can
        // contribute two messages in one call.
        if sleep.quality_label.is_poor_or_worse() {
            out.push(Recommendation {
                category: Category::Sleep,
                priority: Priority::Medium,
                message: "Your sleep quality could improve. Consider limiting screens \
                          before bed and keeping the room dark and quiet."
                    .to_string(),
            });
        }
    }

    fn activity_rules(activity: &ActivitySummary, goals: &GoalConfig, out: &mut Vec<Recommendation>) {
        if activity.active_minutes == 0.0 {
            out.push(Recommendation {
                category: Category::Activity,
                priority: Priority::Medium,
                message: "No activity was recorded for this period.".to_string(),
            });
        } else if activity.active_minutes < goals.active_minutes as f64 {
            out.push(Recommendation {
                category: Category::Activity,
                priority: Priority::Medium,
                message: format!(
                    "Try to increase your daily physical activity. The goal is {} minutes \
                     of moderate activity.",
                    goals.active_minutes
                ),
            });
        }

        let inactive = ActivityType::Inactive.label();
        if activity.top_activities.iter().any(|label| label == inactive) {
            out.push(Recommendation {
                category: Category::Activity,
                priority: Priority::High,
                message: "You are spending a lot of time inactive. Consider taking an \
                          active break every hour."
                    .to_string(),
            });
        }
    }

    fn heart_rate_rules(heart_rate: &HeartRateSummary, out: &mut Vec<Recommendation>) {
        if heart_rate.resting > RESTING_HR_ALERT_BPM {
            out.push(Recommendation {
                category: Category::HeartRate,
                priority: Priority::High,
                message: "Your resting heart rate appears elevated. Consider consulting \
                          a health professional."
                    .to_string(),
            });
        }

        if heart_rate.max > PEAK_HR_ALERT_BPM {
            out.push(Recommendation {
                category: Category::HeartRate,
                priority: Priority::Medium,
                message: "You reached very high peak heart rates during exercise. Make \
                          sure the intensity matches your fitness level."
                    .to_string(),
            });
        }
    }
}
