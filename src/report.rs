//! Terminal rendering of analysis results
//!
//! Presentation lives entirely on this side of the boundary: the
//! summaries carry plain numbers and the recommendations carry only a
//! priority, and this module decides how both look on screen.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analysis::HealthReport;
use crate::models::{
    ActivitySummary, ActivityType, HeartRateSummary, Priority, Recommendation, SleepSummary,
    StepsSummary,
};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn stat_table(rows: Vec<StatRow>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Render the steps summary as a table.
pub fn steps_table(summary: &StepsSummary) -> String {
    stat_table(vec![
        StatRow {
            name: "Total steps",
            value: summary.total.to_string(),
        },
        StatRow {
            name: "Daily average",
            value: summary.daily_average.to_string(),
        },
        StatRow {
            name: "Best day",
            value: summary.max.to_string(),
        },
        StatRow {
            name: "Worst day",
            value: summary.min.to_string(),
        },
        StatRow {
            name: "Trend",
            value: summary.trend.to_string(),
        },
    ])
}

/// Render the heart-rate summary as a table.
pub fn heart_rate_table(summary: &HeartRateSummary) -> String {
    stat_table(vec![
        StatRow {
            name: "Average bpm",
            value: format!("{:.0}", summary.average),
        },
        StatRow {
            name: "Max bpm",
            value: format!("{:.0}", summary.max),
        },
        StatRow {
            name: "Min bpm",
            value: format!("{:.0}", summary.min),
        },
        StatRow {
            name: "Resting bpm (approx.)",
            value: format!("{:.0}", summary.resting),
        },
    ])
}

/// Render the sleep summary as a table, stage distribution included.
pub fn sleep_table(summary: &SleepSummary) -> String {
    let mut rows = vec![
        StatRow {
            name: "Total sleep",
            value: format!("{:.1} h", summary.total_hours),
        },
        StatRow {
            name: "Average per night",
            value: format!("{:.1} h", summary.avg_hours_per_day),
        },
        StatRow {
            name: "Restorative share",
            value: format!("{:.1} %", summary.quality_percent),
        },
        StatRow {
            name: "Quality",
            value: summary.quality_label.to_string(),
        },
    ];

    let distribution = summary
        .distribution_by_stage
        .iter()
        .map(|(stage, hours)| format!("{stage} {hours:.1}h"))
        .collect::<Vec<_>>()
        .join(", ");
    rows.push(StatRow {
        name: "By stage",
        value: if distribution.is_empty() {
            "-".to_string()
        } else {
            distribution
        },
    });

    stat_table(rows)
}

/// Render the activity summary as a table.
pub fn activity_table(summary: &ActivitySummary) -> String {
    let top = if summary.top_activities.is_empty() {
        "-".to_string()
    } else {
        summary.top_activities.join(", ")
    };

    let distribution = summary
        .distribution_by_type
        .iter()
        .map(|(code, minutes)| format!("{} {minutes:.0}m", ActivityType::label_for_code(*code)))
        .collect::<Vec<_>>()
        .join(", ");

    stat_table(vec![
        StatRow {
            name: "Active minutes",
            value: format!("{:.0}", summary.active_minutes),
        },
        StatRow {
            name: "Top activities",
            value: top,
        },
        StatRow {
            name: "By type",
            value: if distribution.is_empty() {
                "-".to_string()
            } else {
                distribution
            },
        },
    ])
}

/// Render the recommendation list, one line per entry, colored by
/// priority.
pub fn recommendation_lines(recommendations: &[Recommendation]) -> Vec<String> {
    recommendations
        .iter()
        .map(|rec| {
            let tag = format!("[{}/{}]", rec.priority, rec.category);
            let tag = match rec.priority {
                Priority::High => tag.red().bold(),
                Priority::Medium => tag.yellow(),
                Priority::Low => tag.green(),
            };
            format!("{tag} {}", rec.message)
        })
        .collect()
}

/// Render the full report.
pub fn render(report: &HealthReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "Steps".bold()));
    out.push_str(&steps_table(&report.steps));
    out.push_str(&format!("\n\n{}\n", "Heart rate".bold()));
    out.push_str(&heart_rate_table(&report.heart_rate));
    out.push_str(&format!("\n\n{}\n", "Sleep".bold()));
    out.push_str(&sleep_table(&report.sleep));
    out.push_str(&format!("\n\n{}\n", "Activity".bold()));
    out.push_str(&activity_table(&report.activity));

    out.push_str(&format!("\n\n{}\n", "Recommendations".bold()));
    for line in recommendation_lines(&report.recommendations) {
        out.push_str(&format!("  {line}\n"));
    }

    out
}
