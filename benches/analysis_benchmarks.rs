use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use healthrs::config::GoalConfig;
use healthrs::models::{Sample, Segment};
use healthrs::{activity, analysis, sleep, steps};

/// Performance benchmarks for the analysis pipeline
///
/// These benchmarks test the analyzers with varying window sizes to
/// ensure scalability over multi-month exports.

fn create_samples(days: u32, per_day: u32) -> Vec<Sample> {
    let mut samples = Vec::new();
    for day in 0..days {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(day as i64);
        for slot in 0..per_day {
            samples.push(Sample {
                timestamp: date.and_hms_opt(8 + (slot % 14), slot % 60, 0).unwrap(),
                value: 500.0 + (day * 31 + slot * 7) as f64 % 2000.0,
            });
        }
    }
    samples
}

fn create_segments(days: u32, per_day: u32, codes: &[i64]) -> Vec<Segment> {
    let mut segments = Vec::new();
    for day in 0..days {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(day as i64);
        for slot in 0..per_day {
            let start = date.and_hms_opt(slot % 24, 0, 0).unwrap();
            segments.push(Segment {
                start,
                end: start + chrono::Duration::minutes(30 + (slot % 4) as i64 * 15),
                code: codes[(day + slot) as usize % codes.len()],
                date: None,
            });
        }
    }
    segments
}

fn bench_steps_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Steps Analysis");

    for &days in &[7, 30, 90, 365] {
        let samples = create_samples(days, 24);

        group.throughput(Throughput::Elements(samples.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("analyze", days),
            &samples,
            |b, samples| {
                b.iter(|| steps::StepsAnalyzer::analyze(black_box(samples)));
            },
        );
    }

    group.finish();
}

fn bench_sleep_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sleep Analysis");

    for &days in &[7, 30, 90, 365] {
        let segments = create_segments(days, 8, &[1, 2, 3, 4, 5, 6]);

        group.throughput(Throughput::Elements(segments.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("analyze", days),
            &segments,
            |b, segments| {
                b.iter(|| sleep::SleepAnalyzer::analyze(black_box(segments)));
            },
        );
    }

    group.finish();
}

fn bench_activity_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Activity Analysis");

    for &days in &[7, 30, 90, 365] {
        let segments = create_segments(days, 12, &[0, 1, 3, 7, 8, 109]);

        group.throughput(Throughput::Elements(segments.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("analyze", days),
            &segments,
            |b, segments| {
                b.iter(|| activity::ActivityAnalyzer::analyze(black_box(segments)));
            },
        );
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full Analysis Pass");
    group.sample_size(20);

    for &days in &[30, 90, 365] {
        let input = analysis::AnalysisInput {
            steps: create_samples(days, 24),
            heart_rate: create_samples(days, 48),
            sleep: create_segments(days, 8, &[1, 2, 3, 4, 5, 6]),
            activity: create_segments(days, 12, &[0, 1, 3, 7, 8, 109]),
        };
        let goals = GoalConfig::default();

        group.bench_with_input(BenchmarkId::new("analyze_all", days), &input, |b, input| {
            b.iter(|| analysis::analyze_all(black_box(input), black_box(&goals)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_steps_analysis,
    bench_sleep_analysis,
    bench_activity_analysis,
    bench_full_pipeline
);
criterion_main!(benches);
