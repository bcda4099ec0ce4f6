//! File readers for sample and segment tables
//!
//! The CLI's stand-in for the data provider: reads one file per metric
//! kind, CSV or JSON by extension, and produces raw rows for
//! [`crate::sanitize`]. Row-level problems (a timestamp that does not
//! parse, a value column holding text) are not errors here — the raw
//! row carries whatever was found and sanitization decides what to
//! drop. Only file-level problems (missing file, undecodable document)
//! are reported as errors.

use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::warn;

use crate::error::{HealthRsError, ImportError, Result};
use crate::sanitize::{RawField, RawSample, RawSegment};

/// Supported input file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "json" => Ok(ImportFormat::Json),
            other => Err(HealthRsError::Import(ImportError::UnsupportedFormat {
                format: other.to_string(),
            })),
        }
    }
}

/// Column-name aliases accepted for sample files.
const TIMESTAMP_COLUMNS: &[&str] = &["timestamp", "time"];
const VALUE_COLUMNS: &[&str] = &["value", "steps", "heart_rate", "bpm"];

/// Column-name aliases accepted for segment files.
const START_COLUMNS: &[&str] = &["start", "start_time"];
const END_COLUMNS: &[&str] = &["end", "end_time"];
const CODE_COLUMNS: &[&str] = &["code", "type", "sleep_type", "activity_type"];

/// Read scalar readings (steps, heart rate) from a CSV or JSON file.
pub fn read_samples(path: &Path) -> Result<Vec<RawSample>> {
    match ImportFormat::from_path(path)? {
        ImportFormat::Csv => read_samples_csv(path),
        ImportFormat::Json => read_json(path),
    }
}

/// Read interval rows (sleep, activity) from a CSV or JSON file.
pub fn read_segments(path: &Path) -> Result<Vec<RawSegment>> {
    match ImportFormat::from_path(path)? {
        ImportFormat::Csv => read_segments_csv(path),
        ImportFormat::Json => read_json(path),
    }
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(HealthRsError::Import(ImportError::FileNotFound {
            path: path.to_path_buf(),
        }));
    }
    Ok(File::open(path)?)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = open(path)?;
    serde_json::from_reader(file).map_err(|e| {
        HealthRsError::Import(ImportError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })
}

fn read_samples_csv(path: &Path) -> Result<Vec<RawSample>> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| csv_parse_error(path, e))?
        .clone();
    let ts_col = find_column(&headers, TIMESTAMP_COLUMNS);
    let value_col = find_column(&headers, VALUE_COLUMNS);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable CSV record");
                continue;
            }
        };
        rows.push(RawSample {
            timestamp: field(&record, ts_col).and_then(parse_datetime),
            value: field(&record, value_col).map(|s| RawField::Text(s.to_string())),
        });
    }
    Ok(rows)
}

fn read_segments_csv(path: &Path) -> Result<Vec<RawSegment>> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| csv_parse_error(path, e))?
        .clone();
    let start_col = find_column(&headers, START_COLUMNS);
    let end_col = find_column(&headers, END_COLUMNS);
    let code_col = find_column(&headers, CODE_COLUMNS);
    let date_col = find_column(&headers, &["date"]);
    let duration_col = find_column(&headers, &["duration"]);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable CSV record");
                continue;
            }
        };
        rows.push(RawSegment {
            start: field(&record, start_col).and_then(parse_datetime),
            end: field(&record, end_col).and_then(parse_datetime),
            code: field(&record, code_col).map(|s| RawField::Text(s.to_string())),
            date: field(&record, date_col).and_then(parse_date),
            duration: field(&record, duration_col).map(|s| RawField::Text(s.to_string())),
        });
    }
    Ok(rows)
}

fn csv_parse_error(path: &Path, e: csv::Error) -> HealthRsError {
    HealthRsError::Import(ImportError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Position of the first header matching one of the accepted names,
/// case-insensitively.
fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
}

fn field<'r>(record: &'r StringRecord, col: Option<usize>) -> Option<&'r str> {
    let value = record.get(col?)?;
    (!value.is_empty()).then_some(value)
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::{sanitize_samples, sanitize_segments};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(extension: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{extension}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImportFormat::from_path(Path::new("steps.csv")).unwrap(),
            ImportFormat::Csv
        );
        assert_eq!(
            ImportFormat::from_path(Path::new("steps.JSON")).unwrap(),
            ImportFormat::Json
        );
        assert!(ImportFormat::from_path(Path::new("steps.xml")).is_err());
        assert!(ImportFormat::from_path(Path::new("steps")).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_samples(Path::new("/nonexistent/steps.csv")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_csv_samples_roundtrip_through_sanitize() {
        let file = temp_file(
            "csv",
            "timestamp,value\n\
             2024-03-10 08:00:00,4000\n\
             2024-03-10 12:00:00,notanumber\n\
             2024-03-11 09:00:00,6000\n",
        );

        let rows = read_samples(file.path()).unwrap();
        assert_eq!(rows.len(), 3);

        let clean = sanitize_samples(&rows);
        assert_eq!(clean.len(), 2);
        assert_eq!(clean[0].value, 4000.0);
    }

    #[test]
    fn test_csv_column_aliases() {
        let file = temp_file(
            "csv",
            "time,steps\n2024-03-10 08:00:00,4000\n",
        );
        let rows = read_samples(file.path()).unwrap();
        let clean = sanitize_samples(&rows);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].value, 4000.0);
    }

    #[test]
    fn test_csv_segments_with_date_and_duration_columns() {
        let file = temp_file(
            "csv",
            "start_time,end_time,sleep_type,date,duration\n\
             2024-03-10 23:00:00,2024-03-11 01:00:00,4,2024-03-10,99\n",
        );

        let rows = read_segments(file.path()).unwrap();
        let clean = sanitize_segments(&rows);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].code, 4);
        assert_eq!(
            clean[0].date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
        );
        // Supplied duration of 99 is ignored in favor of the bounds.
        assert!((clean[0].duration_hours() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_json_samples() {
        let file = temp_file(
            "json",
            r#"[
                {"timestamp": "2024-03-10T08:00:00", "value": 4000},
                {"timestamp": "2024-03-10T12:00:00", "value": "3500"},
                {"timestamp": null, "value": 100}
            ]"#,
        );

        let rows = read_samples(file.path()).unwrap();
        assert_eq!(rows.len(), 3);

        let clean = sanitize_samples(&rows);
        assert_eq!(clean.len(), 2);
        assert_eq!(clean[1].value, 3500.0);
    }

    #[test]
    fn test_json_segments() {
        let file = temp_file(
            "json",
            r#"[
                {"start": "2024-03-10T22:00:00", "end": "2024-03-11T06:00:00", "code": 4},
                {"start": "2024-03-11T22:00:00", "end": "2024-03-12T06:00:00", "code": "5"}
            ]"#,
        );

        let rows = read_segments(file.path()).unwrap();
        let clean = sanitize_segments(&rows);
        assert_eq!(clean.len(), 2);
        assert_eq!(clean[1].code, 5);
    }

    #[test]
    fn test_undecodable_json_document_is_an_error() {
        let file = temp_file("json", "{not json");
        assert!(read_samples(file.path()).is_err());
    }

    #[test]
    fn test_unparseable_timestamps_survive_to_sanitize() {
        let file = temp_file(
            "csv",
            "timestamp,value\nnot-a-date,4000\n2024-03-10 08:00:00,100\n",
        );
        let rows = read_samples(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].timestamp.is_none());

        let clean = sanitize_samples(&rows);
        assert_eq!(clean.len(), 1);
    }
}
