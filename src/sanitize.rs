//! Shared row sanitization for all four analyzers
//!
//! The analysis pipeline never fails on bad input: a missing dataset
//! yields a zero summary and a malformed row is dropped while the rest
//! of the dataset is processed. This module is the single place where
//! that policy is applied, so the analyzers themselves only ever see
//! clean, typed rows.
//!
//! Raw rows carry loosely-typed fields because upstream sources (CSV
//! exports, JSON dumps) routinely deliver numbers as strings or leave
//! fields out entirely. A supplied duration field is accepted for
//! compatibility but ignored: duration is always recomputed from
//! start/end.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Sample, Segment};

/// A scalar field as delivered by an upstream source: numeric or a
/// string that may or may not parse as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl RawField {
    /// Coerce to a finite float, `None` when the field is unparseable.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawField::Number(n) => *n,
            RawField::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Coerce to an integer code. Integral floats are accepted
    /// (a source that serializes codes as `5.0` still means stage 5);
    /// fractional values are not a code and coerce to `None`.
    pub fn as_code(&self) -> Option<i64> {
        let value = self.as_f64()?;
        (value.fract() == 0.0).then_some(value as i64)
    }
}

/// A scalar reading as delivered by an upstream source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub value: Option<RawField>,
}

impl RawSample {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        RawSample {
            timestamp: Some(timestamp),
            value: Some(RawField::Number(value)),
        }
    }
}

/// An interval row as delivered by an upstream source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub code: Option<RawField>,

    /// Explicit calendar date, when the source provides one
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Duration as supplied by the source. Never trusted; retained only
    /// so rows that carry it still deserialize.
    #[serde(default)]
    pub duration: Option<RawField>,
}

impl RawSegment {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, code: i64) -> Self {
        RawSegment {
            start: Some(start),
            end: Some(end),
            code: Some(RawField::Number(code as f64)),
            date: None,
            duration: None,
        }
    }
}

/// Convert raw scalar readings into clean samples, dropping rows whose
/// timestamp or value cannot be determined.
pub fn sanitize_samples(rows: &[RawSample]) -> Vec<Sample> {
    let mut clean = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        match (row.timestamp, row.value.as_ref().and_then(RawField::as_f64)) {
            (Some(timestamp), Some(value)) => clean.push(Sample { timestamp, value }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, kept = clean.len(), "dropped malformed sample rows");
    }
    clean
}

/// Convert raw interval rows into clean segments, dropping rows whose
/// bounds or type code cannot be determined or whose end precedes its
/// start. Durations in the output are always derived from the bounds.
pub fn sanitize_segments(rows: &[RawSegment]) -> Vec<Segment> {
    let mut clean = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        let code = row.code.as_ref().and_then(RawField::as_code);
        match (row.start, row.end, code) {
            (Some(start), Some(end), Some(code)) if end >= start => clean.push(Segment {
                start,
                end,
                code,
                date: row.date,
            }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, kept = clean.len(), "dropped malformed segment rows");
    }
    clean
}
