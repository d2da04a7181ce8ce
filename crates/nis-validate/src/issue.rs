//! Validation issue types.
//!
//! Each variant carries only the data its message needs. The `Display`
//! output is the human-readable problem line reported to the user.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One data-quality problem found in a canonical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Issue {
    // Schema
    MissingColumn { column: String },
    ExtraColumn { column: String },
    ColumnType {
        column: String,
        expected: String,
        found: String,
    },
    ColumnOrder { found: Vec<String> },

    // Uniqueness and completeness
    DuplicateRows { count: usize },
    DuplicateGroups { count: usize },
    NullValues { column: String, count: usize },

    // Text
    Whitespace {
        column: String,
        count: usize,
        samples: Vec<String>,
    },
    Capitalization {
        column: String,
        count: usize,
        samples: Vec<String>,
    },

    // Vocabulary
    UnknownVaccine { values: Vec<String> },
    UnknownGeographyType { values: Vec<String> },
    InvalidGeography {
        geography_type: String,
        count: usize,
        samples: Vec<String>,
    },
    InvalidAgeGroup { count: usize, samples: Vec<String> },

    // Time
    UnknownTimeType { values: Vec<String> },
    TimeOrder { count: usize },
    IntervalLength { lengths: Vec<i64> },

    // Metrics
    OutOfRange { column: String, count: usize },
    Bracket { count: usize },
    NonPositiveSampleSize { count: usize },
}

impl Issue {
    /// Short rule name, stable across releases.
    pub fn rule(&self) -> &'static str {
        match self {
            Issue::MissingColumn { .. }
            | Issue::ExtraColumn { .. }
            | Issue::ColumnType { .. }
            | Issue::ColumnOrder { .. } => "schema",
            Issue::DuplicateRows { .. } => "duplicate_rows",
            Issue::DuplicateGroups { .. } => "duplicate_groups",
            Issue::NullValues { .. } => "nulls",
            Issue::Whitespace { .. } => "whitespace",
            Issue::Capitalization { .. } => "capitalization",
            Issue::UnknownVaccine { .. } => "vaccine",
            Issue::UnknownGeographyType { .. } | Issue::InvalidGeography { .. } => "geography",
            Issue::InvalidAgeGroup { .. } => "age_groups",
            Issue::UnknownTimeType { .. } => "time_type",
            Issue::TimeOrder { .. } | Issue::IntervalLength { .. } => "time_interval",
            Issue::OutOfRange { .. } => "range",
            Issue::Bracket { .. } => "bracket",
            Issue::NonPositiveSampleSize { .. } => "sample_size",
        }
    }
}

fn quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingColumn { column } => write!(f, "missing column `{column}`"),
            Issue::ExtraColumn { column } => write!(f, "unexpected column `{column}`"),
            Issue::ColumnType {
                column,
                expected,
                found,
            } => write!(f, "column `{column}` has type {found}, expected {expected}"),
            Issue::ColumnOrder { found } => {
                write!(f, "columns are out of order: {}", found.join(", "))
            }
            Issue::DuplicateRows { count } => write!(f, "{count} duplicated row(s)"),
            Issue::DuplicateGroups { count } => write!(
                f,
                "{count} row(s) duplicated on every column except estimate, lci and uci"
            ),
            Issue::NullValues { column, count } => {
                write!(f, "column `{column}` has {count} null value(s)")
            }
            Issue::Whitespace {
                column,
                count,
                samples,
            } => write!(
                f,
                "column `{column}` has {count} value(s) with irregular whitespace: {}",
                quoted(samples)
            ),
            Issue::Capitalization {
                column,
                count,
                samples,
            } => write!(
                f,
                "column `{column}` has {count} value(s) that are not lowercase: {}",
                quoted(samples)
            ),
            Issue::UnknownVaccine { values } => {
                write!(f, "unknown vaccine value(s): {}", quoted(values))
            }
            Issue::UnknownGeographyType { values } => {
                write!(f, "unknown geography type(s): {}", quoted(values))
            }
            Issue::InvalidGeography {
                geography_type,
                count,
                samples,
            } => write!(
                f,
                "{count} invalid geography value(s) for geography type {geography_type:?}: {}",
                quoted(samples)
            ),
            Issue::InvalidAgeGroup { count, samples } => {
                write!(f, "{count} malformed age group(s): {}", quoted(samples))
            }
            Issue::UnknownTimeType { values } => {
                write!(f, "unknown time type(s): {}", quoted(values))
            }
            Issue::TimeOrder { count } => {
                write!(f, "{count} row(s) with time_start after time_end")
            }
            Issue::IntervalLength { lengths } => {
                let lengths: Vec<String> = lengths.iter().map(i64::to_string).collect();
                write!(f, "unexpected interval length(s) in days: {}", lengths.join(", "))
            }
            Issue::OutOfRange { column, count } => {
                write!(f, "column `{column}` has {count} value(s) outside [0, 1]")
            }
            Issue::Bracket { count } => write!(
                f,
                "confidence intervals do not bracket estimate in {count} row(s)"
            ),
            Issue::NonPositiveSampleSize { count } => {
                write!(f, "{count} row(s) with non-positive sample_size")
            }
        }
    }
}
