//! Time type vocabulary and reporting interval checks.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use nis_common::date_values;
use nis_model::schema::{TIME_END, TIME_START, TIME_TYPE};
use nis_model::vocabulary::{INTERVAL_DAYS, TIME_TYPES};
use polars::prelude::DataFrame;

use super::{distinct, text};
use crate::issue::Issue;

/// Days from `start` to `end`; negative when the interval is reversed.
pub fn interval_days(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(types) = text(df, TIME_TYPE) {
        let unknown = distinct(
            types
                .iter()
                .flatten()
                .map(String::as_str)
                .filter(|t| !TIME_TYPES.contains(t)),
        );
        if !unknown.is_empty() {
            issues.push(Issue::UnknownTimeType { values: unknown });
        }
    }

    let (Ok(starts), Ok(ends)) = (date_values(df, TIME_START), date_values(df, TIME_END)) else {
        return issues;
    };
    let lengths: Vec<i64> = starts
        .iter()
        .zip(&ends)
        .filter_map(|(start, end)| Some(interval_days((*start)?, (*end)?)))
        .collect();

    let reversed = lengths.iter().filter(|&&days| days < 0).count();
    if reversed > 0 {
        issues.push(Issue::TimeOrder { count: reversed });
    }
    let unexpected: BTreeSet<i64> = lengths
        .iter()
        .copied()
        .filter(|days| *days >= 0 && !INTERVAL_DAYS.contains(days))
        .collect();
    if !unexpected.is_empty() {
        issues.push(Issue::IntervalLength {
            lengths: unexpected.into_iter().collect(),
        });
    }
    issues
}
