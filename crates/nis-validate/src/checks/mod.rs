//! Rule catalog. Each check inspects one concern and returns every issue it
//! finds; a column that is absent or mistyped is left to the schema check.

pub mod age;
pub mod duplicates;
pub mod geography;
pub mod metrics;
pub mod nulls;
pub mod schema;
pub mod text;
pub mod time;
pub mod vaccine;

use std::collections::BTreeSet;

use nis_common::text_values;
use polars::prelude::DataFrame;

/// Maximum number of offending values quoted in one issue.
pub const MAX_SAMPLES: usize = 5;

/// Column as optional strings, or `None` if it cannot be read.
pub(crate) fn text(df: &DataFrame, column: &str) -> Option<Vec<Option<String>>> {
    text_values(df, column).ok()
}

/// Distinct values in first-seen order, at most [`MAX_SAMPLES`].
pub(crate) fn samples<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(*value))
        .take(MAX_SAMPLES)
        .map(str::to_string)
        .collect()
}

/// Every distinct value, sorted.
pub(crate) fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    values
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
