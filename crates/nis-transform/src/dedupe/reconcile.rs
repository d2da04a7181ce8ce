//! Near-duplicate reconciliation.

use indexmap::IndexMap;
use nis_common::{f64_values, float_column, row_values};
use nis_model::schema::VALUE_COLUMNS;
use polars::prelude::DataFrame;

use crate::error::{CleanError, Result};
use crate::frame::{require_columns, take_rows, with_columns};

/// Options for [`reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOptions {
    /// Largest permitted `|x - mean|` within a group, exclusive.
    pub tolerance: f64,
    /// Exact size required of every group with more than one row.
    pub n_fold_duplication: Option<usize>,
    /// Numeric columns averaged within each group.
    pub value_columns: Vec<String>,
    /// Grouping columns; defaults to every column that is not a value column.
    pub group_columns: Option<Vec<String>>,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            n_fold_duplication: None,
            value_columns: VALUE_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            group_columns: None,
        }
    }
}

impl ReconcileOptions {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn with_n_fold_duplication(mut self, n: usize) -> Self {
        self.n_fold_duplication = Some(n);
        self
    }

    pub fn with_value_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

type GroupKey = Vec<Option<String>>;

/// Collapses rows that agree on every group column into one row holding the
/// mean of each value column.
///
/// Fails with [`CleanError::ReconciliationConflict`] if any group's values
/// spread as far as the tolerance, and with
/// [`CleanError::UnexpectedDuplication`] if a fold size is set and a
/// duplicated group has any other size. Output rows keep the order in which
/// their groups first appear; the input is never modified.
pub fn reconcile(df: &DataFrame, options: &ReconcileOptions) -> Result<DataFrame> {
    let value_columns: Vec<&str> = options.value_columns.iter().map(String::as_str).collect();
    let group_columns: Vec<String> = match &options.group_columns {
        Some(columns) => columns.clone(),
        None => df
            .get_column_names()
            .into_iter()
            .map(|c| c.to_string())
            .filter(|c| !options.value_columns.contains(c))
            .collect(),
    };
    let group_refs: Vec<&str> = group_columns.iter().map(String::as_str).collect();
    require_columns(df, &value_columns)?;
    require_columns(df, &group_refs)?;

    let mut groups: IndexMap<GroupKey, Vec<usize>> = IndexMap::new();
    for (row, key) in row_values(df, &group_refs)?.into_iter().enumerate() {
        groups.entry(key).or_default().push(row);
    }

    if let Some(expected) = options.n_fold_duplication {
        check_fold(&groups, expected)?;
    }

    let values = value_columns
        .iter()
        .map(|column| f64_values(df, column))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut means: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(groups.len()); values.len()];
    let mut conflicts = Vec::new();
    for (key, rows) in &groups {
        let mut spreads = Vec::new();
        for ((column, column_values), column_means) in
            value_columns.iter().zip(&values).zip(means.iter_mut())
        {
            let present: Vec<f64> = rows.iter().filter_map(|&r| column_values[r]).collect();
            let Some(mean) = average(&present) else {
                column_means.push(None);
                continue;
            };
            let spread = present
                .iter()
                .map(|x| (x - mean).abs())
                .fold(0.0_f64, f64::max);
            let within = spread < options.tolerance;
            if present.len() > 1 && !within {
                spreads.push(format!("{column} spread {spread:.6}"));
            }
            column_means.push(Some(mean));
        }
        if !spreads.is_empty() {
            conflicts.push(format!(
                "{} ({})",
                describe_key(&group_refs, key),
                spreads.join(", ")
            ));
        }
    }

    if !conflicts.is_empty() {
        tracing::error!(
            groups = conflicts.len(),
            tolerance = options.tolerance,
            "near-duplicate rows disagree"
        );
        return Err(CleanError::ReconciliationConflict {
            tolerance: options.tolerance,
            groups: conflicts,
        });
    }

    let firsts: Vec<usize> = groups.values().filter_map(|rows| rows.first().copied()).collect();
    let collapsed = df.height() - firsts.len();
    let out = take_rows(df, &firsts)?;
    let columns = value_columns
        .iter()
        .zip(means)
        .map(|(column, column_means)| float_column(column, column_means))
        .collect();
    if collapsed > 0 {
        tracing::debug!(collapsed, groups = firsts.len(), "reconciled near-duplicate rows");
    }
    with_columns(&out, columns)
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn check_fold(groups: &IndexMap<GroupKey, Vec<usize>>, expected: usize) -> Result<()> {
    let mut found: Vec<usize> = groups
        .values()
        .map(Vec::len)
        .filter(|&size| size > 1 && size != expected)
        .collect();
    if found.is_empty() {
        return Ok(());
    }
    found.sort_unstable();
    found.dedup();
    Err(CleanError::UnexpectedDuplication { expected, found })
}

fn describe_key(columns: &[&str], key: &GroupKey) -> String {
    columns
        .iter()
        .zip(key)
        .map(|(column, value)| format!("{column}={}", value.as_deref().unwrap_or("null")))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame(groups: Vec<i64>, value1: Vec<f64>, value2: Vec<f64>) -> DataFrame {
        DataFrame::new(vec![
            Series::new("group".into(), groups).into_column(),
            Series::new("value1".into(), value1).into_column(),
            Series::new("value2".into(), value2).into_column(),
        ])
        .unwrap()
    }

    fn options(tolerance: f64) -> ReconcileOptions {
        ReconcileOptions::new(tolerance).with_value_columns(["value1", "value2"])
    }

    #[test]
    fn fold_check_ignores_singletons() {
        let df = frame(vec![1, 1, 2], vec![0.0, 0.0, 1.0], vec![0.0, 0.0, 1.0]);
        let out = reconcile(&df, &options(0.1).with_n_fold_duplication(2)).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn fold_check_reports_other_sizes() {
        let df = frame(vec![1, 1, 1], vec![0.0; 3], vec![0.0; 3]);
        let err = reconcile(&df, &options(0.1).with_n_fold_duplication(2)).unwrap_err();
        assert!(matches!(
            err,
            CleanError::UnexpectedDuplication { expected: 2, ref found } if found == &vec![3]
        ));
    }

    #[test]
    fn nulls_are_ignored_in_means() {
        let df = DataFrame::new(vec![
            Series::new("group".into(), vec![1i64, 1]).into_column(),
            Series::new("value1".into(), vec![Some(0.2), None]).into_column(),
        ])
        .unwrap();
        let out = reconcile(
            &df,
            &ReconcileOptions::new(0.1).with_value_columns(["value1"]),
        )
        .unwrap();
        assert_eq!(f64_values(&out, "value1").unwrap(), vec![Some(0.2)]);
    }
}
