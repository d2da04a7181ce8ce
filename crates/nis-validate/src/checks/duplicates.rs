//! Duplicated rows and duplicated observation groups.

use std::collections::HashSet;

use nis_common::row_values;
use nis_model::schema::VALUE_COLUMNS;
use polars::prelude::DataFrame;

use crate::issue::Issue;

/// Rows equal to an earlier row on `columns`.
fn repeated(df: &DataFrame, columns: &[&str]) -> usize {
    let Ok(rows) = row_values(df, columns) else {
        return 0;
    };
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|row| !seen.insert(row.clone())).count()
}

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    let all: Vec<&str> = names.iter().map(String::as_str).collect();
    let groups: Vec<&str> = all
        .iter()
        .copied()
        .filter(|c| !VALUE_COLUMNS.contains(c))
        .collect();

    let mut issues = Vec::new();
    let rows = repeated(df, &all);
    if rows > 0 {
        issues.push(Issue::DuplicateRows { count: rows });
    }
    let group_rows = repeated(df, &groups);
    if group_rows > rows {
        issues.push(Issue::DuplicateGroups { count: group_rows });
    }
    issues
}
