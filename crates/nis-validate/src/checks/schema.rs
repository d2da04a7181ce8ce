//! Canonical schema conformance.

use nis_common::canonical_dtype;
use nis_model::schema::{CANONICAL_SCHEMA, canonical_names};
use polars::prelude::DataFrame;

use crate::issue::Issue;

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let found: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    let mut issues = Vec::new();

    for canonical in CANONICAL_SCHEMA {
        let Ok(column) = df.column(canonical.name) else {
            issues.push(Issue::MissingColumn {
                column: canonical.name.to_string(),
            });
            continue;
        };
        let expected = canonical_dtype(canonical.column_type);
        if column.dtype() != &expected {
            issues.push(Issue::ColumnType {
                column: canonical.name.to_string(),
                expected: expected.to_string(),
                found: column.dtype().to_string(),
            });
        }
    }

    let canonical: Vec<&str> = canonical_names().collect();
    for name in &found {
        if !canonical.contains(&name.as_str()) {
            issues.push(Issue::ExtraColumn {
                column: name.clone(),
            });
        }
    }

    if issues.is_empty() && found != canonical {
        issues.push(Issue::ColumnOrder { found });
    }
    issues
}
