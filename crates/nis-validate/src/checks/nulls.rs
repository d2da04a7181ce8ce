use polars::prelude::DataFrame;

use crate::issue::Issue;

pub fn check(df: &DataFrame) -> Vec<Issue> {
    df.get_columns()
        .iter()
        .filter(|column| column.null_count() > 0)
        .map(|column| Issue::NullValues {
            column: column.name().to_string(),
            count: column.null_count(),
        })
        .collect()
}
