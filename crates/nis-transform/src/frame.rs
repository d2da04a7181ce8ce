//! Small DataFrame operations shared by the cleaners.
//!
//! Every helper takes the input frame by reference and returns a new frame;
//! nothing here mutates a caller's table.

use polars::prelude::*;

use crate::error::{CleanError, Result};

/// Maximum number of offending raw values echoed in a dropped-rows warning.
pub const DROPPED_SAMPLE_LIMIT: usize = 10;

/// Returns a copy of `df` with `column` added or replaced.
pub fn with_column(df: &DataFrame, column: Column) -> Result<DataFrame> {
    let mut out = df.clone();
    out.with_column(column)?;
    Ok(out)
}

/// Returns a copy of `df` with each column added or replaced, in order.
pub fn with_columns(df: &DataFrame, columns: Vec<Column>) -> Result<DataFrame> {
    let mut out = df.clone();
    for column in columns {
        out.with_column(column)?;
    }
    Ok(out)
}

/// Returns a copy of `df` without `name`, or an unchanged copy if absent.
pub fn drop_if_present(df: &DataFrame, name: &str) -> Result<DataFrame> {
    if has_column(df, name) {
        Ok(df.drop(name)?)
    } else {
        Ok(df.clone())
    }
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Fails with [`CleanError::MissingColumns`] if any of `names` is absent.
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !has_column(df, name))
        .map(|name| (*name).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CleanError::MissingColumns { columns: missing })
    }
}

/// Keeps the rows whose mask entry is `true`.
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Keeps rows by index, in the given order.
pub fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
    let idx: Vec<IdxSize> = indices.iter().map(|&i| i as IdxSize).collect();
    Ok(df.take(&IdxCa::from_vec("idx".into(), idx))?)
}

/// Logs rows dropped for a data-quality reason, with a bounded sample.
pub fn warn_dropped(column: &str, reason: &str, raw: &[Option<String>]) {
    if raw.is_empty() {
        return;
    }
    let sample: Vec<&str> = raw
        .iter()
        .take(DROPPED_SAMPLE_LIMIT)
        .map(|value| value.as_deref().unwrap_or("<null>"))
        .collect();
    tracing::warn!(
        column,
        dropped = raw.len(),
        sample = ?sample,
        "dropping rows: {reason}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("a".into(), vec!["x", "y", "z"]).into_column(),
            Series::new("b".into(), vec![1i64, 2, 3]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn filter_and_take_do_not_touch_input() {
        let df = frame();
        let kept = filter_rows(&df, &[true, false, true]).unwrap();
        assert_eq!(kept.height(), 2);
        let taken = take_rows(&df, &[2, 0]).unwrap();
        let a = taken.column("a").unwrap().str().unwrap();
        assert_eq!(a.get(0), Some("z"));
        assert_eq!(a.get(1), Some("x"));
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn require_columns_lists_all_missing() {
        let err = require_columns(&frame(), &["a", "c", "d"]).unwrap_err();
        match err {
            CleanError::MissingColumns { columns } => {
                assert_eq!(columns, vec!["c".to_string(), "d".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn drop_if_present_is_tolerant() {
        let df = frame();
        assert_eq!(drop_if_present(&df, "missing").unwrap().width(), 2);
        assert_eq!(drop_if_present(&df, "b").unwrap().width(), 1);
    }
}
