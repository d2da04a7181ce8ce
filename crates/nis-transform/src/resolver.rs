//! Column name resolver.
//!
//! Produces a canonical column either by renaming a source column or by
//! materialising a literal override on every row.

use nis_model::ConfigError;
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{drop_if_present, require_columns, with_column};

/// Returns a copy of `df` in which `target` exists.
///
/// Exactly one of `column` and `override_value` must be given.
pub fn resolve_column(
    df: &DataFrame,
    target: &str,
    column: Option<&str>,
    override_value: Option<&str>,
) -> Result<DataFrame> {
    match (column, override_value) {
        (Some(_), Some(_)) => Err(ConfigError::ConfigConflict {
            column: target.to_string(),
        }
        .into()),
        (None, None) => Err(ConfigError::MissingSource {
            column: target.to_string(),
        }
        .into()),
        (Some(source), None) => rename_column(df, source, target),
        (None, Some(value)) => {
            let series = Series::new(target.into(), vec![value; df.height()]);
            with_column(df, series.into_column())
        }
    }
}

fn rename_column(df: &DataFrame, source: &str, target: &str) -> Result<DataFrame> {
    require_columns(df, &[source])?;
    if source == target {
        return Ok(df.clone());
    }
    let mut out = drop_if_present(df, target)?;
    out.rename(source, target.into())?;
    tracing::debug!(source, target, "renamed source column");
    Ok(out)
}
