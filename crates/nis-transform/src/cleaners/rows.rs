use nis_common::text_values;
use nis_model::DropRowsConfig;
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::{filter_rows, require_columns};

/// Keeps rows whose flag value is one of `keep`, then removes the flag column.
///
/// Without a flag column this is a no-op.
pub fn drop_bad_rows(df: &DataFrame, config: &DropRowsConfig) -> Result<DataFrame> {
    let Some(flag) = config.column.as_deref() else {
        return Ok(df.clone());
    };
    require_columns(df, &[flag])?;

    let keep: Vec<bool> = text_values(df, flag)?
        .iter()
        .map(|value| {
            value
                .as_deref()
                .is_some_and(|v| config.keep.iter().any(|k| k == v.trim()))
        })
        .collect();
    let dropped = keep.iter().filter(|kept| !**kept).count();
    if dropped > 0 {
        tracing::info!(flag, dropped, "dropped flagged rows");
    }
    Ok(filter_rows(df, &keep)?.drop(flag)?)
}
