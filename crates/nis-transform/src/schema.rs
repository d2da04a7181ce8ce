//! Schema enforcement.

use nis_common::canonical_dtype;
use nis_model::schema::{CANONICAL_SCHEMA, canonical_names};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::require_columns;

/// Restricts `df` to the canonical columns, in canonical order and types.
///
/// Missing canonical columns are fatal. Extra columns are dropped with a
/// warning. A column that cannot be cast to its canonical type is a Polars
/// error rather than a silent null.
pub fn enforce_schema(df: &DataFrame) -> Result<DataFrame> {
    let names: Vec<&str> = canonical_names().collect();
    require_columns(df, &names)?;

    let extras: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .filter(|c| !names.contains(&c.as_str()))
        .collect();
    if !extras.is_empty() {
        tracing::warn!(columns = ?extras, "dropping non-canonical columns");
    }

    let columns = CANONICAL_SCHEMA
        .iter()
        .map(|canonical| {
            let series = df.column(canonical.name)?.as_materialized_series();
            let dtype = canonical_dtype(canonical.column_type);
            let series = if series.dtype() == &dtype {
                series.clone()
            } else {
                series.strict_cast(&dtype)?
            };
            Ok(series.into_column())
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    Ok(DataFrame::new(columns)?)
}
