//! Deduplication and reconciliation.
//!
//! [`remove_duplicates`] runs, in order: synonym resolution, exact duplicate
//! removal and near-duplicate reconciliation over the canonical value
//! columns.

mod reconcile;
mod synonym;

pub use reconcile::{ReconcileOptions, reconcile};
pub use synonym::resolve_synonyms;

use std::collections::HashSet;

use nis_common::row_values;
use nis_model::DedupeConfig;
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::filter_rows;

/// Drops rows identical to an earlier row across every column.
pub fn drop_exact_duplicates(df: &DataFrame) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let rows = row_values(df, &refs)?;

    let mut seen = HashSet::with_capacity(rows.len());
    let keep: Vec<bool> = rows.into_iter().map(|row| seen.insert(row)).collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped == 0 {
        return Ok(df.clone());
    }
    tracing::debug!(dropped, "dropped exact duplicate rows");
    filter_rows(df, &keep)
}

/// Synonyms, then exact duplicates, then near-duplicate reconciliation.
pub fn remove_duplicates(df: &DataFrame, config: &DedupeConfig) -> Result<DataFrame> {
    config.check()?;
    let mut out = resolve_synonyms(df, &config.synonyms)?;
    if config.drop_exact {
        out = drop_exact_duplicates(&out)?;
    }
    let options = ReconcileOptions {
        tolerance: config.tolerance,
        n_fold_duplication: config.n_fold_duplication,
        ..ReconcileOptions::default()
    };
    reconcile(&out, &options)
}
