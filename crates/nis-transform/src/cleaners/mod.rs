//! Field cleaners.
//!
//! Each cleaner produces one canonical column (or the time/interval pair)
//! from raw columns. Text fields share one composition: resolve the source,
//! borrow from a donor, edit, then fold known source vocabulary onto the
//! canonical vocabulary.

mod ci;
mod domain;
mod estimate;
mod geography;
mod indicator;
mod rows;
mod sample_size;
mod time;
mod vaccine;

pub use ci::clean_lci_uci;
pub use domain::{clean_domain, clean_domain_type, normalize_age_label};
pub use estimate::clean_estimate;
pub use geography::{clean_geography, clean_geography_type, region_label};
pub use indicator::{clean_indicator, clean_indicator_type};
pub use rows::drop_bad_rows;
pub use sample_size::clean_sample_size;
pub use time::{clean_time_start_end, clean_time_type};
pub use vaccine::clean_vaccine;

use nis_common::{text_column, text_values};
use nis_model::FieldConfig;
use polars::prelude::DataFrame;

use crate::borrower::borrow_column;
use crate::editor::edit_column;
use crate::error::Result;
use crate::frame::with_column;
use crate::resolver::resolve_column;

/// Field-specific defaults applied around the configured edits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldDefaults {
    /// Lowercase unless the config says otherwise.
    pub lowercase: bool,
    /// Exact-value rewrites applied after editing.
    pub vocabulary: &'static [(&'static str, &'static str)],
}

impl FieldDefaults {
    pub const LOWERCASE: FieldDefaults = FieldDefaults {
        lowercase: true,
        vocabulary: &[],
    };
}

/// Resolve, borrow, edit and normalise one canonical text column.
pub(crate) fn clean_text_field(
    df: &DataFrame,
    target: &str,
    field: &FieldConfig,
    defaults: FieldDefaults,
) -> Result<DataFrame> {
    field.check(target)?;

    let mut out = if field.column.is_some() || field.override_value.is_some() {
        resolve_column(
            df,
            target,
            field.column.as_deref(),
            field.override_value.as_deref(),
        )?
    } else {
        df.clone()
    };

    if let Some(donor) = &field.donor {
        out = borrow_column(&out, target, donor, field.transfer.as_ref())?;
    }

    let mut edit = field.edit.clone();
    edit.lowercase.get_or_insert(defaults.lowercase);
    out = edit_column(&out, target, &edit)?;

    if defaults.vocabulary.is_empty() {
        Ok(out)
    } else {
        map_values(&out, target, |value| {
            defaults
                .vocabulary
                .iter()
                .find(|(from, _)| *from == value)
                .map_or_else(|| value.to_string(), |(_, to)| (*to).to_string())
        })
    }
}

/// Rewrites every non-null value of `column`.
pub(crate) fn map_values<F>(df: &DataFrame, column: &str, f: F) -> Result<DataFrame>
where
    F: Fn(&str) -> String,
{
    let values: Vec<Option<String>> = text_values(df, column)?
        .into_iter()
        .map(|value| value.map(|v| f(&v)))
        .collect();
    with_column(df, text_column(column, values))
}
