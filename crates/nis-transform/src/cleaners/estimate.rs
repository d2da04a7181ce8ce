use nis_common::{float_column, text_values};
use nis_model::EstimateConfig;
use nis_model::schema::ESTIMATE;
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::{drop_if_present, filter_rows, require_columns, warn_dropped, with_column};
use crate::normalization::parse_percent;

/// Parses the percent estimate into a proportion in `[0, 1]`.
///
/// Rows whose estimate is null, contains letters or is not a number are
/// dropped with a warning.
pub fn clean_estimate(df: &DataFrame, config: &EstimateConfig) -> Result<DataFrame> {
    let source = config.column.as_str();
    require_columns(df, &[source])?;

    let raw = text_values(df, source)?;
    let parsed: Vec<Option<f64>> = raw.iter().map(|v| v.as_deref().and_then(parse_percent)).collect();
    let keep: Vec<bool> = parsed.iter().map(Option::is_some).collect();
    let dropped: Vec<Option<String>> = raw
        .into_iter()
        .zip(&keep)
        .filter(|(_, kept)| !**kept)
        .map(|(value, _)| value)
        .collect();
    warn_dropped(source, "estimate is missing or not numeric", &dropped);

    let kept_values: Vec<Option<f64>> = parsed.into_iter().filter(Option::is_some).collect();
    let out = filter_rows(df, &keep)?;
    let out = drop_if_present(&out, source)?;
    with_column(&out, float_column(ESTIMATE, kept_values))
}
