use nis_common::{f64_values, float_column, parse_f64, text_values};
use nis_model::schema::{ESTIMATE, LCI, UCI};
use nis_model::{CiConfig, CiEncoding};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::{drop_if_present, filter_rows, require_columns, warn_dropped, with_columns};
use crate::normalization::{clamp_unit, parse_percent_interval, strip_trailing_symbols};

/// Builds `lci` and `uci` from a half-width or a full interval column.
///
/// Runs after [`clean_estimate`](super::clean_estimate). Rows whose interval
/// cannot be parsed (for example `"NA"`) are dropped with a warning.
pub fn clean_lci_uci(df: &DataFrame, config: &CiConfig) -> Result<DataFrame> {
    let source = config.column.as_str();
    require_columns(df, &[source])?;

    let raw = text_values(df, source)?;
    let bounds: Vec<Option<(f64, f64)>> = match config.encoding {
        CiEncoding::HalfWidth => {
            require_columns(df, &[ESTIMATE])?;
            let estimates = f64_values(df, ESTIMATE)?;
            raw.iter()
                .zip(estimates)
                .map(|(half, estimate)| {
                    let half = parse_half_width(half.as_deref()?)?;
                    let estimate = estimate?;
                    Some((clamp_unit(estimate - half), clamp_unit(estimate + half)))
                })
                .collect()
        }
        CiEncoding::Full => raw
            .iter()
            .map(|value| parse_percent_interval(value.as_deref()?, &config.separator))
            .collect(),
    };

    let keep: Vec<bool> = bounds.iter().map(Option::is_some).collect();
    let dropped: Vec<Option<String>> = raw
        .into_iter()
        .zip(&keep)
        .filter(|(_, kept)| !**kept)
        .map(|(value, _)| value)
        .collect();
    warn_dropped(source, "confidence interval cannot be parsed", &dropped);

    let (lci, uci): (Vec<Option<f64>>, Vec<Option<f64>>) = bounds
        .into_iter()
        .flatten()
        .map(|(lower, upper)| (Some(lower), Some(upper)))
        .unzip();
    let out = filter_rows(df, &keep)?;
    let out = drop_if_present(&out, source)?;
    with_columns(&out, vec![float_column(LCI, lci), float_column(UCI, uci)])
}

/// Half-width in percent, as a proportion.
fn parse_half_width(raw: &str) -> Option<f64> {
    let cleaned = strip_trailing_symbols(raw);
    if cleaned.chars().any(char::is_alphabetic) {
        return None;
    }
    parse_f64(cleaned).map(|h| h.abs() / 100.0)
}
