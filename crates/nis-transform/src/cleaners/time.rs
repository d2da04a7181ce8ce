use chrono::NaiveDate;
use nis_common::{date_column, text_values};
use nis_model::schema::{TIME_END, TIME_START, TIME_TYPE};
use nis_model::{FieldConfig, TimeConfig, TimeEncoding, TimeType};
use polars::prelude::DataFrame;

use super::{FieldDefaults, clean_text_field};
use crate::error::{CleanError, Result};
use crate::frame::{drop_if_present, require_columns, with_columns};
use crate::normalization::{DateFormat, interval_start};

const TIME_TYPE_DEFAULTS: FieldDefaults = FieldDefaults {
    lowercase: true,
    vocabulary: &[("weekly", "week"), ("monthly", "month")],
};

pub fn clean_time_type(df: &DataFrame, field: &FieldConfig) -> Result<DataFrame> {
    clean_text_field(df, TIME_TYPE, field, TIME_TYPE_DEFAULTS)
}

/// Builds `time_start` and `time_end` from the configured source columns.
///
/// Source columns are removed afterwards. A non-null value that does not
/// match the format is fatal, as is a `time_type` other than week or month
/// when the start must be inferred.
pub fn clean_time_start_end(df: &DataFrame, config: &TimeConfig) -> Result<DataFrame> {
    config.check()?;
    let columns: Vec<&str> = config.columns.iter().map(String::as_str).collect();
    require_columns(df, &columns)?;

    let format = DateFormat::new(&config.format);
    let (starts, ends) = match config.encoding {
        TimeEncoding::End => end_encoded(df, config, &format)?,
        TimeEncoding::Range => range_encoded(df, config, &format)?,
    };

    let mut out = df.clone();
    for column in &columns {
        out = drop_if_present(&out, column)?;
    }
    with_columns(
        &out,
        vec![
            date_column(TIME_START, &starts)?,
            date_column(TIME_END, &ends)?,
        ],
    )
}

type Dates = Vec<Option<NaiveDate>>;

/// Row-wise join of the source columns; null if any part is null.
fn joined_values(df: &DataFrame, columns: &[String], join: &str) -> Result<Vec<Option<String>>> {
    let parts = columns
        .iter()
        .map(|column| text_values(df, column))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((0..df.height())
        .map(|row| {
            parts
                .iter()
                .map(|column| column[row].as_deref().map(str::trim))
                .collect::<Option<Vec<_>>>()
                .map(|pieces| pieces.join(join))
        })
        .collect())
}

fn unrecognized(config: &TimeConfig, value: &str) -> CleanError {
    CleanError::UnrecognizedColumnFormat {
        column: config.columns.join(", "),
        value: value.to_string(),
        format: config.format.clone(),
    }
}

fn end_encoded(df: &DataFrame, config: &TimeConfig, format: &DateFormat) -> Result<(Dates, Dates)> {
    require_columns(df, &[TIME_TYPE])?;
    let raw = joined_values(df, &config.columns, &config.join)?;
    let time_types = text_values(df, TIME_TYPE)?;

    let mut starts = Vec::with_capacity(raw.len());
    let mut ends = Vec::with_capacity(raw.len());
    for (value, time_type) in raw.iter().zip(&time_types) {
        let Some(value) = value else {
            starts.push(None);
            ends.push(None);
            continue;
        };
        let end = format
            .parse_end(value)
            .ok_or_else(|| unrecognized(config, value))?;
        let time_type = time_type
            .as_deref()
            .unwrap_or("<null>")
            .parse::<TimeType>()
            .map_err(|value| CleanError::UnrecognizedTimeType { value })?;
        starts.push(interval_start(end, time_type));
        ends.push(Some(end));
    }
    Ok((starts, ends))
}

fn range_encoded(df: &DataFrame, config: &TimeConfig, format: &DateFormat) -> Result<(Dates, Dates)> {
    let (first, rest) = config
        .columns
        .split_first()
        .ok_or_else(|| unrecognized(config, ""))?;
    let ranges = text_values(df, first)?;
    let suffixes = if rest.is_empty() {
        vec![Some(String::new()); df.height()]
    } else {
        joined_values(df, rest, &config.join)?
    };

    let mut starts = Vec::with_capacity(ranges.len());
    let mut ends = Vec::with_capacity(ranges.len());
    for (range, suffix) in ranges.iter().zip(&suffixes) {
        let (Some(range), Some(suffix)) = (range, suffix) else {
            starts.push(None);
            ends.push(None);
            continue;
        };
        let (lower, upper) = range
            .split_once(config.separator.as_str())
            .ok_or_else(|| unrecognized(config, range))?;
        let with_suffix = |half: &str| {
            if suffix.is_empty() {
                half.trim().to_string()
            } else {
                format!("{}{}{}", half.trim(), config.join, suffix)
            }
        };
        let start = format
            .parse_start(&with_suffix(lower))
            .ok_or_else(|| unrecognized(config, range))?;
        let end = format
            .parse_end(&with_suffix(upper))
            .ok_or_else(|| unrecognized(config, range))?;
        starts.push(Some(start));
        ends.push(Some(end));
    }
    Ok((starts, ends))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nis_common::date_values;
    use polars::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn end_dates_infer_start_from_time_type() {
        let df = DataFrame::new(vec![
            Series::new("week_ending".into(), vec!["2024-01-13", "2024-03-31"]).into_column(),
            Series::new("time_type".into(), vec!["week", "month"]).into_column(),
        ])
        .unwrap();
        let out = clean_time_start_end(&df, &TimeConfig::end("week_ending", "%Y-%m-%d")).unwrap();
        assert!(out.column("week_ending").is_err());
        assert_eq!(
            date_values(&out, TIME_START).unwrap(),
            vec![date(2024, 1, 7), date(2024, 2, 29)]
        );
        assert_eq!(
            date_values(&out, TIME_END).unwrap(),
            vec![date(2024, 1, 13), date(2024, 3, 31)]
        );
    }

    #[test]
    fn unknown_time_type_is_fatal() {
        let df = DataFrame::new(vec![
            Series::new("week_ending".into(), vec!["2024-01-13"]).into_column(),
            Series::new("time_type".into(), vec!["year"]).into_column(),
        ])
        .unwrap();
        let err = clean_time_start_end(&df, &TimeConfig::end("week_ending", "%Y-%m-%d")).unwrap_err();
        assert!(matches!(err, CleanError::UnrecognizedTimeType { value } if value == "year"));
    }

    #[test]
    fn ranges_with_a_year_column() {
        let df = DataFrame::new(vec![
            Series::new("time_period".into(), vec!["October 1 - October 31"]).into_column(),
            Series::new("year".into(), vec!["2023"]).into_column(),
        ])
        .unwrap();
        let config = TimeConfig::range("time_period", "%B %d %Y")
            .with_columns(["time_period", "year"])
            .with_separator(" - ");
        let out = clean_time_start_end(&df, &config).unwrap();
        assert_eq!(date_values(&out, TIME_START).unwrap(), vec![date(2023, 10, 1)]);
        assert_eq!(date_values(&out, TIME_END).unwrap(), vec![date(2023, 10, 31)]);
        assert!(out.column("year").is_err());
    }

    #[test]
    fn bad_dates_are_fatal() {
        let df = DataFrame::new(vec![
            Series::new("timeframe".into(), vec!["01/05/2024-bogus"]).into_column(),
        ])
        .unwrap();
        let err = clean_time_start_end(&df, &TimeConfig::range("timeframe", "%m/%d/%Y")).unwrap_err();
        assert!(matches!(err, CleanError::UnrecognizedColumnFormat { .. }));
    }
}
