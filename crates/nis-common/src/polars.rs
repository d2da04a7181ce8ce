//! Column helpers for Polars DataFrames.
//!
//! Cleaning steps work on whole columns: pull a column out as plain Rust
//! values, transform them, and rebuild a typed column. These helpers keep that
//! round trip in one place.

use chrono::{Datelike, NaiveDate};
use nis_model::ColumnType;
use polars::prelude::*;

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Polars dtype used for a canonical column type.
pub fn canonical_dtype(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Text => DataType::String,
        ColumnType::Date => DataType::Date,
        ColumnType::Float => DataType::Float64,
        ColumnType::Integer => DataType::Int64,
    }
}

/// Converts a calendar date to Polars' physical `Date` representation.
pub fn days_from_date(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Converts Polars' physical `Date` representation to a calendar date.
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Reads a column as optional strings, casting non-string columns.
///
/// Dates render as ISO `YYYY-MM-DD`.
pub fn text_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let series = df.column(name)?.as_materialized_series();
    let casted = series.cast(&DataType::String)?;
    Ok(casted
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Reads a numeric column as `f64`. String cells that do not parse become null.
pub fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series();
    if series.dtype() == &DataType::String {
        return Ok(series
            .str()?
            .into_iter()
            .map(|value| value.and_then(parse_f64))
            .collect());
    }
    let casted = series.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().collect())
}

/// Reads an integer column as `i64`.
pub fn i64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let series = df.column(name)?.as_materialized_series();
    if series.dtype() == &DataType::String {
        return Ok(series
            .str()?
            .into_iter()
            .map(|value| value.and_then(parse_count))
            .collect());
    }
    let casted = series.cast(&DataType::Int64)?;
    Ok(casted.i64()?.into_iter().collect())
}

/// Reads a `Date` column as calendar dates.
pub fn date_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<NaiveDate>>> {
    let series = df.column(name)?.as_materialized_series();
    if series.dtype() != &DataType::Date {
        polars_bail!(
            SchemaMismatch: "column `{}` has type {}, expected date", name, series.dtype()
        );
    }
    let physical = series.cast(&DataType::Int32)?;
    Ok(physical
        .i32()?
        .into_iter()
        .map(|days| days.and_then(date_from_days))
        .collect())
}

pub fn text_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}

pub fn float_column(name: &str, values: Vec<Option<f64>>) -> Column {
    Series::new(name.into(), values).into_column()
}

pub fn int_column(name: &str, values: Vec<Option<i64>>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Builds a `Date` column from calendar dates.
pub fn date_column(name: &str, values: &[Option<NaiveDate>]) -> PolarsResult<Column> {
    let days: Vec<Option<i32>> = values
        .iter()
        .map(|value| value.map(days_from_date))
        .collect();
    let series = Series::new(name.into(), days).cast(&DataType::Date)?;
    Ok(series.into_column())
}

/// Row-major string rendering of the named columns.
///
/// Used wherever rows are compared or grouped by value; nulls stay `None` so
/// that a null never equals the literal string `"null"`.
pub fn row_values(df: &DataFrame, names: &[&str]) -> PolarsResult<Vec<Vec<Option<String>>>> {
    let columns = names
        .iter()
        .map(|name| text_values(df, name))
        .collect::<PolarsResult<Vec<_>>>()?;
    let mut rows = vec![Vec::with_capacity(names.len()); df.height()];
    for column in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }
    Ok(rows)
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a count such as `"1,234"` or `"12.0"`.
///
/// Fractional values are rejected rather than truncated.
pub fn parse_count(value: &str) -> Option<i64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(v) = cleaned.parse::<i64>() {
        return Some(v);
    }
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("text".into(), vec![Some("a"), None, Some("c")]).into_column(),
            Series::new("num".into(), vec![Some("1.5"), Some("x"), None]).into_column(),
            Series::new("int".into(), vec![Some(3i64), None, Some(5)]).into_column(),
        ])
        .expect("frame")
    }

    #[test]
    fn test_epoch_conversion() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("date");
        assert_eq!(days_from_date(epoch), 0);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        assert_eq!(date_from_days(days_from_date(date)), Some(date));
    }

    #[test]
    fn test_text_values_keep_nulls() {
        let df = frame();
        assert_eq!(
            text_values(&df, "text").expect("text"),
            vec![Some("a".to_string()), None, Some("c".to_string())]
        );
        assert_eq!(
            text_values(&df, "int").expect("int as text"),
            vec![Some("3".to_string()), None, Some("5".to_string())]
        );
    }

    #[test]
    fn test_f64_values_from_strings() {
        let df = frame();
        assert_eq!(f64_values(&df, "num").expect("num"), vec![Some(1.5), None, None]);
        assert_eq!(f64_values(&df, "int").expect("int"), vec![Some(3.0), None, Some(5.0)]);
    }

    #[test]
    fn test_date_column_round_trip() {
        let dates = vec![NaiveDate::from_ymd_opt(2023, 10, 7), None];
        let column = date_column("d", &dates).expect("column");
        assert_eq!(column.dtype(), &DataType::Date);
        let df = DataFrame::new(vec![column]).expect("frame");
        assert_eq!(date_values(&df, "d").expect("dates"), dates);
        assert!(date_values(&frame(), "text").is_err());
    }

    #[test]
    fn test_row_values_are_row_major() {
        let rows = row_values(&frame(), &["text", "int"]).expect("rows");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![Some("a".to_string()), Some("3".to_string())]);
        assert_eq!(rows[1], vec![None, None]);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1,234"), Some(1234));
        assert_eq!(parse_count(" 12.0 "), Some(12));
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("NA"), None);
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("  3.25 "), Some(3.25));
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64(""), None);
    }
}
