//! Shared utilities for the NIS cleaning crates.
//!
//! Column extraction and construction helpers over Polars DataFrames, so the
//! cleaning and validation crates agree on how cells become Rust values.

pub mod polars;

pub use self::polars::{
    canonical_dtype, date_column, date_from_days, date_values, days_from_date, f64_values,
    float_column, i64_values, int_column, parse_count, parse_f64, row_values, text_column,
    text_values,
};
