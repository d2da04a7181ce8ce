//! Value-level parsing shared by the field cleaners.
//!
//! - **datetime**: strftime-driven date parsing and interval inference
//! - **numeric**: percent, proportion and interval parsing

pub mod datetime;
pub mod numeric;

pub use datetime::{DateFormat, DatePrecision, interval_start, last_day_of_month};
pub use numeric::{
    clamp_unit, parse_percent, parse_percent_interval, percent_to_proportion,
    strip_trailing_symbols,
};
