//! Date parsing for raw time columns.
//!
//! Formats are chrono `strftime` strings. Time-of-day fields in a format are
//! parsed and discarded. A format without any day field denotes a whole
//! month.

use chrono::{Datelike, Months, NaiveDate};

use nis_model::TimeType;

/// Format specifiers that carry a day of month or day of year.
const DAY_SPECIFIERS: &[&str] = &["%d", "%e", "%j", "%F", "%D", "%x", "%c", "%v", "%+"];

/// Resolution of a configured date format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    /// The value names a single day.
    Day,
    /// The value names a calendar month.
    Month,
}

/// A parsed, reusable date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    format: String,
    precision: DatePrecision,
}

impl DateFormat {
    pub fn new(format: &str) -> Self {
        let precision = if DAY_SPECIFIERS.iter().any(|field| format.contains(field)) {
            DatePrecision::Day
        } else {
            DatePrecision::Month
        };
        Self {
            format: format.to_string(),
            precision,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.format
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }

    /// Parses the first day covered by `value`.
    pub fn parse_start(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        match self.precision {
            DatePrecision::Day => NaiveDate::parse_from_str(value, &self.format).ok(),
            DatePrecision::Month => {
                let padded = format!("{value}|01");
                let format = format!("{}|%d", self.format);
                NaiveDate::parse_from_str(&padded, &format).ok()
            }
        }
    }

    /// Parses the last day covered by `value`.
    pub fn parse_end(&self, value: &str) -> Option<NaiveDate> {
        let start = self.parse_start(value)?;
        match self.precision {
            DatePrecision::Day => Some(start),
            DatePrecision::Month => last_day_of_month(start),
        }
    }
}

/// Last calendar day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let first = date.with_day(1)?;
    first
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Infers the start of a reporting interval from its end date.
///
/// Weeks are seven inclusive days; months step back one calendar month,
/// clamping to the end of shorter months. The step keeps the day of month,
/// so a month ending 2024-02-29 starts on 2024-01-29, not on 2024-01-31.
pub fn interval_start(end: NaiveDate, time_type: TimeType) -> Option<NaiveDate> {
    match time_type {
        TimeType::Week => end.checked_sub_days(chrono::Days::new(6)),
        TimeType::Month => end.checked_sub_months(Months::new(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_formats_parse_directly() {
        let format = DateFormat::new("%m/%d/%Y");
        assert_eq!(format.precision(), DatePrecision::Day);
        assert_eq!(format.parse_end("10/07/2023"), Some(date(2023, 10, 7)));
        assert_eq!(format.parse_start("not a date"), None);
    }

    #[test]
    fn datetime_formats_truncate_to_date() {
        let format = DateFormat::new("%Y-%m-%dT%H:%M:%S%.f");
        assert_eq!(
            format.parse_end("2024-01-06T00:00:00.000"),
            Some(date(2024, 1, 6))
        );
    }

    #[test]
    fn month_formats_cover_the_whole_month() {
        let format = DateFormat::new("%m-%Y");
        assert_eq!(format.precision(), DatePrecision::Month);
        assert_eq!(format.parse_start("02-2024"), Some(date(2024, 2, 1)));
        assert_eq!(format.parse_end("02-2024"), Some(date(2024, 2, 29)));
        assert_eq!(format.parse_end("12-2023"), Some(date(2023, 12, 31)));
    }

    #[test]
    fn interval_start_by_time_type() {
        assert_eq!(
            interval_start(date(2024, 1, 13), TimeType::Week),
            Some(date(2024, 1, 7))
        );
        assert_eq!(
            interval_start(date(2024, 3, 31), TimeType::Month),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            interval_start(date(2024, 2, 29), TimeType::Month),
            Some(date(2024, 1, 29))
        );
    }
}
