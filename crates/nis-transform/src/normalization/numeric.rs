//! Percent and interval parsing for estimate columns.

use nis_common::parse_f64;

/// Clamps a proportion to `[0, 1]`.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Converts a percent to a proportion clamped to `[0, 1]`.
pub fn percent_to_proportion(percent: f64) -> f64 {
    clamp_unit(percent / 100.0)
}

/// Parses a percent string into a clamped proportion.
///
/// Values containing letters, such as `"NA"` or `"suppressed"`, are rejected.
pub fn parse_percent(raw: &str) -> Option<f64> {
    if raw.chars().any(char::is_alphabetic) {
        return None;
    }
    parse_f64(raw).map(percent_to_proportion)
}

/// Removes stray non-numeric symbols trailing a number, e.g. `"12.4*"` or
/// `"12.4‡"`.
pub fn strip_trailing_symbols(raw: &str) -> &str {
    raw.trim()
        .trim_end_matches(|c: char| !(c.is_ascii_digit() || c == '.'))
        .trim()
}

/// Splits a `lower<sep>upper` percent interval into clamped proportions.
pub fn parse_percent_interval(raw: &str, separator: &str) -> Option<(f64, f64)> {
    let (lower, upper) = raw.split_once(separator)?;
    let parse = |half: &str| {
        let half = strip_trailing_symbols(half);
        if half.chars().any(char::is_alphabetic) {
            return None;
        }
        parse_f64(half).map(percent_to_proportion)
    };
    Some((parse(lower)?, parse(upper)?))
}
