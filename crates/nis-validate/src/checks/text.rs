//! Whitespace and capitalization of categorical text columns.

use nis_model::schema::{LOWERCASE_COLUMNS, TEXT_COLUMNS};
use polars::prelude::DataFrame;

use super::{samples, text};
use crate::issue::Issue;

/// Leading, trailing or repeated whitespace, or any whitespace other than a
/// plain space.
pub fn has_irregular_whitespace(value: &str) -> bool {
    value.trim() != value
        || value.contains("  ")
        || value.chars().any(|c| c.is_whitespace() && c != ' ')
}

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in TEXT_COLUMNS {
        let Some(values) = text(df, column) else {
            continue;
        };
        let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();

        let spaced: Vec<&str> = present
            .iter()
            .copied()
            .filter(|v| has_irregular_whitespace(v))
            .collect();
        if !spaced.is_empty() {
            issues.push(Issue::Whitespace {
                column: (*column).to_string(),
                count: spaced.len(),
                samples: samples(spaced),
            });
        }

        if LOWERCASE_COLUMNS.contains(column) {
            let cased: Vec<&str> = present
                .iter()
                .copied()
                .filter(|v| v.to_lowercase() != *v)
                .collect();
            if !cased.is_empty() {
                issues.push(Issue::Capitalization {
                    column: (*column).to_string(),
                    count: cased.len(),
                    samples: samples(cased),
                });
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_rule() {
        assert!(has_irregular_whitespace("received  a  vaccination"));
        assert!(has_irregular_whitespace(" flu"));
        assert!(has_irregular_whitespace("flu\tshot"));
        assert!(!has_irregular_whitespace("received a vaccination"));
    }
}
