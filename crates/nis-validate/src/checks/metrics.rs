//! Estimate, confidence bounds and sample size.

use nis_common::{f64_values, i64_values};
use nis_model::schema::{ESTIMATE, LCI, SAMPLE_SIZE, UCI, VALUE_COLUMNS};
use polars::prelude::DataFrame;

use crate::issue::Issue;

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();

    for column in VALUE_COLUMNS {
        let Ok(values) = f64_values(df, column) else {
            continue;
        };
        let count = values
            .iter()
            .flatten()
            .filter(|v| !(0.0..=1.0).contains(*v))
            .count();
        if count > 0 {
            issues.push(Issue::OutOfRange {
                column: (*column).to_string(),
                count,
            });
        }
    }

    if let (Ok(estimates), Ok(lcis), Ok(ucis)) =
        (f64_values(df, ESTIMATE), f64_values(df, LCI), f64_values(df, UCI))
    {
        let count = estimates
            .iter()
            .zip(&lcis)
            .zip(&ucis)
            .filter(|((estimate, lci), uci)| match (estimate, lci, uci) {
                (Some(estimate), Some(lci), Some(uci)) => !(lci <= estimate && estimate <= uci),
                _ => false,
            })
            .count();
        if count > 0 {
            issues.push(Issue::Bracket { count });
        }
    }

    if let Ok(sizes) = i64_values(df, SAMPLE_SIZE) {
        let count = sizes.iter().flatten().filter(|n| **n <= 0).count();
        if count > 0 {
            issues.push(Issue::NonPositiveSampleSize { count });
        }
    }
    issues
}
