//! Validator entry points and mode handling.

use polars::prelude::DataFrame;

use crate::checks;
use crate::issue::Issue;
use crate::mode::{ValidationError, ValidationMode};
use crate::report::ValidationReport;

type Check = fn(&DataFrame) -> Vec<Issue>;

/// Checks in reporting order.
const CHECKS: &[Check] = &[
    checks::schema::check,
    checks::duplicates::check,
    checks::nulls::check,
    checks::text::check,
    checks::vaccine::check,
    checks::geography::check,
    checks::age::check,
    checks::time::check,
    checks::metrics::check,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    mode: ValidationMode,
}

impl Validator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Runs every rule, regardless of mode.
    pub fn check(&self, dataset: &str, df: &DataFrame) -> ValidationReport {
        let mut report = ValidationReport::new(dataset);
        for check in CHECKS {
            report.extend(check(df));
        }
        report
    }

    /// Validates `df` and applies the mode.
    ///
    /// `Ignore` runs nothing and returns an empty report. `Warn` logs each
    /// problem and returns the report. `Error` logs each problem and fails
    /// if there was any.
    pub fn validate(
        &self,
        dataset: &str,
        df: &DataFrame,
    ) -> Result<ValidationReport, ValidationError> {
        if self.mode == ValidationMode::Ignore {
            return Ok(ValidationReport::new(dataset));
        }
        let report = self.check(dataset, df);
        for issue in &report.issues {
            tracing::warn!(dataset, rule = issue.rule(), "{issue}");
        }
        if report.is_empty() {
            tracing::debug!(dataset, rows = df.height(), "validation passed");
            return Ok(report);
        }
        match self.mode {
            ValidationMode::Error => Err(ValidationError::Failed {
                dataset: dataset.to_string(),
                problems: report.problems(),
            }),
            ValidationMode::Ignore | ValidationMode::Warn => Ok(report),
        }
    }
}

/// Validates `df` under `mode`.
pub fn validate(
    dataset: &str,
    df: &DataFrame,
    mode: ValidationMode,
) -> Result<ValidationReport, ValidationError> {
    Validator::new(mode).validate(dataset, df)
}
