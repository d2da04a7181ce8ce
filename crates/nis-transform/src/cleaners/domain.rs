use std::sync::LazyLock;

use nis_common::{text_column, text_values};
use nis_model::FieldConfig;
use nis_model::schema::{DOMAIN, DOMAIN_TYPE};
use nis_model::vocabulary::OVERALL;
use polars::prelude::DataFrame;
use regex::Regex;

use super::{FieldDefaults, clean_text_field, map_values};
use crate::error::Result;
use crate::frame::{has_column, with_column};

static AT_LEAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:>=|≥)\s*(\d+)\s*(years|months)$").expect("valid regex")
});

static SPACED_HYPHEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d|years|months)\s*-\s*(\d)").expect("valid regex")
});

pub fn clean_domain_type(df: &DataFrame, field: &FieldConfig) -> Result<DataFrame> {
    clean_text_field(df, DOMAIN_TYPE, field, FieldDefaults::LOWERCASE)
}

/// Cleans `domain`, normalises age labels and applies the overall domain.
pub fn clean_domain(df: &DataFrame, field: &FieldConfig) -> Result<DataFrame> {
    let out = clean_text_field(df, DOMAIN, field, FieldDefaults::LOWERCASE)?;
    let out = map_values(&out, DOMAIN, normalize_age_label)?;
    apply_overall_domain(&out)
}

/// Rewrites common age-label variants onto the canonical grammar.
///
/// ```
/// use nis_transform::cleaners::normalize_age_label;
///
/// assert_eq!(normalize_age_label("18 – 49 years"), "18-49 years");
/// assert_eq!(normalize_age_label(">=65 years"), "65+ years");
/// assert_eq!(normalize_age_label("6 months - 17 years"), "6 months-17 years");
/// ```
pub fn normalize_age_label(value: &str) -> String {
    let dashed = value.replace(['–', '—'], "-");
    if let Some(captures) = AT_LEAST.captures(dashed.trim()) {
        return format!("{}+ {}", &captures[1], &captures[2]);
    }
    SPACED_HYPHEN.replace_all(&dashed, "$1-$2").into_owned()
}

fn apply_overall_domain(df: &DataFrame) -> Result<DataFrame> {
    if !has_column(df, DOMAIN_TYPE) {
        return Ok(df.clone());
    }
    let types = text_values(df, DOMAIN_TYPE)?;
    let domains: Vec<Option<String>> = text_values(df, DOMAIN)?
        .into_iter()
        .zip(&types)
        .map(|(domain, domain_type)| match domain_type.as_deref() {
            Some(OVERALL) => Some(OVERALL.to_string()),
            _ => domain,
        })
        .collect();
    with_column(df, text_column(DOMAIN, domains))
}
