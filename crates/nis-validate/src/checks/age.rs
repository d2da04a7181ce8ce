//! Age-group grammar for rows whose domain type is age.

use std::sync::LazyLock;

use nis_model::schema::{DOMAIN, DOMAIN_TYPE};
use polars::prelude::DataFrame;
use regex::Regex;

use super::{samples, text};
use crate::issue::Issue;

/// Accepted shapes: `N-M years`, `N-M months`, `N+ years|months` and
/// `N months-M years`.
static AGE_GROUPS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"^\d+-\d+ years$").expect("valid regex"),
        Regex::new(r"^\d+-\d+ months$").expect("valid regex"),
        Regex::new(r"^\d+\+ (years|months)$").expect("valid regex"),
        Regex::new(r"^\d+ months-\d+ years$").expect("valid regex"),
    ]
});

const AGE: &str = "age";

pub fn is_valid_age_group(value: &str) -> bool {
    AGE_GROUPS.iter().any(|re| re.is_match(value))
}

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let (Some(types), Some(domains)) = (text(df, DOMAIN_TYPE), text(df, DOMAIN)) else {
        return Vec::new();
    };
    let invalid: Vec<&str> = types
        .iter()
        .zip(&domains)
        .filter_map(|(domain_type, domain)| match (domain_type.as_deref(), domain) {
            (Some(AGE), Some(domain)) if !is_valid_age_group(domain) => Some(domain.as_str()),
            _ => None,
        })
        .collect();
    if invalid.is_empty() {
        return Vec::new();
    }
    vec![Issue::InvalidAgeGroup {
        count: invalid.len(),
        samples: samples(invalid),
    }]
}
