//! Geography values constrained by their geography type.

use std::sync::LazyLock;

use indexmap::IndexMap;
use nis_model::GeographyType;
use nis_model::schema::{GEOGRAPHY, GEOGRAPHY_TYPE};
use nis_model::vocabulary::{NATION, is_admin1};
use polars::prelude::DataFrame;
use regex::Regex;

use super::{distinct, samples, text};
use crate::issue::Issue;

static REGION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Region \d+$").expect("valid regex"));

static COUNTY_FIPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("valid regex"));

/// Whether `value` is a valid geography for `geography_type`.
pub fn is_valid_geography(geography_type: GeographyType, value: &str) -> bool {
    match geography_type {
        GeographyType::Nation => value == NATION,
        GeographyType::Region => REGION.is_match(value),
        GeographyType::Admin1 => is_admin1(value),
        GeographyType::County => COUNTY_FIPS.is_match(value),
        GeographyType::Substate | GeographyType::Local => true,
    }
}

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let (Some(types), Some(values)) = (text(df, GEOGRAPHY_TYPE), text(df, GEOGRAPHY)) else {
        return Vec::new();
    };

    let unknown = distinct(
        types
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|t| GeographyType::parse(t).is_none()),
    );
    let mut issues = Vec::new();
    if !unknown.is_empty() {
        issues.push(Issue::UnknownGeographyType { values: unknown });
    }

    let mut invalid: IndexMap<GeographyType, Vec<&str>> = IndexMap::new();
    for (geography_type, value) in types.iter().zip(&values) {
        let (Some(geography_type), Some(value)) = (geography_type, value) else {
            continue;
        };
        if let Some(parsed) = GeographyType::parse(geography_type)
            && !is_valid_geography(parsed, value)
        {
            invalid.entry(parsed).or_default().push(value);
        }
    }
    for (geography_type, values) in invalid {
        issues.push(Issue::InvalidGeography {
            geography_type: geography_type.to_string(),
            count: values.len(),
            samples: samples(values),
        });
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geography_rules_by_type() {
        assert!(is_valid_geography(GeographyType::Nation, "nation"));
        assert!(!is_valid_geography(GeographyType::Nation, "Texas"));
        assert!(is_valid_geography(GeographyType::Admin1, "Texas"));
        assert!(!is_valid_geography(GeographyType::Admin1, "Bexar County"));
        assert!(is_valid_geography(GeographyType::Region, "Region 10"));
        assert!(!is_valid_geography(GeographyType::Region, "Region 4: AL"));
        assert!(is_valid_geography(GeographyType::County, "48029"));
        assert!(!is_valid_geography(GeographyType::County, "4802"));
        assert!(is_valid_geography(GeographyType::Substate, "TX-Bexar County"));
    }
}
