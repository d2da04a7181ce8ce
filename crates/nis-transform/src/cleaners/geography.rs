use nis_common::{text_column, text_values};
use nis_model::schema::{GEOGRAPHY, GEOGRAPHY_TYPE};
use nis_model::vocabulary::{NATION, is_admin1};
use nis_model::{FieldConfig, GeographyType};
use polars::prelude::DataFrame;

use super::{FieldDefaults, clean_text_field};
use crate::error::Result;
use crate::frame::{require_columns, with_columns};

const GEOGRAPHY_TYPE_DEFAULTS: FieldDefaults = FieldDefaults {
    lowercase: true,
    vocabulary: &[
        ("national", "nation"),
        ("national estimates", "nation"),
        ("state", "admin1"),
        ("states", "admin1"),
        ("jurisdictional estimates", "admin1"),
        ("hhs region", "region"),
        ("hhs regions", "region"),
        ("hhs regional estimates", "region"),
    ],
};

const GEOGRAPHY_DEFAULTS: FieldDefaults = FieldDefaults {
    lowercase: false,
    vocabulary: &[("National", NATION), ("United States", NATION)],
};

/// Cleans `geography_type` and folds source vocabulary onto
/// nation/region/admin1/substate/county/local.
pub fn clean_geography_type(df: &DataFrame, field: &FieldConfig) -> Result<DataFrame> {
    clean_text_field(df, GEOGRAPHY_TYPE, field, GEOGRAPHY_TYPE_DEFAULTS)
}

/// Cleans `geography`, then re-derives `geography_type` from the value.
///
/// Region labels such as `"Region 4: AL, FL, GA"` become `"Region 4"`;
/// admin1 rows outside the admin1 list become substate; region rows whose
/// value is `"nation"` become nation.
pub fn clean_geography(df: &DataFrame, field: &FieldConfig) -> Result<DataFrame> {
    let out = clean_text_field(df, GEOGRAPHY, field, GEOGRAPHY_DEFAULTS)?;
    require_columns(&out, &[GEOGRAPHY_TYPE])?;

    let types = text_values(&out, GEOGRAPHY_TYPE)?;
    let values = text_values(&out, GEOGRAPHY)?;
    let mut retyped = 0usize;

    let (types, values): (Vec<Option<String>>, Vec<Option<String>>) = types
        .into_iter()
        .zip(values)
        .map(|(geo_type, value)| {
            let (new_type, new_value) = rederive(geo_type.as_deref(), value.as_deref());
            if new_type.as_deref() != geo_type.as_deref() {
                retyped += 1;
            }
            (new_type, new_value)
        })
        .unzip();

    if retyped > 0 {
        tracing::debug!(retyped, "re-derived geography types");
    }
    with_columns(
        &out,
        vec![
            text_column(GEOGRAPHY_TYPE, types),
            text_column(GEOGRAPHY, values),
        ],
    )
}

fn rederive(geo_type: Option<&str>, value: Option<&str>) -> (Option<String>, Option<String>) {
    let (Some(geo_type), Some(value)) = (geo_type, value) else {
        return (geo_type.map(str::to_string), value.map(str::to_string));
    };
    match GeographyType::parse(geo_type) {
        Some(GeographyType::Region) if value == NATION => {
            (Some(GeographyType::Nation.to_string()), Some(NATION.to_string()))
        }
        Some(GeographyType::Region) => {
            let label = region_label(value).unwrap_or_else(|| value.to_string());
            (Some(geo_type.to_string()), Some(label))
        }
        Some(GeographyType::Admin1) if !is_admin1(value) => (
            Some(GeographyType::Substate.to_string()),
            Some(value.to_string()),
        ),
        _ => (Some(geo_type.to_string()), Some(value.to_string())),
    }
}

/// Extracts and title-cases the label before a colon, e.g.
/// `"region 1: CT, ME"` gives `"Region 1"`.
pub fn region_label(value: &str) -> Option<String> {
    let (label, _) = value.split_once(':')?;
    let label = label.trim();
    (!label.is_empty()).then(|| title_case(label))
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_labels_are_extracted() {
        assert_eq!(region_label("Region 1: CT, ME, MA").as_deref(), Some("Region 1"));
        assert_eq!(region_label("region 10: AK, ID").as_deref(), Some("Region 10"));
        assert_eq!(region_label("Region 3"), None);
    }

    #[test]
    fn admin1_outside_list_becomes_substate() {
        assert_eq!(
            rederive(Some("admin1"), Some("Bexar County")),
            (Some("substate".to_string()), Some("Bexar County".to_string()))
        );
        assert_eq!(
            rederive(Some("admin1"), Some("Texas")),
            (Some("admin1".to_string()), Some("Texas".to_string()))
        );
    }

    #[test]
    fn nation_rows_are_not_forced() {
        assert_eq!(
            rederive(Some("nation"), Some("Texas")),
            (Some("nation".to_string()), Some("Texas".to_string()))
        );
        assert_eq!(
            rederive(Some("region"), Some("nation")),
            (Some("nation".to_string()), Some("nation".to_string()))
        );
    }
}
