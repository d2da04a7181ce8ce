//! The canonical output schema shared by every cleaned dataset.

use serde::{Deserialize, Serialize};

pub const VACCINE: &str = "vaccine";
pub const GEOGRAPHY_TYPE: &str = "geography_type";
pub const GEOGRAPHY: &str = "geography";
pub const DOMAIN_TYPE: &str = "domain_type";
pub const DOMAIN: &str = "domain";
pub const INDICATOR_TYPE: &str = "indicator_type";
pub const INDICATOR: &str = "indicator";
pub const TIME_TYPE: &str = "time_type";
pub const TIME_START: &str = "time_start";
pub const TIME_END: &str = "time_end";
pub const ESTIMATE: &str = "estimate";
pub const LCI: &str = "lci";
pub const UCI: &str = "uci";
pub const SAMPLE_SIZE: &str = "sample_size";

/// Logical type of a canonical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Date,
    Float,
    Integer,
}

impl ColumnType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Float => "float",
            Self::Integer => "integer",
        }
    }
}

/// A single `(name, type)` entry of the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalColumn {
    pub name: &'static str,
    pub column_type: ColumnType,
}

const fn column(name: &'static str, column_type: ColumnType) -> CanonicalColumn {
    CanonicalColumn { name, column_type }
}

/// Canonical columns, in output order.
pub static CANONICAL_SCHEMA: &[CanonicalColumn] = &[
    column(VACCINE, ColumnType::Text),
    column(GEOGRAPHY_TYPE, ColumnType::Text),
    column(GEOGRAPHY, ColumnType::Text),
    column(DOMAIN_TYPE, ColumnType::Text),
    column(DOMAIN, ColumnType::Text),
    column(INDICATOR_TYPE, ColumnType::Text),
    column(INDICATOR, ColumnType::Text),
    column(TIME_TYPE, ColumnType::Text),
    column(TIME_START, ColumnType::Date),
    column(TIME_END, ColumnType::Date),
    column(ESTIMATE, ColumnType::Float),
    column(LCI, ColumnType::Float),
    column(UCI, ColumnType::Float),
    column(SAMPLE_SIZE, ColumnType::Integer),
];

/// Numeric value columns reconciled by mean during deduplication.
pub static VALUE_COLUMNS: &[&str] = &[ESTIMATE, LCI, UCI];

/// Categorical text columns subject to whitespace and case rules.
pub static TEXT_COLUMNS: &[&str] = &[
    VACCINE,
    GEOGRAPHY_TYPE,
    GEOGRAPHY,
    DOMAIN_TYPE,
    DOMAIN,
    INDICATOR_TYPE,
    INDICATOR,
    TIME_TYPE,
];

/// Text columns whose values are expected to be entirely lowercase.
///
/// `geography` is excluded: state and region names are proper nouns.
pub static LOWERCASE_COLUMNS: &[&str] = &[
    VACCINE,
    GEOGRAPHY_TYPE,
    DOMAIN_TYPE,
    DOMAIN,
    INDICATOR_TYPE,
    INDICATOR,
    TIME_TYPE,
];

/// Canonical column names in order.
pub fn canonical_names() -> impl Iterator<Item = &'static str> {
    CANONICAL_SCHEMA.iter().map(|c| c.name)
}

/// Look up the canonical type of a column, if it is canonical.
pub fn canonical_type(name: &str) -> Option<ColumnType> {
    CANONICAL_SCHEMA
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.column_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_order_is_stable() {
        let names: Vec<_> = canonical_names().collect();
        assert_eq!(names.first(), Some(&VACCINE));
        assert_eq!(names.last(), Some(&SAMPLE_SIZE));
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn value_columns_are_floats() {
        for name in VALUE_COLUMNS {
            assert_eq!(canonical_type(name), Some(ColumnType::Float));
        }
        assert_eq!(canonical_type("unknown"), None);
    }
}
