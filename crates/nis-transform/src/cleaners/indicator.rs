use nis_model::FieldConfig;
use nis_model::schema::{INDICATOR, INDICATOR_TYPE};
use polars::prelude::DataFrame;

use super::{FieldDefaults, clean_text_field};
use crate::error::Result;

pub fn clean_indicator_type(df: &DataFrame, field: &FieldConfig) -> Result<DataFrame> {
    clean_text_field(df, INDICATOR_TYPE, field, FieldDefaults::LOWERCASE)
}

pub fn clean_indicator(df: &DataFrame, field: &FieldConfig) -> Result<DataFrame> {
    clean_text_field(df, INDICATOR, field, FieldDefaults::LOWERCASE)
}
