use nis_model::VaccineConfig;
use nis_model::schema::{DOMAIN, VACCINE};
use polars::prelude::DataFrame;

use super::{FieldDefaults, clean_text_field};
use crate::borrower::borrow_column;
use crate::error::Result;

/// Cleans `vaccine`, folding source labels onto the fixed vocabulary.
///
/// With `domain_transfer`, detail found in the raw vaccine label is first
/// borrowed into `domain`, before the label is folded.
pub fn clean_vaccine(df: &DataFrame, config: &VaccineConfig) -> Result<DataFrame> {
    let field = &config.field;
    config.check()?;

    let out = match (&config.domain_transfer, raw_source(config)) {
        (Some(transfer), Some(source)) => {
            borrow_column(df, DOMAIN, source, Some(transfer))?
        }
        _ => df.clone(),
    };
    clean_text_field(&out, VACCINE, field, FieldDefaults::LOWERCASE)
}

fn raw_source(config: &VaccineConfig) -> Option<&str> {
    config
        .field
        .column
        .as_deref()
        .or(config.field.donor.as_deref())
}
