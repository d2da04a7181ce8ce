use nis_model::schema::VACCINE;
use nis_model::vocabulary::is_vaccine;
use polars::prelude::DataFrame;

use super::{distinct, text};
use crate::issue::Issue;

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let Some(values) = text(df, VACCINE) else {
        return Vec::new();
    };
    let unknown = distinct(
        values
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|v| !is_vaccine(v)),
    );
    if unknown.is_empty() {
        Vec::new()
    } else {
        vec![Issue::UnknownVaccine { values: unknown }]
    }
}
