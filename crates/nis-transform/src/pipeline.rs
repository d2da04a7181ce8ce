//! Per-dataset pipeline driver.
//!
//! A [`DatasetPipeline`] is an ordered list of [`CleaningStep`]s. Running it
//! threads one table through every step; each step maps a `&DataFrame` to a
//! new `DataFrame`, and the first fatal error aborts the run.

use nis_model::{CleaningStep, DatasetConfig};
use polars::prelude::{DataFrame, LazyFrame};

use crate::cleaners::{
    clean_domain, clean_domain_type, clean_estimate, clean_geography, clean_geography_type,
    clean_indicator, clean_indicator_type, clean_lci_uci, clean_sample_size,
    clean_time_start_end, clean_time_type, clean_vaccine, drop_bad_rows,
};
use crate::dedupe::remove_duplicates;
use crate::error::Result;
use crate::schema::enforce_schema;

/// A raw extract, either already collected or still a deferred query.
#[derive(Clone)]
pub enum RawTable {
    Eager(DataFrame),
    Lazy(LazyFrame),
}

impl RawTable {
    /// Collects a lazy extract; an eager one is returned as is.
    pub fn materialize(self) -> Result<DataFrame> {
        match self {
            Self::Eager(df) => Ok(df),
            Self::Lazy(lf) => Ok(lf.collect()?),
        }
    }
}

impl From<DataFrame> for RawTable {
    fn from(df: DataFrame) -> Self {
        Self::Eager(df)
    }
}

impl From<LazyFrame> for RawTable {
    fn from(lf: LazyFrame) -> Self {
        Self::Lazy(lf)
    }
}

/// Ordered cleaning steps for one dataset id.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPipeline {
    id: String,
    steps: Vec<CleaningStep>,
}

impl DatasetPipeline {
    /// Builds a pipeline from a config, validating every step up front.
    pub fn new(config: DatasetConfig) -> Result<Self> {
        config.check()?;
        Ok(Self {
            id: config.id,
            steps: config.steps,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn steps(&self) -> &[CleaningStep] {
        &self.steps
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(CleaningStep::name).collect()
    }

    /// Runs every step against `df`.
    pub fn run(&self, df: &DataFrame) -> Result<DataFrame> {
        let input_rows = df.height();
        let mut current = df.clone();
        for step in &self.steps {
            current = apply_step(&current, step).inspect_err(|error| {
                tracing::error!(dataset = %self.id, step = step.name(), %error, "cleaning step failed");
            })?;
            tracing::debug!(
                dataset = %self.id,
                step = step.name(),
                rows = current.height(),
                columns = current.width(),
                "applied cleaning step"
            );
        }
        tracing::info!(
            dataset = %self.id,
            input_rows,
            output_rows = current.height(),
            "cleaned dataset"
        );
        Ok(current)
    }
}

/// Dispatches one step to its cleaner.
pub fn apply_step(df: &DataFrame, step: &CleaningStep) -> Result<DataFrame> {
    match step {
        CleaningStep::DropBadRows(config) => drop_bad_rows(df, config),
        CleaningStep::GeographyType(field) => clean_geography_type(df, field),
        CleaningStep::Geography(field) => clean_geography(df, field),
        CleaningStep::DomainType(field) => clean_domain_type(df, field),
        CleaningStep::Domain(field) => clean_domain(df, field),
        CleaningStep::IndicatorType(field) => clean_indicator_type(df, field),
        CleaningStep::Indicator(field) => clean_indicator(df, field),
        CleaningStep::Vaccine(config) => clean_vaccine(df, config),
        CleaningStep::TimeType(field) => clean_time_type(df, field),
        CleaningStep::TimeStartEnd(config) => clean_time_start_end(df, config),
        CleaningStep::Estimate(config) => clean_estimate(df, config),
        CleaningStep::LciUci(config) => clean_lci_uci(df, config),
        CleaningStep::SampleSize(config) => clean_sample_size(df, config),
        CleaningStep::RemoveDuplicates(config) => remove_duplicates(df, config),
        CleaningStep::EnforceSchema => enforce_schema(df),
    }
}

/// Materialises `input` once and runs `pipeline` over it.
pub fn clean_dataset(input: impl Into<RawTable>, pipeline: &DatasetPipeline) -> Result<DataFrame> {
    let df = input.into().materialize()?;
    pipeline.run(&df)
}
