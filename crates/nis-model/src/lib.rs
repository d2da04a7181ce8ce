//! Data model for survey coverage cleaning.
//!
//! Holds the canonical output schema, the fixed reference vocabularies and
//! the serde representation of per-dataset cleaning pipelines.

pub mod config;
pub mod error;
pub mod schema;
pub mod vocabulary;

pub use config::{
    CiConfig, CiEncoding, CleaningStep, DatasetConfig, DedupeConfig, DropRowsConfig, EditOptions,
    EstimateConfig, FieldConfig, SampleSizeConfig, Synonym, TimeConfig, TimeEncoding,
    VaccineConfig,
};
pub use error::{ConfigError, Result};
pub use schema::{CANONICAL_SCHEMA, CanonicalColumn, ColumnType};
pub use vocabulary::{GeographyType, TimeType};
