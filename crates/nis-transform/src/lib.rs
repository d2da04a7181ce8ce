//! Cleaning pipeline for NIS coverage extracts.
//!
//! This crate turns a raw extract into a table conforming to the canonical
//! schema:
//!
//! - **editor / resolver / borrower**: column-level primitives
//! - **cleaners**: one field cleaner per canonical column
//! - **normalization**: date and percent parsing
//! - **dedupe**: synonym resolution, exact and near-duplicate removal
//! - **schema**: canonical schema enforcement
//! - **pipeline / registry / datasets**: per-dataset step lists and their driver

pub mod borrower;
pub mod cleaners;
pub mod datasets;
pub mod dedupe;
pub mod editor;
pub mod error;
pub mod frame;
pub mod normalization;
pub mod pipeline;
pub mod registry;
pub mod resolver;
pub mod schema;

pub use error::{CleanError, Result};
pub use pipeline::{DatasetPipeline, RawTable, clean_dataset};
pub use registry::DatasetRegistry;
pub use schema::enforce_schema;
