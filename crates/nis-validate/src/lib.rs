//! Data-quality validation of canonical coverage tables.
//!
//! Rules are accumulated rather than short-circuited, so one run reports
//! every problem category present:
//!
//! - **schema**: missing, extra, mistyped or reordered columns
//! - **duplicates**: repeated rows and repeated observation groups
//! - **nulls**: null cells in any column
//! - **text**: irregular whitespace and capitalization
//! - **vaccine / geography / age / time**: reference vocabularies and grammars
//! - **metrics**: proportions in `[0, 1]`, bracketing intervals, positive sample sizes

pub mod checks;
mod issue;
mod mode;
mod report;
mod validator;

pub use issue::Issue;
pub use mode::{ValidationError, ValidationMode};
pub use report::ValidationReport;
pub use validator::{Validator, validate};
