//! Column value editor.
//!
//! Applies, in order: whitespace stripping, optional lowercasing, substring
//! replacement, conditional phrase appending and phrase-triggered inference.
//! Nulls pass through untouched and no row is ever dropped.

use nis_common::{text_column, text_values};
use polars::prelude::DataFrame;

pub use nis_model::EditOptions;

use crate::error::Result;
use crate::frame::with_column;

/// Separator placed between a value and an appended phrase.
pub const APPEND_SEPARATOR: &str = " ";

/// Edits a single value.
///
/// # Examples
///
/// ```
/// use nis_transform::editor::{EditOptions, edit_value};
///
/// let mut options = EditOptions::default();
/// options.lowercase = Some(true);
/// options.replace.insert("states".into(), "admin1".into());
/// assert_eq!(edit_value("  States ", &options), "admin1");
/// ```
pub fn edit_value(value: &str, options: &EditOptions) -> String {
    let mut out = value.trim().to_string();
    if options.lowercase.unwrap_or(false) {
        out = out.to_lowercase();
    }
    for (from, to) in &options.replace {
        if !from.is_empty() && out.contains(from.as_str()) {
            out = out.replace(from.as_str(), to);
        }
    }
    for phrase in &options.append {
        if !out.contains(phrase.as_str()) {
            if !out.is_empty() {
                out.push_str(APPEND_SEPARATOR);
            }
            out.push_str(phrase);
        }
    }
    if let Some(replacement) = options
        .infer
        .iter()
        .find_map(|(trigger, replacement)| out.contains(trigger.as_str()).then_some(replacement))
    {
        out = replacement.clone();
    }
    out
}

/// Returns a copy of `df` with `column` edited according to `options`.
pub fn edit_column(df: &DataFrame, column: &str, options: &EditOptions) -> Result<DataFrame> {
    let edited: Vec<Option<String>> = text_values(df, column)?
        .into_iter()
        .map(|value| value.map(|v| edit_value(&v, options)))
        .collect();
    with_column(df, text_column(column, edited))
}
