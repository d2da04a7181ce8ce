//! Cross-column borrower.
//!
//! Folds content of a donor column into a recipient column. Without a
//! transfer map the donor value is concatenated wherever the two differ;
//! with one, each donor phrase found (ignoring case) contributes its mapped
//! value.

use indexmap::IndexMap;
use nis_common::{text_column, text_values};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::{has_column, require_columns, with_column};

/// Separator between borrowed parts.
pub const BORROW_SEPARATOR: &str = " & ";

fn contains_part(value: &str, part: &str) -> bool {
    value == part || value.split(BORROW_SEPARATOR).any(|p| p == part)
}

fn join_part(recipient: Option<String>, part: &str) -> String {
    match recipient {
        Some(value) if value.is_empty() => part.to_string(),
        Some(value) if contains_part(&value, part) => value,
        Some(value) => format!("{value}{BORROW_SEPARATOR}{part}"),
        None => part.to_string(),
    }
}

/// Borrows a single value. `None` means no value could be produced.
pub fn borrow_value(
    recipient: Option<&str>,
    donor: Option<&str>,
    transfer: Option<&IndexMap<String, String>>,
) -> Option<String> {
    let Some(donor) = donor else {
        return recipient.map(str::to_string);
    };
    match transfer {
        None => Some(join_part(recipient.map(str::to_string), donor)),
        Some(map) => {
            let donor = donor.to_lowercase();
            map.iter()
                .filter(|(phrase, _)| donor.contains(&phrase.to_lowercase()))
                .fold(recipient.map(str::to_string), |acc, (_, part)| {
                    Some(join_part(acc, part))
                })
        }
    }
}

/// Returns a copy of `df` where `recipient` has borrowed from `donor`.
///
/// A missing recipient column is synthesized; rows that borrow nothing are
/// left null.
pub fn borrow_column(
    df: &DataFrame,
    recipient: &str,
    donor: &str,
    transfer: Option<&IndexMap<String, String>>,
) -> Result<DataFrame> {
    require_columns(df, &[donor])?;
    let donors = text_values(df, donor)?;
    let recipients = if has_column(df, recipient) {
        text_values(df, recipient)?
    } else {
        vec![None; df.height()]
    };

    let borrowed: Vec<Option<String>> = recipients
        .iter()
        .zip(&donors)
        .map(|(r, d)| borrow_value(r.as_deref(), d.as_deref(), transfer))
        .collect();

    let unmatched = borrowed.iter().filter(|v| v.is_none()).count();
    if unmatched > 0 {
        tracing::debug!(recipient, donor, unmatched, "rows matched no donor phrase");
    }
    with_column(df, text_column(recipient, borrowed))
}
