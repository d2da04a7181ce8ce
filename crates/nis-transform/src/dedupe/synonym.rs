//! Categorical synonym resolution.
//!
//! A synonym group lists label combinations, e.g. `indicator_type` plus
//! `indicator`, that describe the same observations. The synonym with the
//! most rows must cover every observation of the others; its rows are kept
//! under the first-listed labels and the rest are discarded.

use std::collections::HashSet;

use nis_common::{row_values, text_column, text_values};
use nis_model::Synonym;
use nis_model::schema::VALUE_COLUMNS;
use polars::prelude::DataFrame;

use crate::error::{CleanError, Result};
use crate::frame::{filter_rows, require_columns, with_columns};

/// Resolves each synonym group in turn.
pub fn resolve_synonyms(df: &DataFrame, groups: &[Vec<Synonym>]) -> Result<DataFrame> {
    groups
        .iter()
        .try_fold(df.clone(), |out, group| resolve_group(&out, group))
}

fn describe(synonym: &Synonym) -> String {
    let parts: Vec<String> = synonym
        .iter()
        .map(|(column, value)| format!("{column}={value:?}"))
        .collect();
    format!("({})", parts.join(", "))
}

fn resolve_group(df: &DataFrame, group: &[Synonym]) -> Result<DataFrame> {
    let Some(canonical) = group.first() else {
        return Ok(df.clone());
    };
    let defining: Vec<&str> = canonical.keys().map(String::as_str).collect();
    require_columns(df, &defining)?;

    // Observation identity: every column that neither defines the synonym
    // nor carries a numeric value.
    let identity: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .filter(|c| !defining.contains(&c.as_str()) && !VALUE_COLUMNS.contains(&c.as_str()))
        .collect();
    let identity_refs: Vec<&str> = identity.iter().map(String::as_str).collect();

    let labels = row_values(df, &defining)?;
    let projections = row_values(df, &identity_refs)?;

    // Which synonym, if any, each row carries.
    let membership: Vec<Option<usize>> = labels
        .iter()
        .map(|row| {
            group.iter().position(|synonym| {
                synonym
                    .values()
                    .zip(row)
                    .all(|(expected, actual)| actual.as_deref() == Some(expected.as_str()))
            })
        })
        .collect();

    let mut counts = vec![0usize; group.len()];
    for index in membership.iter().flatten() {
        counts[*index] += 1;
    }
    if counts.iter().filter(|&&n| n > 0).count() < 2 {
        return relabel(df, &membership, canonical, None);
    }

    let majority = counts
        .iter()
        .enumerate()
        .fold(0, |best, (i, &n)| if n > counts[best] { i } else { best });

    let covered: HashSet<&Vec<Option<String>>> = projections
        .iter()
        .zip(&membership)
        .filter(|(_, m)| **m == Some(majority))
        .map(|(p, _)| p)
        .collect();

    for (index, synonym) in group.iter().enumerate() {
        if index == majority {
            continue;
        }
        let uncovered: HashSet<&Vec<Option<String>>> = projections
            .iter()
            .zip(&membership)
            .filter(|(p, m)| **m == Some(index) && !covered.contains(p))
            .map(|(p, _)| p)
            .collect();
        if !uncovered.is_empty() {
            tracing::error!(
                synonym = %describe(synonym),
                uncovered = uncovered.len(),
                "synonym is not covered by the majority synonym"
            );
            return Err(CleanError::SynonymMismatch {
                synonym: describe(synonym),
                uncovered: uncovered.len(),
            });
        }
    }

    tracing::debug!(
        majority = %describe(&group[majority]),
        dropped = counts.iter().sum::<usize>() - counts[majority],
        "resolved synonyms"
    );
    relabel(df, &membership, canonical, Some(majority))
}

/// Keeps non-synonym rows and the kept synonym's rows, relabelled.
///
/// With `keep = None` at most one synonym is present and its rows are kept.
fn relabel(
    df: &DataFrame,
    membership: &[Option<usize>],
    canonical: &Synonym,
    keep: Option<usize>,
) -> Result<DataFrame> {
    let kept: Vec<bool> = membership
        .iter()
        .map(|m| match (m, keep) {
            (None, _) | (Some(_), None) => true,
            (Some(index), Some(keep)) => *index == keep,
        })
        .collect();
    let out = filter_rows(df, &kept)?;
    let is_synonym: Vec<bool> = membership
        .iter()
        .zip(&kept)
        .filter(|(_, k)| **k)
        .map(|(m, _)| m.is_some())
        .collect();

    let columns = canonical
        .iter()
        .map(|(column, value)| {
            let values: Vec<Option<String>> = text_values(&out, column)?
                .into_iter()
                .zip(&is_synonym)
                .map(|(current, synonym)| if *synonym { Some(value.clone()) } else { current })
                .collect();
            Ok(text_column(column, values))
        })
        .collect::<Result<Vec<_>>>()?;
    with_columns(&out, columns)
}
