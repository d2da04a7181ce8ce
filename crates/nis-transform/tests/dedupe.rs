//! Tests for reconciliation, synonym resolution and schema closure.

use nis_common::{f64_values, text_column};
use nis_model::DedupeConfig;
use nis_model::schema::{CANONICAL_SCHEMA, canonical_names};
use nis_transform::dedupe::{ReconcileOptions, drop_exact_duplicates, reconcile, remove_duplicates};
use nis_transform::{CleanError, enforce_schema};
use polars::prelude::*;
use proptest::prelude::*;

fn test_df(groups: Vec<i64>, value1: Vec<f64>, value2: Vec<f64>) -> DataFrame {
    DataFrame::new(vec![
        Series::new("group".into(), groups).into_column(),
        Series::new("value1".into(), value1).into_column(),
        Series::new("value2".into(), value2).into_column(),
    ])
    .unwrap()
}

fn options(tolerance: f64) -> ReconcileOptions {
    ReconcileOptions::new(tolerance).with_value_columns(["value1", "value2"])
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.unwrap();
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

// ============================================================================
// Reconciliation
// ============================================================================

#[test]
fn near_duplicates_collapse_to_their_mean() {
    let df = test_df(vec![1, 1], vec![0.0, 0.1], vec![2.0, 2.1]);
    let out = reconcile(&df, &options(0.1)).unwrap();

    assert_eq!(out.height(), 1);
    assert_close(f64_values(&out, "value1").unwrap()[0], 0.05);
    assert_close(f64_values(&out, "value2").unwrap()[0], 2.05);
    assert_eq!(out.column("group").unwrap().i64().unwrap().get(0), Some(1));
}

#[test]
fn disagreement_beyond_tolerance_is_a_conflict() {
    let df = test_df(vec![1, 1], vec![0.0, 0.1], vec![2.0, 2.1]);
    let err = reconcile(&df, &options(0.01)).unwrap_err();

    match err {
        CleanError::ReconciliationConflict { tolerance, groups } => {
            assert_eq!(tolerance, 0.01);
            assert_eq!(groups.len(), 1);
            assert!(groups[0].starts_with("group=1"), "{}", groups[0]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn input_frame_is_not_modified() {
    let df = test_df(vec![1, 1, 2], vec![0.0, 0.1, 0.3], vec![2.0, 2.1, 0.0]);
    let before = df.clone();
    reconcile(&df, &options(0.1)).unwrap();
    assert!(df.equals_missing(&before));
}

#[test]
fn groups_keep_first_appearance_order() {
    let df = test_df(vec![2, 1, 2], vec![0.5, 0.1, 0.5], vec![0.5, 0.1, 0.5]);
    let out = reconcile(&df, &options(0.1)).unwrap();
    let groups: Vec<Option<i64>> = out.column("group").unwrap().i64().unwrap().into_iter().collect();
    assert_eq!(groups, vec![Some(2), Some(1)]);
}

#[test]
fn exact_duplicates_are_dropped_before_fold_check() {
    let df = DataFrame::new(vec![
        text_column("geography", vec![Some("Texas".into()); 3]),
        Series::new("estimate".into(), vec![0.5, 0.5, 0.5004]).into_column(),
        Series::new("lci".into(), vec![0.4, 0.4, 0.4]).into_column(),
        Series::new("uci".into(), vec![0.6, 0.6, 0.6]).into_column(),
    ])
    .unwrap();
    let config = DedupeConfig {
        n_fold_duplication: Some(2),
        ..DedupeConfig::default()
    };

    let out = remove_duplicates(&df, &config).unwrap();
    assert_eq!(out.height(), 1);
    assert_close(f64_values(&out, "estimate").unwrap()[0], 0.5002);

    let keep_exact = DedupeConfig {
        drop_exact: false,
        ..config
    };
    assert!(matches!(
        remove_duplicates(&df, &keep_exact),
        Err(CleanError::UnexpectedDuplication { expected: 2, .. })
    ));
}

#[test]
fn exact_duplicate_removal_keeps_first_occurrence() {
    let df = test_df(vec![1, 2, 1], vec![0.0, 1.0, 0.0], vec![0.0, 1.0, 0.0]);
    let out = drop_exact_duplicates(&df).unwrap();
    assert_eq!(out.height(), 2);
}

// ============================================================================
// Properties
// ============================================================================

fn rows_strategy() -> impl Strategy<Value = Vec<(i64, f64, f64)>> {
    prop::collection::vec((0i64..5, 0.0f64..1.0, 0.0f64..1.0), 1..20)
}

fn frame_from(rows: &[(i64, f64, f64)]) -> DataFrame {
    test_df(
        rows.iter().map(|r| r.0).collect(),
        rows.iter().map(|r| r.1).collect(),
        rows.iter().map(|r| r.2).collect(),
    )
}

proptest! {
    #[test]
    fn reconcile_is_idempotent(rows in rows_strategy()) {
        let df = frame_from(&rows);
        // A tolerance above the value range always accepts.
        let once = reconcile(&df, &options(2.0)).unwrap();
        let twice = reconcile(&once, &options(2.0)).unwrap();
        prop_assert!(once.equals_missing(&twice));
    }

    #[test]
    fn larger_tolerance_never_rejects_more(
        rows in rows_strategy(),
        low in 0.0f64..0.5,
        extra in 0.0f64..0.5,
    ) {
        let df = frame_from(&rows);
        let accepted_low = reconcile(&df, &options(low)).is_ok();
        let accepted_high = reconcile(&df, &options(low + extra)).is_ok();
        prop_assert!(!accepted_low || accepted_high);
    }

    #[test]
    fn schema_enforcement_is_closed(extras in prop::collection::vec("[a-z]{3,8}_x", 0..4)) {
        let mut columns: Vec<Column> = CANONICAL_SCHEMA
            .iter()
            .map(|canonical| {
                let value = match canonical.name {
                    "time_start" | "time_end" => "2024-03-02",
                    "estimate" | "lci" | "uci" => "0.25",
                    "sample_size" => "12",
                    _ => "value",
                };
                Series::new(canonical.name.into(), vec![value, value]).into_column()
            })
            .collect();
        columns.reverse();
        for name in extras.iter().collect::<std::collections::BTreeSet<_>>() {
            columns.push(Series::new(name.as_str().into(), vec!["e", "e"]).into_column());
        }
        let df = DataFrame::new(columns).unwrap();

        let out = enforce_schema(&df).unwrap();
        let names: Vec<String> = out.get_column_names().into_iter().map(|c| c.to_string()).collect();
        prop_assert_eq!(names, canonical_names().collect::<Vec<_>>());
        prop_assert_eq!(out.height(), 2);
    }
}
