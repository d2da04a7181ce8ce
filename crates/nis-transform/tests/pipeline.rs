//! End-to-end tests of built-in and custom dataset pipelines.

use chrono::NaiveDate;
use nis_common::{date_values, f64_values, i64_values, text_values};
use nis_model::schema::canonical_names;
use nis_model::vocabulary::VACCINES;
use nis_model::{CleaningStep, DatasetConfig, DropRowsConfig, FieldConfig, TimeConfig};
use nis_transform::{CleanError, DatasetPipeline, DatasetRegistry, clean_dataset};
use polars::prelude::*;

fn test_df(columns: &[(&str, &[&str])]) -> DataFrame {
    DataFrame::new(
        columns
            .iter()
            .map(|(name, values)| Series::new((*name).into(), values.to_vec()).into_column())
            .collect(),
    )
    .unwrap()
}

fn strings(df: &DataFrame, column: &str) -> Vec<String> {
    text_values(df, column)
        .unwrap()
        .into_iter()
        .map(Option::unwrap)
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn assert_close(actual: &[Option<f64>], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        let a = a.unwrap();
        assert!((a - e).abs() < 1e-9, "{a} != {e}");
    }
}

fn weekly_extract() -> DataFrame {
    test_df(&[
        ("suppression_flag", &["0", "0", "0", "1", "0"]),
        ("geographic_level", &["National", "State", "State", "State", "State"]),
        ("geographic_name", &["National", "Texas", "Bexar County", "Ohio", "Utah"]),
        ("demographic_level", &["Overall", "Age", "Age", "Age", "Age"]),
        (
            "demographic_name",
            &["18+ years", "18 – 49 years", ">=65 years", "18-49 years", "18-49 years"],
        ),
        ("indicator_label", &["Up-to-date"; 5]),
        ("indicator_category_label", &["Yes"; 5]),
        ("vaccine", &["Flu"; 5]),
        ("week_ending", &["2024-01-13"; 5]),
        ("estimate", &["45.2", "30.0", "60.5", "12.0", "NA"]),
        ("ci_half_width_95pct", &["1.1", "2.0", "3.5", "1.0", "1.0"]),
        ("unweighted_sample_size", &["1000", "200", "150", "90", "80"]),
    ])
}

#[test]
fn weekly_extract_is_cleaned_to_the_canonical_schema() {
    let registry = DatasetRegistry::builtin().unwrap();
    let pipeline = registry.get("ker6-gs6z").unwrap();
    let out = clean_dataset(weekly_extract(), pipeline).unwrap();

    let names: Vec<String> = out
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(names, canonical_names().collect::<Vec<_>>());

    // One suppressed row and one non-numeric estimate are dropped.
    assert_eq!(out.height(), 3);
    assert_eq!(strings(&out, "geography_type"), ["nation", "admin1", "substate"]);
    assert_eq!(strings(&out, "geography"), ["nation", "Texas", "Bexar County"]);
    assert_eq!(strings(&out, "domain_type"), ["overall", "age", "age"]);
    assert_eq!(strings(&out, "domain"), ["overall", "18-49 years", "65+ years"]);
    assert_eq!(strings(&out, "indicator_type"), ["up-to-date"; 3]);
    assert_eq!(strings(&out, "vaccine"), ["flu"; 3]);
    assert_eq!(strings(&out, "time_type"), ["week"; 3]);

    assert_eq!(date_values(&out, "time_start").unwrap(), vec![date(2024, 1, 7); 3]);
    assert_eq!(date_values(&out, "time_end").unwrap(), vec![date(2024, 1, 13); 3]);
    assert_close(&f64_values(&out, "estimate").unwrap(), &[0.452, 0.3, 0.605]);
    assert_close(&f64_values(&out, "lci").unwrap(), &[0.441, 0.28, 0.57]);
    assert_close(&f64_values(&out, "uci").unwrap(), &[0.463, 0.32, 0.64]);
    assert_eq!(
        i64_values(&out, "sample_size").unwrap(),
        vec![Some(1000), Some(200), Some(150)]
    );
}

#[test]
fn monthly_rsv_extract_folds_vaccine_labels() {
    let df = test_df(&[
        ("suppressed_flag", &["0", "0", "0"]),
        ("geography_label", &["National", "National", "National"]),
        (
            "indicator_category_label",
            &[
                "Received a vaccination",
                "Definitely will get a vaccination",
                "Received a vaccination",
            ],
        ),
        (
            "indicator",
            &[
                "Infant received nirsevimab",
                "Mother received RSV vaccine during pregnancy",
                "Received RSV vaccine",
            ],
        ),
        ("timeframe", &["10/01/2024-10/31/2024"; 3]),
        ("estimate", &["52.1", "20.0", "31.5"]),
        ("_95_confidence_interval", &["50.0-54.2", "18.0 - 22.0", "29.0-34.0"]),
        ("sample_size", &["1,234", "1,234", "980"]),
    ]);
    let registry = DatasetRegistry::builtin().unwrap();
    let out = clean_dataset(df.lazy(), registry.get("vdz4-qrri").unwrap()).unwrap();

    assert_eq!(out.height(), 3);
    let vaccines = strings(&out, "vaccine");
    assert_eq!(vaccines, ["nirsevimab", "rsv_maternal", "rsv"]);
    assert!(vaccines.iter().all(|v| VACCINES.contains(&v.as_str())));
    assert_eq!(strings(&out, "geography_type"), ["nation"; 3]);
    assert_eq!(
        strings(&out, "indicator"),
        [
            "received a vaccination",
            "definitely will get a vaccination",
            "received a vaccination"
        ]
    );
    assert_eq!(date_values(&out, "time_start").unwrap(), vec![date(2024, 10, 1); 3]);
    assert_eq!(date_values(&out, "time_end").unwrap(), vec![date(2024, 10, 31); 3]);
    assert_close(&f64_values(&out, "lci").unwrap(), &[0.5, 0.18, 0.29]);
    assert_close(&f64_values(&out, "uci").unwrap(), &[0.542, 0.22, 0.34]);
    assert_eq!(
        i64_values(&out, "sample_size").unwrap(),
        vec![Some(1234), Some(1234), Some(980)]
    );

    let report = nis_validate::validate("vdz4-qrri", &out, nis_validate::ValidationMode::Error);
    assert!(report.is_ok(), "{report:?}");
}

#[test]
fn fatal_errors_abort_the_pipeline() {
    let config = DatasetConfig::new(
        "custom",
        vec![
            CleaningStep::DropBadRows(DropRowsConfig::default()),
            CleaningStep::TimeType(FieldConfig::from_column("period")),
            CleaningStep::TimeStartEnd(TimeConfig::end("week_ending", "%Y-%m-%d")),
        ],
    );
    let pipeline = DatasetPipeline::new(config).unwrap();
    let df = test_df(&[("period", &["Yearly"]), ("week_ending", &["2024-01-13"])]);

    let err = clean_dataset(df, &pipeline).unwrap_err();
    assert!(matches!(err, CleanError::UnrecognizedTimeType { value } if value == "yearly"));
}

#[test]
fn missing_source_columns_are_reported() {
    let registry = DatasetRegistry::builtin().unwrap();
    let df = test_df(&[("suppression_flag", &["0"])]);
    let err = clean_dataset(df, registry.get("ker6-gs6z").unwrap()).unwrap_err();
    assert!(matches!(err, CleanError::MissingColumns { .. }));
}

#[test]
fn weekly_pipeline_runs_steps_in_order() {
    let registry = DatasetRegistry::builtin().unwrap();
    let steps = registry.get("ker6-gs6z").unwrap().step_names().join("\n");
    insta::assert_snapshot!(steps, @r"
    drop_bad_rows
    geography_type
    geography
    domain_type
    domain
    indicator_type
    indicator
    vaccine
    time_type
    time_start_end
    estimate
    lci_uci
    sample_size
    remove_duplicates
    enforce_schema
    ");
}
