//! Tests for the validator rule catalog and modes.

use chrono::NaiveDate;
use nis_common::{date_column, float_column, int_column, text_column};
use nis_validate::{Issue, ValidationError, ValidationMode, Validator, validate};
use polars::prelude::*;

/// One observation; fields are overridden per test.
#[derive(Clone)]
struct Row {
    vaccine: &'static str,
    geography_type: &'static str,
    geography: &'static str,
    domain_type: &'static str,
    domain: &'static str,
    indicator: &'static str,
    time_type: &'static str,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    estimate: f64,
    lci: f64,
    uci: f64,
    sample_size: i64,
}

impl Default for Row {
    fn default() -> Self {
        Self {
            vaccine: "flu",
            geography_type: "admin1",
            geography: "Texas",
            domain_type: "age",
            domain: "18-49 years",
            indicator: "received a vaccination",
            time_type: "week",
            start: (2024, 1, 7),
            end: (2024, 1, 13),
            estimate: 0.5,
            lci: 0.45,
            uci: 0.55,
            sample_size: 120,
        }
    }
}

fn text(name: &str, rows: &[Row], f: fn(&Row) -> &'static str) -> Column {
    text_column(name, rows.iter().map(|r| Some(f(r).to_string())).collect())
}

fn dates(name: &str, rows: &[Row], f: fn(&Row) -> (i32, u32, u32)) -> Column {
    let values: Vec<Option<NaiveDate>> = rows
        .iter()
        .map(|r| {
            let (y, m, d) = f(r);
            NaiveDate::from_ymd_opt(y, m, d)
        })
        .collect();
    date_column(name, &values).unwrap()
}

fn test_df(rows: &[Row]) -> DataFrame {
    DataFrame::new(vec![
        text("vaccine", rows, |r| r.vaccine),
        text("geography_type", rows, |r| r.geography_type),
        text("geography", rows, |r| r.geography),
        text("domain_type", rows, |r| r.domain_type),
        text("domain", rows, |r| r.domain),
        text("indicator_type", rows, |_| "4-level vaccination and intent"),
        text("indicator", rows, |r| r.indicator),
        text("time_type", rows, |r| r.time_type),
        dates("time_start", rows, |r| r.start),
        dates("time_end", rows, |r| r.end),
        float_column("estimate", rows.iter().map(|r| Some(r.estimate)).collect()),
        float_column("lci", rows.iter().map(|r| Some(r.lci)).collect()),
        float_column("uci", rows.iter().map(|r| Some(r.uci)).collect()),
        int_column("sample_size", rows.iter().map(|r| Some(r.sample_size)).collect()),
    ])
    .unwrap()
}

fn check(rows: &[Row]) -> Vec<Issue> {
    Validator::new(ValidationMode::Warn)
        .check("test", &test_df(rows))
        .issues
}

#[test]
fn clean_table_has_no_issues() {
    let rows = vec![
        Row::default(),
        Row {
            geography_type: "nation",
            geography: "nation",
            ..Row::default()
        },
        Row {
            domain: "65+ years",
            time_type: "month",
            start: (2024, 2, 29),
            end: (2024, 3, 31),
            ..Row::default()
        },
    ];
    assert_eq!(check(&rows), vec![]);
}

#[test]
fn age_groups_follow_the_grammar() {
    let rows: Vec<Row> = ["18-49 years", "65+ years", "18–49 years", "18-49", "18 - 49 years"]
        .into_iter()
        .map(|domain| Row {
            domain,
            ..Row::default()
        })
        .collect();
    let issues = check(&rows);
    assert_eq!(
        issues,
        vec![Issue::InvalidAgeGroup {
            count: 3,
            samples: vec!["18–49 years".into(), "18-49".into(), "18 - 49 years".into()],
        }]
    );
}

#[test]
fn nation_must_pair_with_nation() {
    let rows = vec![
        Row {
            geography_type: "nation",
            geography: "Texas",
            ..Row::default()
        },
        Row::default(),
    ];
    let issues = check(&rows);
    assert_eq!(issues.len(), 1);
    assert!(matches!(
        &issues[0],
        Issue::InvalidGeography { geography_type, count: 1, .. } if geography_type == "nation"
    ));
}

#[test]
fn intervals_must_bracket_estimate() {
    let rows = vec![Row {
        estimate: 0.5,
        lci: 0.6,
        uci: 0.7,
        ..Row::default()
    }];
    let issues = check(&rows);
    assert_eq!(issues, vec![Issue::Bracket { count: 1 }]);
    assert!(issues[0]
        .to_string()
        .starts_with("confidence intervals do not bracket estimate"));
}

#[test]
fn repeated_whitespace_is_flagged() {
    let rows = vec![
        Row {
            indicator: "received  a  vaccination",
            ..Row::default()
        },
        Row {
            geography: "Ohio",
            ..Row::default()
        },
    ];
    let issues = check(&rows);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule(), "whitespace");
}

#[test]
fn problems_are_accumulated_across_rules() {
    let rows = vec![
        Row {
            vaccine: "Flu",
            geography_type: "state",
            time_type: "year",
            start: (2024, 1, 20),
            end: (2024, 1, 13),
            sample_size: 0,
            ..Row::default()
        },
        Row {
            estimate: 1.2,
            uci: 1.3,
            start: (2024, 1, 1),
            end: (2024, 1, 13),
            ..Row::default()
        },
        Row::default(),
        Row::default(),
    ];
    let report = Validator::new(ValidationMode::Warn).check("demo", &test_df(&rows));
    insta::assert_snapshot!(report.problems().join("\n"), @r#"
    1 duplicated row(s)
    column `vaccine` has 1 value(s) that are not lowercase: "Flu"
    unknown vaccine value(s): "Flu"
    unknown geography type(s): "state"
    unknown time type(s): "year"
    1 row(s) with time_start after time_end
    unexpected interval length(s) in days: 12
    column `estimate` has 1 value(s) outside [0, 1]
    column `uci` has 1 value(s) outside [0, 1]
    1 row(s) with non-positive sample_size
    "#);
}

#[test]
fn schema_problems_are_reported() {
    let mut df = test_df(&[Row::default()]).drop("lci").unwrap();
    df.with_column(Series::new("notes".into(), vec!["x"]).into_column())
        .unwrap();
    let report = Validator::default().check("demo", &df);
    assert_eq!(
        report.by_rule("schema").cloned().collect::<Vec<_>>(),
        vec![
            Issue::MissingColumn {
                column: "lci".into()
            },
            Issue::ExtraColumn {
                column: "notes".into()
            },
        ]
    );
}

#[test]
fn modes_control_failure() {
    let df = test_df(&[Row {
        sample_size: -1,
        ..Row::default()
    }]);

    assert!(validate("demo", &df, ValidationMode::Ignore).unwrap().is_empty());
    assert_eq!(validate("demo", &df, ValidationMode::Warn).unwrap().len(), 1);
    match validate("demo", &df, ValidationMode::Error) {
        Err(ValidationError::Failed { dataset, problems }) => {
            assert_eq!(dataset, "demo");
            assert_eq!(problems, vec!["1 row(s) with non-positive sample_size".to_string()]);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(validate("demo", &test_df(&[Row::default()]), ValidationMode::Error).is_ok());
}

#[test]
fn rows_differing_only_in_values_are_duplicated_groups() {
    let rows = vec![
        Row::default(),
        Row {
            estimate: 0.52,
            ..Row::default()
        },
    ];
    let issues = check(&rows);
    assert_eq!(issues, vec![Issue::DuplicateGroups { count: 1 }]);
    assert_eq!(issues[0].rule(), "duplicate_groups");
}
