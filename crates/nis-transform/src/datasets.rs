//! Built-in cleaning pipelines for the published NIS extracts.
//!
//! Each dataset is pure configuration: an ordered list of steps with typed
//! arguments. Nothing here inspects data.

use nis_model::{
    CiConfig, CleaningStep, DatasetConfig, DedupeConfig, DropRowsConfig, EstimateConfig,
    FieldConfig, SampleSizeConfig, Synonym, TimeConfig, VaccineConfig,
};
use nis_model::schema::{INDICATOR, INDICATOR_TYPE};

/// Dataset ids with a built-in pipeline, in registry order.
pub const BUILTIN_IDS: &[&str] = &[
    "vh55-3he6",
    "vdz4-qrri",
    "udsf-9v7b",
    "akkj-j5ru",
    "ksfb-ug5d",
    "sw5n-wg2p",
    "vncy-2ds7",
    "k4cb-dxd7",
    "ker6-gs6z",
    "si7g-c2bs",
];

/// Every built-in dataset configuration.
pub fn builtin_configs() -> Vec<DatasetConfig> {
    vec![
        vh55_3he6(),
        vdz4_qrri(),
        covid_adult("udsf-9v7b"),
        covid_adult("akkj-j5ru"),
        ksfb_ug5d(),
        sw5n_wg2p(),
        vncy_2ds7(),
        k4cb_dxd7(),
        ker6_gs6z(),
        si7g_c2bs(),
    ]
}

fn drop_rows(column: &str) -> CleaningStep {
    CleaningStep::DropBadRows(DropRowsConfig {
        column: Some(column.to_string()),
        ..DropRowsConfig::default()
    })
}

fn column(name: &str) -> FieldConfig {
    FieldConfig::from_column(name)
}

fn fixed(value: &str) -> FieldConfig {
    FieldConfig::from_override(value)
}

fn estimate(name: &str) -> CleaningStep {
    CleaningStep::Estimate(EstimateConfig {
        column: name.to_string(),
    })
}

fn sample_size(name: &str) -> CleaningStep {
    CleaningStep::SampleSize(SampleSizeConfig {
        column: Some(name.to_string()),
        override_value: None,
    })
}

fn synonym(indicator_type: &str, indicator: &str) -> Synonym {
    let mut synonym = Synonym::new();
    synonym.insert(INDICATOR_TYPE.to_string(), indicator_type.to_string());
    synonym.insert(INDICATOR.to_string(), indicator.to_string());
    synonym
}

/// "Received a vaccination" in the 4-level question and "yes" in the
/// up-to-date question describe the same estimates.
fn four_level_dedupe() -> DedupeConfig {
    DedupeConfig {
        tolerance: 1e-3,
        n_fold_duplication: Some(2),
        synonyms: vec![vec![
            synonym("4-level vaccination and intent", "received a vaccination"),
            synonym("up-to-date", "yes"),
        ]],
        ..DedupeConfig::default()
    }
}

fn vh55_3he6() -> DatasetConfig {
    let month_year = TimeConfig {
        join: "-".to_string(),
        ..TimeConfig::end("month", "%m-%Y").with_columns(["month", "year_season"])
    };
    DatasetConfig::new(
        "vh55-3he6",
        vec![
            CleaningStep::DropBadRows(DropRowsConfig::default()),
            CleaningStep::GeographyType(column("geography_type").with_replace([
                ("states/local areas", "admin1"),
                ("counties", "local"),
                ("hhs regions/national", "region"),
            ])),
            CleaningStep::Geography(
                column("geography").with_replace([("United States", "nation")]),
            ),
            CleaningStep::DomainType(FieldConfig::from_donor("dimension_type").with_transfer([
                ("Age", "Age & Possible Risk"),
                ("Race and Ethnicity", "Race & Ethnicity"),
                ("Years", "Location & Age"),
            ])),
            CleaningStep::Domain(column("dimension").with_donor("dimension_type").with_transfer([
                ("6 Months - 17 Years", "6 Months-17 Years"),
                (">=18 Years", ">=18 Years"),
                ("18-49 Years", "18-49 Years"),
                ("50-64 Years", "50-64 Years"),
                (">=65 Years", ">=65 Years"),
            ])),
            CleaningStep::IndicatorType(fixed("Received a vaccination")),
            CleaningStep::Indicator(fixed("yes")),
            CleaningStep::Vaccine(
                column("vaccine")
                    .with_lowercase(false)
                    .with_replace([
                        ("Seasonal Influenza", "flu"),
                        (
                            "Any Influenza Vaccination, Seasonal or H1N1",
                            "flu_seasonal_or_h1n1",
                        ),
                        ("Influenza A (H1N1) 2009 Monovalent", "flu_h1n1"),
                    ])
                    .into(),
            ),
            CleaningStep::TimeType(fixed("month")),
            CleaningStep::TimeStartEnd(month_year),
            estimate("coverage_estimate"),
            CleaningStep::LciUci(CiConfig::full("_95_ci", "to")),
            sample_size("population_sample_size"),
            CleaningStep::RemoveDuplicates(DedupeConfig::default()),
            CleaningStep::EnforceSchema,
        ],
    )
}

fn vdz4_qrri() -> DatasetConfig {
    DatasetConfig::new(
        "vdz4-qrri",
        vec![
            drop_rows("suppressed_flag"),
            CleaningStep::GeographyType(column("geography_label")),
            CleaningStep::Geography(fixed("nation")),
            CleaningStep::DomainType(fixed("age & season")),
            CleaningStep::Domain(fixed(
                "adult females aged 18-49 years with infants under the age of 8 months \
                 during the RSV season (born since April 1, 2024)",
            )),
            CleaningStep::IndicatorType(fixed("4-level vaccination and intent")),
            // The raw `indicator` label names the product; fold it before the
            // category label takes over the canonical `indicator` column.
            CleaningStep::Vaccine(VaccineConfig::from(column("indicator").with_infer([
                ("nirsevimab", "nirsevimab"),
                ("mother received", "rsv_maternal"),
                ("during pregnancy", "rsv_maternal"),
                ("rsv vaccine", "rsv"),
            ]))),
            CleaningStep::Indicator(column("indicator_category_label")),
            CleaningStep::TimeType(fixed("month")),
            CleaningStep::TimeStartEnd(TimeConfig::range("timeframe", "%m/%d/%Y")),
            estimate("estimate"),
            CleaningStep::LciUci(CiConfig::full("_95_confidence_interval", "-")),
            sample_size("sample_size"),
            CleaningStep::RemoveDuplicates(DedupeConfig::default()),
            CleaningStep::EnforceSchema,
        ],
    )
}

/// Source column names shared by the weekly `week_ending` extracts.
struct WeeklyColumns {
    flag: &'static str,
    geography_type: &'static str,
    geography: &'static str,
    estimate: &'static str,
    sample_size: &'static str,
    week_format: &'static str,
}

impl Default for WeeklyColumns {
    fn default() -> Self {
        Self {
            flag: "suppression_flag",
            geography_type: "geographic_level",
            geography: "geographic_name",
            estimate: "estimate",
            sample_size: "sample_size",
            week_format: "%Y-%m-%dT%H:%M:%S%.f",
        }
    }
}

/// Steps of a weekly extract; the domain, vaccine and deduplication
/// arguments vary per dataset.
fn weekly(
    id: &str,
    columns: &WeeklyColumns,
    domain_type: FieldConfig,
    domain: FieldConfig,
    vaccine: VaccineConfig,
    dedupe: DedupeConfig,
) -> DatasetConfig {
    DatasetConfig::new(
        id,
        vec![
            drop_rows(columns.flag),
            CleaningStep::GeographyType(column(columns.geography_type)),
            CleaningStep::Geography(column(columns.geography)),
            CleaningStep::DomainType(domain_type),
            CleaningStep::Domain(domain),
            CleaningStep::IndicatorType(column("indicator_label")),
            CleaningStep::Indicator(column("indicator_category_label")),
            CleaningStep::Vaccine(vaccine),
            CleaningStep::TimeType(fixed("week")),
            CleaningStep::TimeStartEnd(TimeConfig::end("week_ending", columns.week_format)),
            estimate(columns.estimate),
            CleaningStep::LciUci(CiConfig::half_width("ci_half_width_95pct")),
            sample_size(columns.sample_size),
            CleaningStep::RemoveDuplicates(dedupe),
            CleaningStep::EnforceSchema,
        ],
    )
}

fn ksfb_ug5d() -> DatasetConfig {
    weekly(
        "ksfb-ug5d",
        &WeeklyColumns::default(),
        column("demographic_level"),
        column("demographic_name"),
        column("vaccine").into(),
        four_level_dedupe(),
    )
}

fn sw5n_wg2p() -> DatasetConfig {
    weekly(
        "sw5n-wg2p",
        &WeeklyColumns {
            estimate: "estimates",
            ..WeeklyColumns::default()
        },
        column("demographic_level"),
        column("demographic_name"),
        column("vaccine").into(),
        four_level_dedupe(),
    )
}

fn vncy_2ds7() -> DatasetConfig {
    weekly(
        "vncy-2ds7",
        &WeeklyColumns::default(),
        column("demographic_level"),
        column("demographic_name"),
        fixed("flu").into(),
        DedupeConfig::default(),
    )
}

fn k4cb_dxd7() -> DatasetConfig {
    weekly(
        "k4cb-dxd7",
        &WeeklyColumns {
            flag: "suppresion_flag",
            geography_type: "geography_level",
            geography: "geography_name",
            ..WeeklyColumns::default()
        },
        column("demographic_level")
            .with_donor("age_group")
            .with_transfer([("years", "age")]),
        column("demographic_name").with_donor("age_group"),
        column("vaccine").into(),
        DedupeConfig::default(),
    )
}

fn ker6_gs6z() -> DatasetConfig {
    weekly(
        "ker6-gs6z",
        &WeeklyColumns {
            sample_size: "unweighted_sample_size",
            week_format: "%Y-%m-%d",
            ..WeeklyColumns::default()
        },
        column("demographic_level"),
        column("demographic_name"),
        column("vaccine").into(),
        DedupeConfig::default(),
    )
}

/// Monthly adult COVID-19 extracts sharing one layout.
fn covid_adult(id: &str) -> DatasetConfig {
    let period = TimeConfig::range("time_period", "%B %d %Y")
        .with_columns(["time_period", "time_year"]);
    DatasetConfig::new(
        id,
        vec![
            drop_rows("suppression_flag"),
            CleaningStep::GeographyType(column("geography_type")),
            CleaningStep::Geography(column("geography")),
            CleaningStep::DomainType(
                column("group_name").with_replace([("all adults 18+", "overall")]),
            ),
            CleaningStep::Domain(column("group_category")),
            CleaningStep::IndicatorType(column("indicator_name")),
            CleaningStep::Indicator(column("indicator_category")),
            CleaningStep::Vaccine(fixed("covid").into()),
            CleaningStep::TimeType(column("time_type")),
            CleaningStep::TimeStartEnd(period),
            estimate("estimate"),
            CleaningStep::LciUci(CiConfig::full("coninf_95", " - ")),
            sample_size("sample_size"),
            CleaningStep::RemoveDuplicates(DedupeConfig::default()),
            CleaningStep::EnforceSchema,
        ],
    )
}

fn si7g_c2bs() -> DatasetConfig {
    let period =
        TimeConfig::range("time_period", "%B %d %Y").with_columns(["time_period", "year"]);
    DatasetConfig::new(
        "si7g-c2bs",
        vec![
            drop_rows("suppression_flag"),
            CleaningStep::GeographyType(column("geographic_type")),
            CleaningStep::Geography(column("geographic_value")),
            CleaningStep::DomainType(column("group_name")),
            CleaningStep::Domain(column("group_category")),
            CleaningStep::IndicatorType(column("indicator_name")),
            CleaningStep::Indicator(column("indicator_category")),
            CleaningStep::Vaccine(column("new_vax_group").into()),
            CleaningStep::TimeType(fixed("month")),
            CleaningStep::TimeStartEnd(period),
            estimate("estimate"),
            CleaningStep::LciUci(CiConfig::full("_95_ci", "-")),
            sample_size("sample_size"),
            CleaningStep::RemoveDuplicates(DedupeConfig::default()),
            CleaningStep::EnforceSchema,
        ],
    )
}
