//! Per-dataset cleaning configuration.
//!
//! A dataset's pipeline is an ordered list of [`CleaningStep`]s. Configs are
//! plain serde data so that built-in pipelines and user-supplied JSON share a
//! single representation; call [`DatasetConfig::check`] after loading.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};
use crate::schema;

/// Accept either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Value edits applied by the column editor, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditOptions {
    /// Lowercase the value after stripping. `None` uses the field's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
    /// Substring replacements, applied in insertion order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub replace: IndexMap<String, String>,
    /// Phrases appended (space separated) where not already present.
    #[serde(
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub append: Vec<String>,
    /// Trigger substring to replacement value; first matching trigger wins.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub infer: IndexMap<String, String>,
}

/// Configuration of a single canonical text field.
///
/// Exactly one of `column` or `override` names the source; `donor` alone is
/// also accepted, in which case the field is synthesized from the donor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_value: Option<String>,
    #[serde(flatten)]
    pub edit: EditOptions,
    /// Column whose content is borrowed into this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor: Option<String>,
    /// Donor phrase to recipient phrase; `None` appends the whole donor value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer: Option<IndexMap<String, String>>,
}

impl FieldConfig {
    pub fn from_column(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::default()
        }
    }

    pub fn from_override(value: impl Into<String>) -> Self {
        Self {
            override_value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn from_donor(donor: impl Into<String>) -> Self {
        Self {
            donor: Some(donor.into()),
            ..Self::default()
        }
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.edit.lowercase = Some(lowercase);
        self
    }

    pub fn with_replace<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.edit
            .replace
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_append(mut self, phrase: impl Into<String>) -> Self {
        self.edit.append.push(phrase.into());
        self
    }

    pub fn with_infer<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.edit
            .infer
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_donor(mut self, donor: impl Into<String>) -> Self {
        self.donor = Some(donor.into());
        self
    }

    pub fn with_transfer<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.transfer = Some(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Reject ambiguous or empty source configuration for `target`.
    pub fn check(&self, target: &str) -> Result<()> {
        match (&self.column, &self.override_value, &self.donor) {
            (Some(_), Some(_), _) => Err(ConfigError::ConfigConflict {
                column: target.to_string(),
            }),
            (None, None, None) => Err(ConfigError::MissingSource {
                column: target.to_string(),
            }),
            _ if self.transfer.is_some() && self.donor.is_none() => {
                Err(ConfigError::InvalidConfig {
                    step: target.to_string(),
                    reason: "`transfer` requires a `donor` column".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Vaccine field; may additionally push vaccine detail into the domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaccineConfig {
    #[serde(flatten)]
    pub field: FieldConfig,
    /// Vaccine phrase to domain phrase, borrowed into `domain`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_transfer: Option<IndexMap<String, String>>,
}

impl VaccineConfig {
    pub fn check(&self) -> Result<()> {
        self.field.check(schema::VACCINE)?;
        let has_raw_label = self.field.column.is_some() || self.field.donor.is_some();
        if self.domain_transfer.is_some() && !has_raw_label {
            return Err(ConfigError::InvalidConfig {
                step: schema::VACCINE.to_string(),
                reason: "`domain_transfer` needs a source or donor column".to_string(),
            });
        }
        Ok(())
    }
}

impl From<FieldConfig> for VaccineConfig {
    fn from(field: FieldConfig) -> Self {
        Self {
            field,
            domain_transfer: None,
        }
    }
}

/// How the raw time columns encode the reporting interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEncoding {
    /// A single end date; the start is derived from `time_type`.
    #[default]
    End,
    /// A `start<sep>end` range.
    Range,
}

fn default_time_separator() -> String {
    "-".to_string()
}

fn default_join() -> String {
    " ".to_string()
}

/// Configuration of the `time_start`/`time_end` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Source columns; several are joined with `join` before parsing.
    #[serde(deserialize_with = "one_or_many")]
    pub columns: Vec<String>,
    #[serde(default)]
    pub encoding: TimeEncoding,
    /// strftime-style format of each date.
    pub format: String,
    #[serde(default = "default_time_separator")]
    pub separator: String,
    #[serde(default = "default_join")]
    pub join: String,
}

impl TimeConfig {
    pub fn end(column: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
            encoding: TimeEncoding::End,
            format: format.into(),
            separator: default_time_separator(),
            join: default_join(),
        }
    }

    pub fn range(column: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            encoding: TimeEncoding::Range,
            ..Self::end(column, format)
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn check(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(ConfigError::MissingSource {
                column: schema::TIME_END.to_string(),
            });
        }
        if self.format.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                step: "time_start_end".to_string(),
                reason: "empty date format".to_string(),
            });
        }
        if self.encoding == TimeEncoding::Range && self.separator.is_empty() {
            return Err(ConfigError::InvalidConfig {
                step: "time_start_end".to_string(),
                reason: "range encoding needs a non-empty separator".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateConfig {
    pub column: String,
}

/// How the raw confidence interval is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiEncoding {
    /// A half-width in percent, applied symmetrically around the estimate.
    #[default]
    HalfWidth,
    /// A `lower<sep>upper` pair in percent.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiConfig {
    pub column: String,
    #[serde(default)]
    pub encoding: CiEncoding,
    #[serde(default = "default_time_separator")]
    pub separator: String,
}

impl CiConfig {
    pub fn half_width(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            encoding: CiEncoding::HalfWidth,
            separator: default_time_separator(),
        }
    }

    pub fn full(column: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            encoding: CiEncoding::Full,
            separator: separator.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSizeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_value: Option<i64>,
}

impl SampleSizeConfig {
    pub fn check(&self) -> Result<()> {
        match (&self.column, &self.override_value) {
            (Some(_), Some(_)) => Err(ConfigError::ConfigConflict {
                column: schema::SAMPLE_SIZE.to_string(),
            }),
            (None, None) => Err(ConfigError::MissingSource {
                column: schema::SAMPLE_SIZE.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

fn default_keep() -> Vec<String> {
    vec!["0".to_string()]
}

/// Drop rows flagged by a quality column, then drop the column itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRowsConfig {
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default = "default_keep")]
    pub keep: Vec<String>,
}

impl Default for DropRowsConfig {
    fn default() -> Self {
        Self {
            column: None,
            keep: default_keep(),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-3
}

fn default_true() -> bool {
    true
}

/// A synonym: canonical column name to value, e.g.
/// `{"indicator_type": "up-to-date", "indicator": "yes"}`.
pub type Synonym = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupeConfig {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_fold_duplication: Option<usize>,
    #[serde(default = "default_true")]
    pub drop_exact: bool,
    /// Each entry is a set of synonyms; the first is the canonical labelling.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<Vec<Synonym>>,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            n_fold_duplication: None,
            drop_exact: true,
            synonyms: Vec::new(),
        }
    }
}

impl DedupeConfig {
    pub fn check(&self) -> Result<()> {
        let invalid = |reason: String| ConfigError::InvalidConfig {
            step: "remove_duplicates".to_string(),
            reason,
        };
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(invalid(format!("tolerance {} is not a finite, non-negative number", self.tolerance)));
        }
        if self.n_fold_duplication == Some(0) {
            return Err(invalid("n_fold_duplication must be positive".to_string()));
        }
        for group in &self.synonyms {
            if group.len() < 2 {
                return Err(invalid("a synonym group needs at least two synonyms".to_string()));
            }
            let Some(first) = group.first() else { continue };
            if first.is_empty() {
                return Err(invalid("empty synonym".to_string()));
            }
            for synonym in group {
                if !synonym.keys().eq(first.keys()) {
                    return Err(invalid(
                        "synonyms in one group must define the same columns".to_string(),
                    ));
                }
                if let Some(unknown) = synonym
                    .keys()
                    .find(|k| schema::canonical_type(k).is_none())
                {
                    return Err(invalid(format!("`{unknown}` is not a canonical column")));
                }
            }
        }
        Ok(())
    }
}

/// One step of a dataset pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CleaningStep {
    DropBadRows(DropRowsConfig),
    GeographyType(FieldConfig),
    Geography(FieldConfig),
    DomainType(FieldConfig),
    Domain(FieldConfig),
    IndicatorType(FieldConfig),
    Indicator(FieldConfig),
    Vaccine(VaccineConfig),
    TimeType(FieldConfig),
    TimeStartEnd(TimeConfig),
    Estimate(EstimateConfig),
    LciUci(CiConfig),
    SampleSize(SampleSizeConfig),
    RemoveDuplicates(DedupeConfig),
    EnforceSchema,
}

impl CleaningStep {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DropBadRows(_) => "drop_bad_rows",
            Self::GeographyType(_) => "geography_type",
            Self::Geography(_) => "geography",
            Self::DomainType(_) => "domain_type",
            Self::Domain(_) => "domain",
            Self::IndicatorType(_) => "indicator_type",
            Self::Indicator(_) => "indicator",
            Self::Vaccine(_) => "vaccine",
            Self::TimeType(_) => "time_type",
            Self::TimeStartEnd(_) => "time_start_end",
            Self::Estimate(_) => "estimate",
            Self::LciUci(_) => "lci_uci",
            Self::SampleSize(_) => "sample_size",
            Self::RemoveDuplicates(_) => "remove_duplicates",
            Self::EnforceSchema => "enforce_schema",
        }
    }

    pub fn check(&self) -> Result<()> {
        match self {
            Self::GeographyType(field)
            | Self::Geography(field)
            | Self::DomainType(field)
            | Self::Domain(field)
            | Self::IndicatorType(field)
            | Self::Indicator(field)
            | Self::TimeType(field) => field.check(self.name()),
            Self::Vaccine(vaccine) => vaccine.check(),
            Self::TimeStartEnd(time) => time.check(),
            Self::LciUci(ci) if ci.encoding == CiEncoding::Full && ci.separator.is_empty() => {
                Err(ConfigError::InvalidConfig {
                    step: self.name().to_string(),
                    reason: "full encoding needs a non-empty separator".to_string(),
                })
            }
            Self::SampleSize(sample) => sample.check(),
            Self::RemoveDuplicates(dedupe) => dedupe.check(),
            Self::DropBadRows(_)
            | Self::Estimate(_)
            | Self::LciUci(_)
            | Self::EnforceSchema => Ok(()),
        }
    }
}

/// Named, ordered cleaning pipeline for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub id: String,
    #[serde(alias = "cleaning_arguments")]
    pub steps: Vec<CleaningStep>,
}

impl DatasetConfig {
    pub fn new(id: impl Into<String>, steps: Vec<CleaningStep>) -> Self {
        Self {
            id: id.into(),
            steps,
        }
    }

    /// Validate every step; the first problem is returned.
    pub fn check(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                step: "dataset".to_string(),
                reason: "empty dataset id".to_string(),
            });
        }
        self.steps.iter().try_for_each(CleaningStep::check)
    }
}
