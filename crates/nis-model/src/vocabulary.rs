//! Fixed reference vocabularies.
//!
//! All tables here are read-only process-wide data; nothing mutates them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// First-level administrative divisions of the US: states, DC and territories.
pub static ADMIN1_VALUES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
    "District of Columbia",
    "Guam",
    "Puerto Rico",
    "U.S. Virgin Islands",
];

/// Accepted values of the `vaccine` column.
pub static VACCINES: &[&str] = &[
    "flu",
    "covid",
    "flu_h1n1",
    "flu_seasonal_or_h1n1",
    "nirsevimab",
    "rsv_maternal",
    "rsv",
];

/// Accepted values of the `time_type` column.
pub static TIME_TYPES: &[&str] = &["week", "month"];

/// Accepted `time_end - time_start` lengths, in days.
pub static INTERVAL_DAYS: &[i64] = &[6, 7, 8, 28, 29, 30, 31];

/// Literal geography value used for national rows.
pub const NATION: &str = "nation";

/// Literal domain value used for unstratified rows.
pub const OVERALL: &str = "overall";

pub fn is_admin1(value: &str) -> bool {
    ADMIN1_VALUES.contains(&value)
}

pub fn is_vaccine(value: &str) -> bool {
    VACCINES.contains(&value)
}

/// Geographic resolution of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeographyType {
    Nation,
    Region,
    Admin1,
    Substate,
    County,
    Local,
}

impl GeographyType {
    pub const ALL: [GeographyType; 6] = [
        Self::Nation,
        Self::Region,
        Self::Admin1,
        Self::Substate,
        Self::County,
        Self::Local,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nation => "nation",
            Self::Region => "region",
            Self::Admin1 => "admin1",
            Self::Substate => "substate",
            Self::County => "county",
            Self::Local => "local",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for GeographyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting interval granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeType {
    Week,
    Month,
}

impl TimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl FromStr for TimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
