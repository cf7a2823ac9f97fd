//! Numeric record fields
//!
//! The closed set of numeric attributes that can be range-filtered and
//! sorted. Names match the wire format exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KommunError;
use crate::models::MunicipalityRecord;

/// A numeric attribute of a municipality record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// Number of inhabitants
    Population,
    /// Safety score, 0-100
    SafetyScore,
    /// Housing price in SEK per square metre
    PricePerSqm,
    /// School rating, 0-100
    SchoolRating,
    /// Share of employed 20-64 year olds, 0-100
    EmploymentRate,
    /// Share of the population with a foreign background, 0-100
    #[serde(rename = "procent_utlandsk_bakgrund")]
    ForeignBackground,
}

impl NumericField {
    /// Every numeric field, in dashboard order
    pub const ALL: [Self; 6] = [
        Self::Population,
        Self::SafetyScore,
        Self::PricePerSqm,
        Self::SchoolRating,
        Self::EmploymentRate,
        Self::ForeignBackground,
    ];

    /// Field name as it appears on the wire
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::SafetyScore => "safety_score",
            Self::PricePerSqm => "price_per_sqm",
            Self::SchoolRating => "school_rating",
            Self::EmploymentRate => "employment_rate",
            Self::ForeignBackground => "procent_utlandsk_bakgrund",
        }
    }

    /// Swedish display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Population => "Befolkning",
            Self::SafetyScore => "Säkerhet",
            Self::PricePerSqm => "Bostadspris",
            Self::SchoolRating => "Skolbetyg",
            Self::EmploymentRate => "Sysselsättning",
            Self::ForeignBackground => "Utländsk bakgrund",
        }
    }

    /// The field's value on a record, `None` when absent
    #[must_use]
    pub fn value(self, record: &MunicipalityRecord) -> Option<f64> {
        match self {
            Self::Population => Some(record.population as f64),
            Self::SafetyScore => record.safety_score,
            Self::PricePerSqm => record.price_per_sqm,
            Self::SchoolRating => record.school_rating,
            Self::EmploymentRate => record.employment_rate,
            Self::ForeignBackground => record.procent_utlandsk_bakgrund,
        }
    }

    /// The field's value with absence coalesced to `0`
    ///
    /// `-0.0` comes back as `+0.0`, so both compare equal under `total_cmp`.
    #[must_use]
    pub fn coalesced(self, record: &MunicipalityRecord) -> f64 {
        self.value(record).map_or(0.0, |v| v + 0.0)
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for NumericField {
    type Err = KommunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == name)
            .ok_or_else(|| KommunError::InvalidField(name.to_string()))
    }
}
