//! Sort engine for municipality records
//!
//! Ordering is stable in both directions: `Desc` reverses the comparator, so
//! records with equal keys keep their input order either way.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KommunError, Result};
use crate::models::{MunicipalityRecord, NumericField};

/// Field to order records by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortField {
    /// Lexicographic by name, as given
    Name,
    /// Numeric, absent values coalesced to `0`
    Numeric(NumericField),
}

impl SortField {
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Numeric(field) => field.wire_name(),
        }
    }

    /// Compare two records ascending by this field
    #[must_use]
    pub fn compare(self, a: &MunicipalityRecord, b: &MunicipalityRecord) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Numeric(field) => field.coalesced(a).total_cmp(&field.coalesced(b)),
        }
    }
}

impl From<NumericField> for SortField {
    fn from(field: NumericField) -> Self {
        Self::Numeric(field)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SortField {
    type Err = KommunError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "name" => Ok(Self::Name),
            other => other.parse().map(Self::Numeric),
        }
    }
}

impl TryFrom<String> for SortField {
    type Error = KommunError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SortField> for String {
    fn from(field: SortField) -> Self {
        field.wire_name().to_string()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Apply the direction to an ascending comparison result
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = KommunError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(KommunError::InvalidSortOrder(s.trim().to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field and a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

impl Default for SortSpec {
    /// Largest municipalities first
    fn default() -> Self {
        Self::new(SortField::Numeric(NumericField::Population), SortOrder::Desc)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field, self.order)
    }
}

impl FromStr for SortSpec {
    type Err = KommunError;

    /// Parse `"<field>-<order>"`, e.g. `"safety_score-asc"`
    fn from_str(s: &str) -> Result<Self> {
        let (field, order) = s
            .trim()
            .rsplit_once('-')
            .ok_or_else(|| KommunError::InvalidSortOrder(s.trim().to_string()))?;
        Ok(Self::new(field.parse()?, order.parse()?))
    }
}

/// Return `records` ordered by `field` in direction `order`
#[must_use]
pub fn sort(records: &[MunicipalityRecord], field: SortField, order: SortOrder) -> Vec<MunicipalityRecord> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, SortSpec::new(field, order));
    sorted
}

/// Stable in-place sort by `spec`
pub fn sort_in_place(records: &mut [MunicipalityRecord], spec: SortSpec) {
    records.sort_by(|a, b| spec.order.apply(spec.field.compare(a, b)));
}
