//! Record filtering criteria
//!
//! This module provides filters for narrowing down municipality lists by
//! name and by numeric ranges.

use crate::filter::range::Range;
use crate::models::{MunicipalityRecord, NumericField};

/// Defines a criterion for filtering entities
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// A filter that can be applied to a municipality record
#[derive(Debug, Clone, PartialEq)]
pub enum MunicipalityFilter {
    /// Case-insensitive substring of the name; an empty needle matches everything
    NameContains(String),
    /// Field value inside a closed range, with absent values treated as `0`
    InRange {
        /// Field to test
        field: NumericField,
        /// Accepted interval
        range: Range,
    },
    /// Combined filter that requires all criteria to be met
    All(Vec<MunicipalityFilter>),
    /// Combined filter that requires any criterion to be met
    Any(Vec<MunicipalityFilter>),
}

impl MunicipalityFilter {
    /// Name search filter
    pub fn name_contains(query: impl Into<String>) -> Self {
        Self::NameContains(query.into())
    }

    /// Range filter on one field
    #[must_use]
    pub const fn in_range(field: NumericField, range: Range) -> Self {
        Self::InRange { field, range }
    }
}

impl FilterCriteria<MunicipalityRecord> for MunicipalityFilter {
    fn meets_criteria(&self, record: &MunicipalityRecord) -> bool {
        match self {
            Self::NameContains(needle) => {
                needle.is_empty() || record.name.to_lowercase().contains(&needle.to_lowercase())
            }
            Self::InRange { field, range } => range.contains(field.coalesced(record)),
            Self::All(filters) => filters.iter().all(|f| f.meets_criteria(record)),
            Self::Any(filters) => filters.iter().any(|f| f.meets_criteria(record)),
        }
    }
}

/// Keep the records that meet `criteria`, preserving input order
#[must_use]
pub fn filter_records<C>(records: &[MunicipalityRecord], criteria: &C) -> Vec<MunicipalityRecord>
where
    C: FilterCriteria<MunicipalityRecord> + ?Sized,
{
    records
        .iter()
        .filter(|record| criteria.meets_criteria(record))
        .cloned()
        .collect()
}
