//! The dashboard's predicate set
//!
//! A text query plus at most one range per numeric field, all combined with
//! logical AND.

use std::collections::BTreeMap;

use crate::error::{KommunError, Result};
use crate::filter::criteria::{FilterCriteria, MunicipalityFilter};
use crate::filter::range::Range;
use crate::models::{MunicipalityRecord, NumericField};

/// Upper bound of the default population slider
pub const POPULATION_CEILING: f64 = 1_000_000.0;
/// Upper bound of the default housing price slider, SEK per square metre
pub const HOUSING_CEILING: f64 = 100_000.0;
/// Upper bound of the 0-100 scale sliders
pub const PERCENT_CEILING: f64 = 100.0;

/// Search query and range predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    query: String,
    ranges: BTreeMap<NumericField, Range>,
}

impl FilterSet {
    /// An empty predicate set, matching every record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The ranges the dashboard starts with; every slider at its full extent
    #[must_use]
    pub fn dashboard_defaults() -> Self {
        let mut set = Self::new();
        for field in NumericField::ALL {
            set.ranges.insert(field, default_range(field));
        }
        set
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_range(mut self, field: NumericField, range: Range) -> Self {
        self.ranges.insert(field, range);
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_range(&mut self, field: NumericField, range: Range) {
        self.ranges.insert(field, range);
    }

    pub fn clear_range(&mut self, field: NumericField) -> Option<Range> {
        self.ranges.remove(&field)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn range(&self, field: NumericField) -> Option<Range> {
        self.ranges.get(&field).copied()
    }

    /// Whether no predicate is set at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.ranges.is_empty()
    }

    /// Restore the dashboard defaults, clearing the query
    pub fn reset(&mut self) {
        *self = Self::dashboard_defaults();
    }

    /// Number of predicates that narrow the result compared to the defaults
    ///
    /// Population, housing and foreign background only count when their
    /// upper bound is lowered; the other scores count when either bound moves.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        let mut count = usize::from(!self.query.is_empty());

        for (field, range) in &self.ranges {
            let active = match field {
                NumericField::Population => range.hi() < POPULATION_CEILING,
                NumericField::PricePerSqm => range.hi() < HOUSING_CEILING,
                NumericField::ForeignBackground => range.hi() < PERCENT_CEILING,
                NumericField::SafetyScore
                | NumericField::SchoolRating
                | NumericField::EmploymentRate => {
                    range.lo() > 0.0 || range.hi() < PERCENT_CEILING
                }
            };
            count += usize::from(active);
        }

        count
    }

    /// Lower the set into a single criteria tree
    #[must_use]
    pub fn to_filter(&self) -> MunicipalityFilter {
        let mut filters = Vec::with_capacity(self.ranges.len() + 1);
        if !self.query.is_empty() {
            filters.push(MunicipalityFilter::name_contains(self.query.clone()));
        }
        filters.extend(
            self.ranges
                .iter()
                .map(|(field, range)| MunicipalityFilter::in_range(*field, *range)),
        );
        MunicipalityFilter::All(filters)
    }
}

impl FilterCriteria<MunicipalityRecord> for FilterSet {
    fn meets_criteria(&self, record: &MunicipalityRecord) -> bool {
        let query = self.query.to_lowercase();
        (query.is_empty() || record.name.to_lowercase().contains(&query))
            && self
                .ranges
                .iter()
                .all(|(field, range)| range.contains(field.coalesced(record)))
    }
}

/// Full slider extent for a field
#[must_use]
pub fn default_range(field: NumericField) -> Range {
    let hi = match field {
        NumericField::Population => POPULATION_CEILING,
        NumericField::PricePerSqm => HOUSING_CEILING,
        _ => PERCENT_CEILING,
    };
    Range::up_to(hi)
}

/// Parse a `field=lo..hi` range predicate
pub fn parse_range_predicate(arg: &str) -> Result<(NumericField, Range)> {
    let (field, range) = arg.split_once('=').ok_or_else(|| {
        KommunError::InvalidRange(format!("expected 'field=lo..hi', got '{arg}'"))
    })?;
    Ok((field.parse()?, range.parse()?))
}

/// Reduce `records` to those matching every predicate, preserving order
#[must_use]
pub fn filter(records: &[MunicipalityRecord], predicates: &FilterSet) -> Vec<MunicipalityRecord> {
    if predicates.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| predicates.meets_criteria(record))
        .cloned()
        .collect()
}
