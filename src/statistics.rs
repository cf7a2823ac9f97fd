//! Summary statistics and insights over record lists
//!
//! Insights name the leading municipality per metric and only consider
//! records that have a value. Averages follow the dashboard's charts and
//! count absent values as `0`.

use std::fmt;

use crate::format::{format_currency, format_decimal, format_percentage};
use crate::models::{MunicipalityRecord, NumericField};

/// Metric an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Safest,
    BestSchools,
    MostExpensiveHousing,
    HighestForeignBackground,
}

impl InsightKind {
    pub const ALL: [Self; 4] = [
        Self::Safest,
        Self::BestSchools,
        Self::MostExpensiveHousing,
        Self::HighestForeignBackground,
    ];

    #[must_use]
    pub const fn field(self) -> NumericField {
        match self {
            Self::Safest => NumericField::SafetyScore,
            Self::BestSchools => NumericField::SchoolRating,
            Self::MostExpensiveHousing => NumericField::PricePerSqm,
            Self::HighestForeignBackground => NumericField::ForeignBackground,
        }
    }
}

/// The leading municipality for one metric
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub municipality: String,
    pub value: f64,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.municipality;
        match self.kind {
            InsightKind::Safest => write!(
                f,
                "{name} har högst säkerhetsvärde ({}/100)",
                format_decimal(self.value, 1)
            ),
            InsightKind::BestSchools => write!(
                f,
                "{name} har högst skolbetyg ({}/100)",
                format_decimal(self.value, 1)
            ),
            InsightKind::MostExpensiveHousing => write!(
                f,
                "{name} har dyrast bostadspris ({}/m²)",
                format_currency(self.value)
            ),
            InsightKind::HighestForeignBackground => write!(
                f,
                "{name} har störst andel utländsk bakgrund ({})",
                format_percentage(self.value)
            ),
        }
    }
}

/// Record with the highest present value of `field`; the first one wins ties
#[must_use]
pub fn leader(records: &[MunicipalityRecord], field: NumericField) -> Option<(&MunicipalityRecord, f64)> {
    records
        .iter()
        .filter_map(|record| field.value(record).map(|value| (record, value)))
        .fold(None, |best, (record, value)| match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((record, value)),
        })
}

/// One insight per metric, skipping metrics no record has a value for
#[must_use]
pub fn insights(records: &[MunicipalityRecord]) -> Vec<Insight> {
    InsightKind::ALL
        .into_iter()
        .filter_map(|kind| {
            leader(records, kind.field()).map(|(record, value)| Insight {
                kind,
                municipality: record.name.clone(),
                value,
            })
        })
        .collect()
}

/// Mean values across a record list
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Averages {
    pub safety: f64,
    pub housing: f64,
    pub school: f64,
    pub employment: f64,
}

impl Averages {
    /// Averages with absent values counted as `0`; all zero for an empty list
    #[must_use]
    pub fn of(records: &[MunicipalityRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let mean = |field: NumericField| {
            records.iter().map(|r| field.coalesced(r)).sum::<f64>() / records.len() as f64
        };
        Self {
            safety: mean(NumericField::SafetyScore),
            housing: mean(NumericField::PricePerSqm),
            school: mean(NumericField::SchoolRating),
            employment: mean(NumericField::EmploymentRate),
        }
    }
}

impl fmt::Display for Averages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Genomsnitt:")?;
        writeln!(f, "  Säkerhet: {}/100", format_decimal(self.safety, 1))?;
        writeln!(f, "  Bostadspris: {}/m²", format_currency(self.housing))?;
        writeln!(f, "  Skolbetyg: {}/100", format_decimal(self.school, 1))?;
        writeln!(f, "  Sysselsättning: {}", format_percentage(self.employment))?;
        Ok(())
    }
}
