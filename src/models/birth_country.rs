//! Top birth countries
//!
//! Decodes the `top_fodelselander` field, `"Finland: 50 | Norge: 30"`, into
//! ranked `(country, count)` entries. The domestic entry is the population
//! baseline rather than a foreign-origin count and is always dropped.
//! Malformed entries are skipped one at a time with a warning; the rest of
//! the field still parses.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DOMESTIC_COUNTRY;

/// One country in a municipality's birth-country ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthCountryEntry {
    /// Country name as given in the source
    pub country: String,
    /// Residents born in that country
    pub count: u64,
}

impl BirthCountryEntry {
    pub fn new(country: impl Into<String>, count: u64) -> Self {
        Self {
            country: country.into(),
            count,
        }
    }
}

/// Parse a birth-country field, excluding Sweden
#[must_use]
pub fn parse_birth_countries(raw: Option<&str>) -> Vec<BirthCountryEntry> {
    parse_birth_countries_excluding(raw, DEFAULT_DOMESTIC_COUNTRY)
}

/// Parse a birth-country field, excluding `domestic_country` (case-insensitive)
///
/// Accepts the pipe-delimited form and, for older rows, a JSON object of
/// country to count. Entries come back sorted by count, largest first; equal
/// counts keep their input order.
#[must_use]
pub fn parse_birth_countries_excluding(
    raw: Option<&str>,
    domestic_country: &str,
) -> Vec<BirthCountryEntry> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    let domestic = domestic_country.trim().to_lowercase();

    let mut entries: Vec<BirthCountryEntry> = if raw.starts_with('{') {
        parse_json_object(raw)
    } else {
        raw.split('|').filter_map(parse_segment).collect()
    };

    entries.retain(|entry| entry.country.to_lowercase() != domestic);
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

fn parse_segment(segment: &str) -> Option<BirthCountryEntry> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    let Some((country, count)) = segment.split_once(':') else {
        log::warn!("Skipping birth-country entry without ':' separator: '{segment}'");
        return None;
    };

    let country = country.trim();
    if country.is_empty() {
        log::warn!("Skipping birth-country entry without a country name: '{segment}'");
        return None;
    }

    match count.trim().parse::<u64>() {
        Ok(count) => Some(BirthCountryEntry::new(country, count)),
        Err(e) => {
            log::warn!("Skipping birth-country entry with invalid count '{segment}': {e}");
            None
        }
    }
}

fn parse_json_object(raw: &str) -> Vec<BirthCountryEntry> {
    let map = match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw) {
        Ok(map) => map,
        Err(e) => {
            log::warn!("Skipping birth-country field that is not a valid JSON object: {e}");
            return Vec::new();
        }
    };

    map.into_iter()
        .filter_map(|(country, value)| {
            let country = country.trim().to_string();
            match value.as_u64() {
                Some(count) if !country.is_empty() => Some(BirthCountryEntry::new(country, count)),
                _ => {
                    log::warn!("Skipping birth-country entry '{country}' with invalid count {value}");
                    None
                }
            }
        })
        .collect()
}

/// A country's count as a percentage of all foreign-born residents
///
/// Returns `None` when the foreign-born total is absent or zero, or when the
/// share would exceed 100%, which only happens with inconsistent source data.
#[must_use]
pub fn share_of_foreign_born(count: u64, foreign_born_total: Option<u64>) -> Option<f64> {
    let total = foreign_born_total.filter(|t| *t > 0)?;
    let share = count as f64 / total as f64 * 100.0;
    (share <= 100.0).then_some(share)
}
