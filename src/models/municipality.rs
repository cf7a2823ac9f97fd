//! Municipality record model
//!
//! `RawMunicipality` mirrors a row exactly as the record store delivers it,
//! tolerating the shape variations seen in practice (numeric ids, numbers
//! encoded as strings, missing names). `MunicipalityRecord` is the validated
//! form every other module works with; the conversion between the two is the
//! only place records are checked.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::KommunError;
use crate::models::birth_country::{BirthCountryEntry, parse_birth_countries_excluding};

/// Custom deserializer for the record id, accepting strings and integers
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlexibleIdVisitor;

    impl<'de> serde::de::Visitor<'de> for FlexibleIdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.trim().to_string()))
        }
    }

    deserializer.deserialize_any(FlexibleIdVisitor)
}

/// Custom deserializer for numeric columns, accepting integers, floats and numeric strings
fn deserialize_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlexibleNumberVisitor;

    impl<'de> serde::de::Visitor<'de> for FlexibleNumberVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a numeric string or null")
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .replace(',', ".")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("Invalid numeric value: {value}")))
        }
    }

    deserializer.deserialize_any(FlexibleNumberVisitor)
}

/// A municipality row as delivered by the record store, before validation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMunicipality {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub population: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub safety_score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub crime_rate: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub school_rating: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub price_per_sqm: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub employment_rate: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub utrikes_fodda: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub tva_utrikes_foraldrar: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub en_utrikes_foraldrar: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub tva_inrikes_foraldrar: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub utlandsk_bakgrund_total: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub procent_utlandsk_bakgrund: Option<f64>,
    #[serde(default)]
    pub top_fodelselander: Option<String>,
}

/// A validated statistics row for one Swedish municipality
///
/// Deserializing this type directly runs the same validation as ingestion
/// and fails on the first invalid record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMunicipality")]
pub struct MunicipalityRecord {
    /// Opaque unique identifier
    pub id: String,
    /// Display name, empty when the store has none
    pub name: String,
    /// County the municipality belongs to
    pub county: Option<String>,
    /// Number of inhabitants
    pub population: u64,
    /// Safety score, 0-100
    pub safety_score: Option<f64>,
    /// Reported crimes per 100 000 inhabitants
    pub crime_rate: Option<f64>,
    /// School rating, 0-100
    pub school_rating: Option<f64>,
    /// Housing price in SEK per square metre
    pub price_per_sqm: Option<f64>,
    /// Share of employed 20-64 year olds, 0-100
    pub employment_rate: Option<f64>,
    /// Residents born abroad
    pub utrikes_fodda: Option<u64>,
    /// Residents born in Sweden with two foreign-born parents
    pub tva_utrikes_foraldrar: Option<u64>,
    /// Residents born in Sweden with one foreign-born parent
    pub en_utrikes_foraldrar: Option<u64>,
    /// Residents born in Sweden with two Swedish-born parents
    pub tva_inrikes_foraldrar: Option<u64>,
    /// Residents with a foreign background in total
    pub utlandsk_bakgrund_total: Option<u64>,
    /// Share of residents with a foreign background, 0-100
    pub procent_utlandsk_bakgrund: Option<f64>,
    /// Ranked birth countries, `"Country: count | ..."`
    pub top_fodelselander: Option<String>,
}

impl MunicipalityRecord {
    /// Create a record with only the required attributes set
    pub fn new(id: impl Into<String>, name: impl Into<String>, population: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            county: None,
            population,
            safety_score: None,
            crime_rate: None,
            school_rating: None,
            price_per_sqm: None,
            employment_rate: None,
            utrikes_fodda: None,
            tva_utrikes_foraldrar: None,
            en_utrikes_foraldrar: None,
            tva_inrikes_foraldrar: None,
            utlandsk_bakgrund_total: None,
            procent_utlandsk_bakgrund: None,
            top_fodelselander: None,
        }
    }

    #[must_use]
    pub fn with_safety_score(mut self, score: f64) -> Self {
        self.safety_score = Some(score);
        self
    }

    #[must_use]
    pub fn with_school_rating(mut self, rating: f64) -> Self {
        self.school_rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_price_per_sqm(mut self, price: f64) -> Self {
        self.price_per_sqm = Some(price);
        self
    }

    #[must_use]
    pub fn with_employment_rate(mut self, rate: f64) -> Self {
        self.employment_rate = Some(rate);
        self
    }

    #[must_use]
    pub fn with_foreign_background(mut self, percent: f64) -> Self {
        self.procent_utlandsk_bakgrund = Some(percent);
        self
    }

    #[must_use]
    pub fn with_foreign_born(mut self, count: u64) -> Self {
        self.utrikes_fodda = Some(count);
        self
    }

    #[must_use]
    pub fn with_birth_countries(mut self, raw: impl Into<String>) -> Self {
        self.top_fodelselander = Some(raw.into());
        self
    }

    /// Top birth countries, excluding the given domestic country
    #[must_use]
    pub fn birth_countries(&self, domestic_country: &str) -> Vec<BirthCountryEntry> {
        parse_birth_countries_excluding(self.top_fodelselander.as_deref(), domestic_country)
    }

    /// Foreign-born residents as a percentage of the population
    #[must_use]
    pub fn foreign_born_share(&self) -> Option<f64> {
        match (self.utrikes_fodda, self.population) {
            (Some(born_abroad), population) if population > 0 => {
                Some(born_abroad as f64 / population as f64 * 100.0)
            }
            _ => None,
        }
    }
}

/// `-0.0` passes the range checks; store it as `+0.0`
fn positive_zero(v: f64) -> f64 {
    v + 0.0
}

fn check_scale(id: &str, field: &str, value: Option<f64>) -> Result<Option<f64>, KommunError> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=100.0).contains(&v) => Err(KommunError::validation(
            Some(id),
            format!("{field} must be within 0-100, got {v}"),
        )),
        other => Ok(other.map(positive_zero)),
    }
}

fn check_non_negative(id: &str, field: &str, value: Option<f64>) -> Result<Option<f64>, KommunError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(KommunError::validation(
            Some(id),
            format!("{field} must be a non-negative number, got {v}"),
        )),
        other => Ok(other.map(positive_zero)),
    }
}

fn check_count(id: &str, field: &str, value: Option<f64>) -> Result<Option<u64>, KommunError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(Some(v as u64))
        }
        Some(v) => Err(KommunError::validation(
            Some(id),
            format!("{field} must be a non-negative integer, got {v}"),
        )),
    }
}

impl TryFrom<RawMunicipality> for MunicipalityRecord {
    type Error = KommunError;

    fn try_from(raw: RawMunicipality) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| KommunError::validation(None, "id is required"))?;

        let population = check_count(&id, "population", raw.population)?
            .ok_or_else(|| KommunError::validation(Some(&id), "population is required"))?;

        Ok(Self {
            name: raw.name.unwrap_or_default(),
            county: raw.county.filter(|c| !c.trim().is_empty()),
            population,
            safety_score: check_scale(&id, "safety_score", raw.safety_score)?,
            crime_rate: check_non_negative(&id, "crime_rate", raw.crime_rate)?,
            school_rating: check_scale(&id, "school_rating", raw.school_rating)?,
            price_per_sqm: check_non_negative(&id, "price_per_sqm", raw.price_per_sqm)?,
            employment_rate: check_scale(&id, "employment_rate", raw.employment_rate)?,
            utrikes_fodda: check_count(&id, "utrikes_fodda", raw.utrikes_fodda)?,
            tva_utrikes_foraldrar: check_count(&id, "tva_utrikes_foraldrar", raw.tva_utrikes_foraldrar)?,
            en_utrikes_foraldrar: check_count(&id, "en_utrikes_foraldrar", raw.en_utrikes_foraldrar)?,
            tva_inrikes_foraldrar: check_count(&id, "tva_inrikes_foraldrar", raw.tva_inrikes_foraldrar)?,
            utlandsk_bakgrund_total: check_count(
                &id,
                "utlandsk_bakgrund_total",
                raw.utlandsk_bakgrund_total,
            )?,
            procent_utlandsk_bakgrund: check_scale(
                &id,
                "procent_utlandsk_bakgrund",
                raw.procent_utlandsk_bakgrund,
            )?,
            top_fodelselander: raw.top_fodelselander,
            id,
        })
    }
}
