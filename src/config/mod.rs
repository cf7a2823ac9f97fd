//! Configuration for loading and presenting municipality data.

use std::fmt;
use std::time::Duration;

use crate::error::{KommunError, Result};

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Birth-country entry treated as the domestic baseline
pub const DEFAULT_DOMESTIC_COUNTRY: &str = "Sverige";

/// Environment variable overriding the page size
pub const PAGE_SIZE_ENV: &str = "KOMMUNDATA_PAGE_SIZE";
/// Environment variable naming the record source
pub const SOURCE_ENV: &str = "KOMMUNDATA_SOURCE";
/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "KOMMUNDATA_TIMEOUT_SECS";
/// Environment variable enabling strict ingestion
pub const STRICT_ENV: &str = "KOMMUNDATA_STRICT";
/// Environment variable overriding the Parquet reader batch size
pub const PARQUET_BATCH_SIZE_ENV: &str = "KOMMUNDATA_PARQUET_BATCH_SIZE";

/// Configuration for a dashboard session
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Records shown per page
    pub page_size: usize,
    /// Country name dropped from birth-country lists
    pub domestic_country: String,
    /// Where records are read from (URL, JSON file, Parquet file or directory)
    pub source: Option<String>,
    /// Timeout for a single record store request
    pub request_timeout: Duration,
    /// Fail the whole load on the first invalid record instead of skipping it
    pub strict_validation: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            domestic_country: DEFAULT_DOMESTIC_COUNTRY.to_string(),
            source: None,
            request_timeout: Duration::from_secs(10),
            strict_validation: false,
        }
    }
}

impl DashboardConfig {
    /// Build a configuration from defaults overridden by process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from defaults overridden by the given variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            config.page_size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    KommunError::Config(format!("{PAGE_SIZE_ENV} must be a positive integer, got '{raw}'"))
                })?;
        }

        if let Some(source) = lookup(SOURCE_ENV).filter(|s| !s.trim().is_empty()) {
            config.source = Some(source.trim().to_string());
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                KommunError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(STRICT_ENV) {
            config.strict_validation = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Ok(config)
    }
}

impl fmt::Display for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard Configuration:")?;
        writeln!(f, "  Page Size: {}", self.page_size)?;
        writeln!(f, "  Domestic Country: {}", self.domestic_country)?;
        if let Some(source) = &self.source {
            writeln!(f, "  Source: {source}")?;
        }
        writeln!(f, "  Request Timeout: {:?}", self.request_timeout)?;
        writeln!(f, "  Strict Validation: {}", self.strict_validation)?;
        Ok(())
    }
}
