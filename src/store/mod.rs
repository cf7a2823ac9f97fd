//! Record store access
//!
//! A [`RecordStore`] answers the two read queries of the municipality
//! backend: the full list and a single record by id. Implementations exist
//! for the HTTP API, JSON exports, Parquet extracts and in-memory data.
//! Everything a store returns has already passed ingestion validation.

pub mod http;
pub mod json;
pub mod memory;
pub mod parquet;

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::config::DashboardConfig;
use crate::error::{KommunError, Result};
use crate::models::{IngestReport, MunicipalityRecord};
use crate::utils::logging::{log_operation_complete, log_operation_start};

pub use http::HttpRecordStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use parquet::ParquetRecordStore;

/// Boxed future returned by [`RecordStore`] methods
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Read access to municipality records
pub trait RecordStore: Send + Sync {
    /// All records, in store order
    fn list(&self) -> StoreFuture<'_, Vec<MunicipalityRecord>>;

    /// One record by id, `None` when no record has that id
    fn get<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<MunicipalityRecord>>;

    /// Human readable description of where records come from
    fn describe(&self) -> String;
}

/// Where records are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// Base URL of the HTTP API
    Http(String),
    /// A JSON export holding an array of rows
    JsonFile(PathBuf),
    /// A Parquet file or a directory of Parquet files
    Parquet(PathBuf),
}

impl RecordSource {
    /// Classify a source string: `http(s)://` URLs, `.json` files, and
    /// `.parquet` files or directories
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(KommunError::Config("Record source is empty".to_string()));
        }

        if source.starts_with("http://") || source.starts_with("https://") {
            return Ok(Self::Http(source.to_string()));
        }

        let path = PathBuf::from(source);
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::JsonFile(path)),
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Ok(Self::Parquet(path)),
            _ if path.is_dir() => Ok(Self::Parquet(path)),
            _ => Err(KommunError::Config(format!(
                "Cannot tell how to read '{source}': expected an http(s) URL, a .json file, or a .parquet file or directory"
            ))),
        }
    }

    /// Open a store for this source
    pub fn open(&self, config: &DashboardConfig) -> Result<Box<dyn RecordStore>> {
        let strict = config.strict_validation;
        Ok(match self {
            Self::Http(url) => Box::new(HttpRecordStore::new(url.clone(), config)?),
            Self::JsonFile(path) => Box::new(JsonFileStore::new(path.clone()).with_strict(strict)),
            Self::Parquet(path) => {
                Box::new(ParquetRecordStore::new(path.clone()).with_strict(strict))
            }
        })
    }
}

impl FromStr for RecordSource {
    type Err = KommunError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::JsonFile(path) | Self::Parquet(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Records loaded for a session, plus how the load went
///
/// A failed load is not an error: the dataset is empty and `error` holds the
/// message to show in place of the table.
#[derive(Debug)]
pub struct Dataset {
    pub records: Vec<MunicipalityRecord>,
    pub error: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
}

impl Dataset {
    /// Load every record from `store`
    pub async fn load(store: &dyn RecordStore) -> Self {
        let start = Instant::now();
        let source = store.describe();
        log_operation_start("Loading municipalities", &source);

        match store.list().await {
            Ok(records) => {
                log_operation_complete("loaded", &source, records.len(), Some(start.elapsed()));
                Self {
                    records,
                    error: None,
                    loaded_at: Utc::now(),
                    source,
                }
            }
            Err(e) => {
                log::error!("Failed to load municipalities from {source}: {e}");
                Self {
                    records: Vec::new(),
                    error: Some(e.to_string()),
                    loaded_at: Utc::now(),
                    source,
                }
            }
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Log the outcome of an ingestion pass for a store
pub(crate) fn log_ingest(source: &str, report: &IngestReport) {
    if report.is_clean() {
        log::debug!("{source}: accepted all {} records", report.accepted);
    } else {
        log::info!(
            "{source}: accepted {} records, rejected {}",
            report.accepted,
            report.rejected.len()
        );
    }
}
