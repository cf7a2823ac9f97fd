//! Record store backed by a JSON export
//!
//! The file holds an array of rows in the same shape the HTTP API returns.

use std::path::PathBuf;

use crate::error::util::read_to_string;
use crate::error::Result;
use crate::models::{MunicipalityRecord, RawMunicipality, ingest_records};
use crate::store::{RecordStore, StoreFuture, log_ingest};

/// Store reading a JSON export from disk on every query
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    strict: bool,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            strict: false,
        }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    async fn read_records(&self) -> Result<Vec<MunicipalityRecord>> {
        let contents = read_to_string(&self.path, "reading municipality export").await?;
        let rows: Vec<RawMunicipality> = serde_json::from_str(&contents)?;
        let (records, report) = ingest_records(rows, self.strict)?;
        log_ingest(&self.describe(), &report);
        Ok(records)
    }
}

impl RecordStore for JsonFileStore {
    fn list(&self) -> StoreFuture<'_, Vec<MunicipalityRecord>> {
        Box::pin(self.read_records())
    }

    fn get<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<MunicipalityRecord>> {
        Box::pin(async move {
            let records = self.read_records().await?;
            Ok(records.into_iter().find(|r| r.id == id))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
