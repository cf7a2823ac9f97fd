//! In-memory record store

use crate::models::MunicipalityRecord;
use crate::store::{RecordStore, StoreFuture};

/// Store serving records held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<MunicipalityRecord>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(records: Vec<MunicipalityRecord>) -> Self {
        Self { records }
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> StoreFuture<'_, Vec<MunicipalityRecord>> {
        Box::pin(async move { Ok(self.records.clone()) })
    }

    fn get<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<MunicipalityRecord>> {
        Box::pin(async move { Ok(self.records.iter().find(|r| r.id == id).cloned()) })
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }
}
