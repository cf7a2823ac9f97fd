//! Record ingestion
//!
//! Converts raw store rows into validated records once, at the store
//! boundary. Lenient ingestion skips invalid rows and duplicate ids with a
//! warning; strict ingestion fails on the first one.

use rustc_hash::FxHashSet;

use crate::error::{KommunError, Result};
use crate::models::{MunicipalityRecord, RawMunicipality};

/// Outcome of an ingestion pass
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Rows that became records
    pub accepted: usize,
    /// Rows that were skipped, with the reason
    pub rejected: Vec<KommunError>,
}

impl IngestReport {
    /// Whether every row was accepted
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validate raw rows into records
///
/// # Arguments
/// * `rows` - Rows in store order
/// * `strict` - Fail on the first invalid row instead of skipping it
///
/// # Returns
/// The accepted records, in input order, and a report of what was skipped
pub fn ingest_records(
    rows: Vec<RawMunicipality>,
    strict: bool,
) -> Result<(Vec<MunicipalityRecord>, IngestReport)> {
    let mut seen_ids = FxHashSet::default();
    let mut records = Vec::with_capacity(rows.len());
    let mut report = IngestReport::default();

    for raw in rows {
        let outcome = MunicipalityRecord::try_from(raw).and_then(|record| {
            if seen_ids.insert(record.id.clone()) {
                Ok(record)
            } else {
                Err(KommunError::validation(
                    Some(&record.id),
                    "duplicate id, keeping the first occurrence",
                ))
            }
        });

        match outcome {
            Ok(record) => records.push(record),
            Err(e) if strict => return Err(e),
            Err(e) => {
                log::warn!("Skipping record: {e}");
                report.rejected.push(e);
            }
        }
    }

    report.accepted = records.len();
    if !report.is_clean() {
        log::warn!(
            "Ingested {} records, skipped {} invalid rows",
            report.accepted,
            report.rejected.len()
        );
    }

    Ok((records, report))
}
