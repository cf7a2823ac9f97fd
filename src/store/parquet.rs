//! Record store backed by Parquet extracts
//!
//! Reads a single `.parquet` file or every `.parquet` file in a directory.
//! Columns are projected onto the municipality schema, checked for a
//! compatible type and deserialized row by row through `serde_arrow`, so
//! the same flexible parsing and validation applies as for JSON rows.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use arrow_schema::{DataType, Field, Schema};
use itertools::Itertools;

use crate::error::{KommunError, Result};
use crate::models::{MunicipalityRecord, RawMunicipality, ingest_records};
use crate::store::{RecordStore, StoreFuture, log_ingest};
use crate::utils::io::{load_parquet_files_parallel, read_parquet};

const TEXT_COLUMNS: [&str; 3] = ["name", "county", "top_fodelselander"];

const NUMERIC_COLUMNS: [&str; 12] = [
    "population",
    "safety_score",
    "crime_rate",
    "school_rating",
    "price_per_sqm",
    "employment_rate",
    "utrikes_fodda",
    "tva_utrikes_foraldrar",
    "en_utrikes_foraldrar",
    "tva_inrikes_foraldrar",
    "utlandsk_bakgrund_total",
    "procent_utlandsk_bakgrund",
];

/// Arrow schema of a municipality extract
#[must_use]
pub fn municipality_schema() -> Arc<Schema> {
    let mut fields = vec![Field::new("id", DataType::Utf8, false)];
    fields.extend(
        TEXT_COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true)),
    );
    fields.extend(
        NUMERIC_COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, true)),
    );
    Arc::new(Schema::new(fields))
}

fn is_text(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View | DataType::Null
    )
}

fn is_numeric_or_text(data_type: &DataType) -> bool {
    data_type.is_integer() || data_type.is_floating() || is_text(data_type)
}

/// Check that an extract's columns can be read as municipality rows
///
/// `id` must be present as text or an integer. Other known columns are
/// optional but must have a readable type; unknown columns are ignored.
pub fn check_schema(schema: &Schema) -> Result<()> {
    let id = schema
        .field_with_name("id")
        .map_err(|_| KommunError::Schema("missing required column 'id'".to_string()))?;
    if !(is_text(id.data_type()) || id.data_type().is_integer()) {
        return Err(KommunError::Schema(format!(
            "column 'id' must be text or integer, found {}",
            id.data_type()
        )));
    }

    let text_errors = TEXT_COLUMNS.iter().filter_map(|name| {
        let field = schema.field_with_name(name).ok()?;
        (!is_text(field.data_type()))
            .then(|| format!("column '{name}' must be text, found {}", field.data_type()))
    });
    let numeric_errors = NUMERIC_COLUMNS.iter().filter_map(|name| {
        let field = schema.field_with_name(name).ok()?;
        (!is_numeric_or_text(field.data_type()))
            .then(|| format!("column '{name}' must be numeric, found {}", field.data_type()))
    });

    let errors = text_errors.chain(numeric_errors).collect_vec();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(KommunError::Schema(errors.join("; ")))
    }
}

/// Deserialize the rows of one record batch
pub fn rows_from_batch(batch: &RecordBatch) -> Result<Vec<RawMunicipality>> {
    check_schema(batch.schema().as_ref())?;
    serde_arrow::from_record_batch(batch)
        .map_err(|e| KommunError::Schema(format!("Failed to deserialize record batch: {e}")))
}

/// Read raw rows from a Parquet file or directory
pub fn read_rows(path: &Path) -> Result<Vec<RawMunicipality>> {
    let schema = municipality_schema();
    let batches = if path.is_dir() {
        load_parquet_files_parallel(path, Some(schema.as_ref()))?
    } else {
        read_parquet(path, Some(schema.as_ref()))?
    };

    let mut rows = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in &batches {
        rows.extend(rows_from_batch(batch)?);
    }
    Ok(rows)
}

/// Store reading Parquet extracts from disk on every query
#[derive(Debug, Clone)]
pub struct ParquetRecordStore {
    path: PathBuf,
    strict: bool,
}

impl ParquetRecordStore {
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
        let path = self.path.clone();
        let rows = tokio::task::spawn_blocking(move || read_rows(&path))
            .await
            .map_err(|e| KommunError::io_error(format!("Parquet reader task failed: {e}")))??;

        let (records, report) = ingest_records(rows, self.strict)?;
        log_ingest(&self.describe(), &report);
        Ok(records)
    }
}

impl RecordStore for ParquetRecordStore {
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
