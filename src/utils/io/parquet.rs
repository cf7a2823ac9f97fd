//! Parquet file operations
//!
//! This module provides utilities for reading Parquet extracts. It includes
//! functions for finding Parquet files, projecting them onto a schema and
//! reading them into Arrow record batches.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use rayon::prelude::*;

use crate::config::PARQUET_BATCH_SIZE_ENV;
use crate::error::util::validate_directory;
use crate::error::{KommunError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    parse_batch_size(std::env::var(PARQUET_BATCH_SIZE_ENV).ok().as_deref())
}

/// Positive batch size from a raw override; anything else falls back to the default
fn parse_batch_size(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|size| *size > 0)
}

/// Helper for creating projection mask from schema
///
/// # Arguments
/// * `schema` - The Arrow schema to project
/// * `file_schema` - The Parquet file schema
/// * `parquet_schema` - The Parquet schema descriptor from the builder
///
/// # Returns
/// The projection mask, or `None` when no schema field is present in the file
#[must_use]
pub fn create_projection(
    schema: &Schema,
    file_schema: &Schema,
    parquet_schema: &parquet::schema::types::SchemaDescriptor,
) -> Option<ProjectionMask> {
    let projection = schema
        .fields()
        .iter()
        .filter_map(|f| {
            let field_name = f.name();
            file_schema.index_of(field_name).map_or_else(
                |_| {
                    log::debug!("Field {field_name} not found in parquet file, skipping");
                    None
                },
                Some,
            )
        })
        .collect_vec();

    if projection.is_empty() {
        log_warning(
            "No matching fields found in schema projection, reading all columns",
            None,
        );
        None
    } else {
        Some(ProjectionMask::roots(parquet_schema, projection))
    }
}

/// Read a parquet file into Arrow record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `schema` - Optional Arrow Schema for projecting specific columns
///
/// # Returns
/// A vector of `RecordBatch` objects
///
/// # Errors
/// Returns an error if the file cannot be opened or if the Parquet file is invalid
pub fn read_parquet(path: &Path, schema: Option<&Schema>) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    let source = path.display().to_string();
    log_operation_start("Reading parquet file", &source);

    let file = File::open(path).map_err(|e| {
        KommunError::io_error_with_source("Failed to open parquet file", e).with_path(path)
    })?;

    let mut builder = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE));

    if let Some(schema) = schema {
        let projection =
            create_projection(schema, builder.schema().as_ref(), builder.parquet_schema());
        if let Some(mask) = projection {
            builder = builder.with_projection(mask);
        }
    }

    let batches = builder
        .build()?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    log_operation_complete(
        "read",
        &source,
        batches.iter().map(RecordBatch::num_rows).sum(),
        Some(start.elapsed()),
    );
    Ok(batches)
}

/// Find all Parquet files in a directory, sorted by path
///
/// # Errors
/// Returns an error if directory reading fails
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    validate_directory(dir, "reading parquet extracts")?;

    let parquet_files = std::fs::read_dir(dir)
        .map_err(|e| {
            KommunError::io_error_with_source("Failed to read directory", e).with_path(dir)
        })?
        .map(|entry| entry.map(|e| e.path()))
        .filter_ok(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "parquet"))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| {
            KommunError::io_error_with_source("Failed to read directory entry", e).with_path(dir)
        })?
        .into_iter()
        .sorted()
        .collect_vec();

    if parquet_files.is_empty() {
        log_warning("No Parquet files found in directory", Some(&dir.display().to_string()));
    }

    Ok(parquet_files)
}

/// Load all parquet files from a directory in parallel
///
/// Batches are returned grouped by file, in file path order.
///
/// # Errors
/// Returns an error if directory reading fails or any file cannot be read
pub fn load_parquet_files_parallel(dir: &Path, schema: Option<&Schema>) -> Result<Vec<RecordBatch>> {
    let parquet_files = find_parquet_files(dir)?;

    let per_file = parquet_files
        .par_iter()
        .map(|path| read_parquet(path, schema))
        .collect::<Result<Vec<_>>>()?;

    let combined = per_file.into_iter().flatten().collect_vec();

    log::info!(
        "Successfully loaded {} batches from {} Parquet files",
        combined.len(),
        parquet_files.len()
    );

    Ok(combined)
}
